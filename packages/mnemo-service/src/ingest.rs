use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{Error, MnemoService, Result};
use mnemo_domain::{CollectionKind, ContentRecord, gate};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IngestRequest {
	pub owner_id: Uuid,
	pub title: String,
	pub body: String,
	pub source_url: Option<String>,
	pub collection: CollectionKind,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IngestResponse {
	pub record: ContentRecord,
	/// `false` means the record persisted but the vector upsert did not;
	/// [`MnemoService::reindex`] repairs it.
	pub indexed: bool,
}

impl MnemoService {
	/// Validates, persists, then indexes one record.
	///
	/// The record row is the durable outcome. Embedding or index failures
	/// after the insert downgrade the response to `indexed: false` instead of
	/// failing the call.
	pub async fn ingest(&self, req: IngestRequest) -> Result<IngestResponse> {
		if req.owner_id.is_nil() {
			return Err(Error::InvalidRequest { message: "owner_id is required.".to_string() });
		}

		let title = checked_field("title", &req.title, self.cfg.ingest.max_title_chars)?;
		let body = checked_field("body", &req.body, self.cfg.ingest.max_body_chars)?;
		let source_url = req
			.source_url
			.as_deref()
			.map(str::trim)
			.filter(|url| !url.is_empty())
			.map(str::to_string);
		let record = ContentRecord {
			record_id: Uuid::new_v4(),
			owner_id: req.owner_id,
			title,
			body,
			source_url,
			collection: req.collection,
			created_at: OffsetDateTime::now_utc(),
		};

		self.clients.records.insert(&record).await?;

		let indexed = self.index_record(&record).await;

		Ok(IngestResponse { record, indexed })
	}

	/// Embeds the record body and upserts the vector. Failures are logged and
	/// reported as `false`, never propagated; the caller already holds a
	/// durable record.
	pub(crate) async fn index_record(&self, record: &ContentRecord) -> bool {
		let vector = match self.embed_one(&record.body).await {
			Ok(vector) => vector,
			Err(err) => {
				tracing::warn!(
					record_id = %record.record_id,
					"Embedding failed, record left unindexed: {err}"
				);

				return false;
			},
		};

		match self
			.clients
			.index
			.upsert(record.collection, record.record_id, record.owner_id, vector)
			.await
		{
			Ok(()) => true,
			Err(err) => {
				tracing::warn!(
					record_id = %record.record_id,
					"Vector upsert failed, record left unindexed: {err}"
				);

				false
			},
		}
	}
}

fn checked_field(field: &str, value: &str, max_chars: u32) -> Result<String> {
	match gate::check_text(value, max_chars) {
		Ok(text) => Ok(text.to_string()),
		Err(gate::RejectCode::RejectEmpty) =>
			Err(Error::InvalidRequest { message: format!("{field} must not be empty.") }),
		Err(gate::RejectCode::RejectTooLong) => Err(Error::InvalidRequest {
			message: format!("{field} exceeds {max_chars} characters."),
		}),
	}
}
