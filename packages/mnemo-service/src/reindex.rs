use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{MnemoService, Result};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReindexRequest {
	pub owner_id: Uuid,
	pub record_id: Uuid,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReindexResponse {
	pub record_id: Uuid,
}

impl MnemoService {
	/// Re-embeds and re-upserts one record, repairing an `indexed: false`
	/// ingest outcome or a vector lost to an index rebuild.
	///
	/// Unlike the ingest path, failures here surface as errors; the caller
	/// asked for the repair explicitly and needs to know it did not happen.
	pub async fn reindex(&self, req: ReindexRequest) -> Result<ReindexResponse> {
		let record = self.fetch_owned(req.owner_id, req.record_id).await?;
		let vector = self.embed_one(&record.body).await?;

		self.clients
			.index
			.upsert(record.collection, record.record_id, record.owner_id, vector)
			.await?;

		Ok(ReindexResponse { record_id: record.record_id })
	}
}
