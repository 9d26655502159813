use time::OffsetDateTime;
use uuid::Uuid;

use crate::Error;
use mnemo_domain::{CollectionKind, ContentRecord};

/// Raw `content_records` row. The collection column is free text at the SQL
/// layer and parsed into the closed enum on the way out.
#[derive(Debug, sqlx::FromRow)]
pub struct ContentRow {
	pub record_id: Uuid,
	pub owner_id: Uuid,
	pub title: String,
	pub body: String,
	pub source_url: Option<String>,
	pub collection: String,
	pub created_at: OffsetDateTime,
}
impl TryFrom<ContentRow> for ContentRecord {
	type Error = Error;

	fn try_from(row: ContentRow) -> Result<Self, Self::Error> {
		let collection = row
			.collection
			.parse::<CollectionKind>()
			.map_err(|err| Error::InvalidArgument(err.to_string()))?;

		Ok(Self {
			record_id: row.record_id,
			owner_id: row.owner_id,
			title: row.title,
			body: row.body,
			source_url: row.source_url,
			collection,
			created_at: row.created_at,
		})
	}
}
