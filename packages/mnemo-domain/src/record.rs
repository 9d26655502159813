use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::CollectionKind;

/// Canonical content row. `record_id` doubles as the point id of the
/// record's vector in its collection.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ContentRecord {
	pub record_id: Uuid,
	pub owner_id: Uuid,
	pub title: String,
	pub body: String,
	pub source_url: Option<String>,
	pub collection: CollectionKind,
	#[serde(with = "crate::time_serde")]
	pub created_at: OffsetDateTime,
}
