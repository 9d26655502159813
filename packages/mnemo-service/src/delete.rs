use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, MnemoService, Result};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeleteRequest {
	pub owner_id: Uuid,
	pub record_id: Uuid,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
	pub record_id: Uuid,
}

impl MnemoService {
	/// Removes a record and its vector, vector first.
	///
	/// Ordering matters: deleting the row first would leave a dangling index
	/// entry with no owner able to repair it. If the vector delete fails the
	/// record is kept and the error surfaces, so the caller can retry the
	/// whole operation.
	pub async fn delete(&self, req: DeleteRequest) -> Result<DeleteResponse> {
		if req.owner_id.is_nil() {
			return Err(Error::InvalidRequest { message: "owner_id is required.".to_string() });
		}

		let record = self.fetch_owned(req.owner_id, req.record_id).await?;

		self.clients.index.delete(record.collection, record.record_id).await.map_err(|err| {
			Error::Index {
				message: format!(
					"Vector delete for record {} failed, record kept: {err}",
					record.record_id
				),
			}
		})?;

		if !self.clients.records.delete(record.record_id, record.owner_id).await? {
			// Lost a race with another delete; the vector is gone either way.
			tracing::info!(record_id = %record.record_id, "Record was already removed.");
		}

		Ok(DeleteResponse { record_id: record.record_id })
	}
}
