use serde::{Deserialize, Serialize};

use crate::{MnemoService, Result};

const REBUILD_PAGE_SIZE: i64 = 64;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct RebuildReport {
	pub scanned: u64,
	pub indexed: u64,
	pub failed: u64,
}

impl MnemoService {
	/// Walks every record in the store and re-indexes it.
	///
	/// The index is a rebuildable cache of the record store; this is the
	/// operation that makes it so after data loss or an embedding model
	/// change. Per-record failures are counted, not fatal, so one bad record
	/// cannot stall the rebuild.
	pub async fn rebuild_index(&self) -> Result<RebuildReport> {
		let mut report = RebuildReport::default();
		let mut offset = 0;

		loop {
			let page = self.clients.records.list_page(offset, REBUILD_PAGE_SIZE).await?;

			if page.is_empty() {
				break;
			}

			offset += page.len() as i64;

			for record in &page {
				report.scanned += 1;

				if self.index_record(record).await {
					report.indexed += 1;
				} else {
					report.failed += 1;
				}
			}
		}

		tracing::info!(
			scanned = report.scanned,
			indexed = report.indexed,
			failed = report.failed,
			"Index rebuild finished."
		);

		Ok(report)
	}
}
