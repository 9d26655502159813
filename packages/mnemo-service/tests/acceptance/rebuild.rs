use std::sync::atomic::Ordering;

use time::macros::datetime;
use uuid::Uuid;

use mnemo_domain::CollectionKind;
use mnemo_service::RetrieveRequest;

use super::{harness, ingest_request, stored_record};

#[tokio::test]
async fn rebuild_restores_a_lost_index() {
	let h = harness();
	let owner = Uuid::new_v4();

	for collection in CollectionKind::ALL {
		h.service
			.ingest(ingest_request(owner, collection, "Cat", "A cat."))
			.await
			.expect("Ingest failed.");
	}

	h.index.clear();

	let request = RetrieveRequest {
		owner_id: owner,
		query: "cat".to_string(),
		collections: None,
		limit: None,
	};
	let before = h.service.retrieve(request.clone()).await.expect("Retrieve failed.");

	assert!(before.hits.is_empty());

	let report = h.service.rebuild_index().await.expect("Rebuild failed.");

	assert_eq!(report.scanned, 3);
	assert_eq!(report.indexed, 3);
	assert_eq!(report.failed, 0);

	let after = h.service.retrieve(request).await.expect("Retrieve failed.");

	assert_eq!(after.hits.len(), 3);
}

#[tokio::test]
async fn rebuild_counts_per_record_failures() {
	let h = harness();
	let owner = Uuid::new_v4();

	for collection in [CollectionKind::ContextNote, CollectionKind::Goal] {
		h.service
			.ingest(ingest_request(owner, collection, "Cat", "A cat."))
			.await
			.expect("Ingest failed.");
	}

	h.index.clear();
	h.index.fail_upserts.store(1, Ordering::SeqCst);

	let report = h.service.rebuild_index().await.expect("Rebuild failed.");

	assert_eq!(report.scanned, 2);
	assert_eq!(report.indexed, 1);
	assert_eq!(report.failed, 1);
}

#[tokio::test]
async fn rebuild_pages_through_every_record() {
	let h = harness();
	let owner = Uuid::new_v4();

	// More records than one 64-row page.
	for index in 0..70_u128 {
		let mut record = stored_record(
			owner,
			CollectionKind::ContextNote,
			"Cat",
			"A cat.",
			datetime!(2026-01-01 00:00 UTC),
		);

		record.record_id = Uuid::from_u128(index + 1);

		h.records.put(record);
	}

	let report = h.service.rebuild_index().await.expect("Rebuild failed.");

	assert_eq!(report.scanned, 70);
	assert_eq!(report.indexed, 70);
}
