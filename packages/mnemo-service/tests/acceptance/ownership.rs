use time::macros::datetime;
use uuid::Uuid;

use mnemo_domain::CollectionKind;
use mnemo_service::{DeleteRequest, Error, ReindexRequest, RetrieveRequest};

use super::{harness, plant, stored_record};

fn retrieve_request(owner_id: Uuid) -> RetrieveRequest {
	RetrieveRequest { owner_id, query: "cat".to_string(), collections: None, limit: None }
}

#[tokio::test]
async fn retrieval_never_crosses_owners() {
	let h = harness();
	let alice = Uuid::new_v4();
	let bob = Uuid::new_v4();

	plant(
		&h,
		&stored_record(
			alice,
			CollectionKind::ContextNote,
			"Cat",
			"A cat.",
			datetime!(2026-01-01 00:00 UTC),
		),
	);

	let response = h.service.retrieve(retrieve_request(bob)).await.expect("Retrieve failed.");

	assert!(response.hits.is_empty());
}

#[tokio::test]
async fn hydration_filters_out_foreign_hits() {
	let h = harness();
	let alice = Uuid::new_v4();
	let bob = Uuid::new_v4();
	let alice_record = stored_record(
		alice,
		CollectionKind::ContextNote,
		"Cat",
		"A cat.",
		datetime!(2026-01-01 00:00 UTC),
	);
	let bob_record = stored_record(
		bob,
		CollectionKind::ContextNote,
		"Cat",
		"A cat.",
		datetime!(2026-01-01 00:00 UTC),
	);

	plant(&h, &alice_record);
	plant(&h, &bob_record);

	let response = h.service.retrieve(retrieve_request(alice)).await.expect("Retrieve failed.");

	assert_eq!(response.hits.len(), 1);
	assert_eq!(response.hits[0].record.record_id, alice_record.record_id);
}

#[tokio::test]
async fn delete_requires_ownership() {
	let h = harness();
	let alice = Uuid::new_v4();
	let bob = Uuid::new_v4();
	let record = stored_record(
		alice,
		CollectionKind::Goal,
		"Cat",
		"A cat.",
		datetime!(2026-01-01 00:00 UTC),
	);

	plant(&h, &record);

	let result = h
		.service
		.delete(DeleteRequest { owner_id: bob, record_id: record.record_id })
		.await;

	assert!(matches!(result, Err(Error::NotFound { .. })));
	assert!(h.records.get(record.record_id).is_some());
	assert!(h.index.contains(CollectionKind::Goal, record.record_id));
}

#[tokio::test]
async fn reindex_requires_ownership() {
	let h = harness();
	let alice = Uuid::new_v4();
	let bob = Uuid::new_v4();
	let record = stored_record(
		alice,
		CollectionKind::JournalEntry,
		"Cat",
		"A cat.",
		datetime!(2026-01-01 00:00 UTC),
	);

	plant(&h, &record);

	let result = h
		.service
		.reindex(ReindexRequest { owner_id: bob, record_id: record.record_id })
		.await;

	assert!(matches!(result, Err(Error::NotFound { .. })));
}
