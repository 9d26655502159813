use std::{sync::atomic::Ordering, time::Duration};

use time::macros::datetime;
use uuid::Uuid;

use mnemo_domain::CollectionKind;
use mnemo_service::{Error, RetrieveRequest};

use super::{harness, plant, stored_record};

fn retrieve_request(owner_id: Uuid) -> RetrieveRequest {
	RetrieveRequest { owner_id, query: "cat".to_string(), collections: None, limit: None }
}

#[tokio::test]
async fn timed_out_collection_contributes_nothing() {
	let h = harness();
	let owner = Uuid::new_v4();
	let fast = stored_record(
		owner,
		CollectionKind::ContextNote,
		"Cat",
		"A cat.",
		datetime!(2026-01-01 00:00 UTC),
	);
	let slow = stored_record(
		owner,
		CollectionKind::JournalEntry,
		"Cat",
		"A cat.",
		datetime!(2026-01-01 00:00 UTC),
	);

	plant(&h, &fast);
	plant(&h, &slow);

	// Well past the 50ms search budget.
	h.index.delay_search(CollectionKind::JournalEntry, Duration::from_millis(300));

	let response = h.service.retrieve(retrieve_request(owner)).await.expect("Retrieve failed.");

	assert_eq!(response.hits.len(), 1);
	assert_eq!(response.hits[0].record.record_id, fast.record_id);
}

#[tokio::test]
async fn failing_collection_is_skipped() {
	let h = harness();
	let owner = Uuid::new_v4();
	let healthy = stored_record(
		owner,
		CollectionKind::ContextNote,
		"Cat",
		"A cat.",
		datetime!(2026-01-01 00:00 UTC),
	);
	let broken =
		stored_record(owner, CollectionKind::Goal, "Cat", "A cat.", datetime!(2026-01-01 00:00 UTC));

	plant(&h, &healthy);
	plant(&h, &broken);
	h.index.fail_searches_on(CollectionKind::Goal);

	let response = h.service.retrieve(retrieve_request(owner)).await.expect("Retrieve failed.");

	assert_eq!(response.hits.len(), 1);
	assert_eq!(response.hits[0].record.record_id, healthy.record_id);
}

#[tokio::test]
async fn all_collections_failing_yields_an_empty_page() {
	let h = harness();
	let owner = Uuid::new_v4();

	for collection in CollectionKind::ALL {
		plant(
			&h,
			&stored_record(owner, collection, "Cat", "A cat.", datetime!(2026-01-01 00:00 UTC)),
		);
		h.index.fail_searches_on(collection);
	}

	let response = h.service.retrieve(retrieve_request(owner)).await.expect("Retrieve failed.");

	assert!(response.hits.is_empty());
}

#[tokio::test]
async fn hydration_failure_is_fatal() {
	let h = harness();
	let owner = Uuid::new_v4();

	plant(
		&h,
		&stored_record(
			owner,
			CollectionKind::ContextNote,
			"Cat",
			"A cat.",
			datetime!(2026-01-01 00:00 UTC),
		),
	);
	h.records.fail_hydrates.store(1, Ordering::SeqCst);

	assert!(matches!(
		h.service.retrieve(retrieve_request(owner)).await,
		Err(Error::Storage { .. })
	));
}

#[tokio::test]
async fn hydration_timeout_is_fatal() {
	let h = harness();
	let owner = Uuid::new_v4();

	plant(
		&h,
		&stored_record(
			owner,
			CollectionKind::ContextNote,
			"Cat",
			"A cat.",
			datetime!(2026-01-01 00:00 UTC),
		),
	);
	// Well past the 200ms hydration budget.
	*h.records.hydrate_delay.lock().unwrap() = Some(Duration::from_millis(500));

	assert!(matches!(
		h.service.retrieve(retrieve_request(owner)).await,
		Err(Error::Storage { .. })
	));
}

#[tokio::test]
async fn slow_embedding_is_a_provider_error() {
	let h = harness();

	// Well past the 100ms provider budget.
	*h.embedding.delay.lock().unwrap() = Some(Duration::from_millis(400));

	assert!(matches!(
		h.service.retrieve(retrieve_request(Uuid::new_v4())).await,
		Err(Error::Provider { .. })
	));
}

#[tokio::test]
async fn failed_query_embedding_is_a_provider_error() {
	let h = harness();

	h.embedding.fail_next.store(1, Ordering::SeqCst);

	assert!(matches!(
		h.service.retrieve(retrieve_request(Uuid::new_v4())).await,
		Err(Error::Provider { .. })
	));
}
