use std::sync::atomic::Ordering;

use time::macros::datetime;
use uuid::Uuid;

use mnemo_domain::CollectionKind;
use mnemo_service::RetrieveRequest;

use super::{harness, plant, stored_record};

#[tokio::test]
async fn retrieve_embeds_the_query_exactly_once() {
	let h = harness();
	let owner = Uuid::new_v4();

	for collection in CollectionKind::ALL {
		plant(
			&h,
			&stored_record(owner, collection, "Cat note", "A cat.", datetime!(2026-01-01 00:00 UTC)),
		);
	}

	let response = h
		.service
		.retrieve(RetrieveRequest {
			owner_id: owner,
			query: "cat".to_string(),
			collections: None,
			limit: None,
		})
		.await
		.expect("Retrieve failed.");

	assert!(!response.hits.is_empty());
	assert_eq!(h.embedding.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn retrieve_hydrates_in_a_single_batch() {
	let h = harness();
	let owner = Uuid::new_v4();

	for collection in CollectionKind::ALL {
		plant(
			&h,
			&stored_record(owner, collection, "Cat note", "A cat.", datetime!(2026-01-01 00:00 UTC)),
		);
	}

	let response = h
		.service
		.retrieve(RetrieveRequest {
			owner_id: owner,
			query: "cat".to_string(),
			collections: None,
			limit: None,
		})
		.await
		.expect("Retrieve failed.");

	assert_eq!(response.hits.len(), 3);
	assert_eq!(h.records.hydrate_calls.load(Ordering::SeqCst), 1);
}
