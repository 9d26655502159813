use std::{
	collections::{HashMap, HashSet},
	time::Duration,
};

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tokio::time;
use uuid::Uuid;

use crate::{Error, MnemoService, Result, VectorHit};
use mnemo_domain::{
	CollectionKind, ContentRecord,
	rank::{self, HitKey},
};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RetrieveRequest {
	pub owner_id: Uuid,
	pub query: String,
	/// `None` searches every collection. An explicit empty list is rejected.
	pub collections: Option<Vec<CollectionKind>>,
	/// `None` falls back to the configured default.
	pub limit: Option<u32>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RetrievalHit {
	pub record: ContentRecord,
	pub score: f32,
	/// The collection whose search produced this hit.
	pub collection: CollectionKind,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RetrieveResponse {
	pub hits: Vec<RetrievalHit>,
}

impl MnemoService {
	/// Semantic retrieval across collections.
	///
	/// The query is embedded exactly once. Collections are searched
	/// concurrently, each under its own timeout; a collection that fails or
	/// times out contributes nothing rather than failing the request. All
	/// surviving candidates are hydrated from the record store in a single
	/// owner-scoped batch, then merged into one list ordered by score. Index
	/// hits with no backing record are dropped silently, which lets
	/// lower-ranked candidates from the over-fetched pool back-fill the page.
	pub async fn retrieve(&self, req: RetrieveRequest) -> Result<RetrieveResponse> {
		if req.owner_id.is_nil() {
			return Err(Error::InvalidRequest { message: "owner_id is required.".to_string() });
		}

		let query = req.query.trim();

		if query.is_empty() {
			return Err(Error::InvalidRequest { message: "query must not be empty.".to_string() });
		}

		let limit = req.limit.unwrap_or(self.cfg.retrieval.default_limit);

		if limit == 0 {
			return Err(Error::InvalidRequest { message: "limit must be positive.".to_string() });
		}
		if limit > self.cfg.retrieval.max_limit {
			return Err(Error::InvalidRequest {
				message: format!("limit exceeds the maximum of {}.", self.cfg.retrieval.max_limit),
			});
		}

		let collections = resolve_collections(req.collections)?;
		let vector = self.embed_one(query).await?;
		let search_timeout = Duration::from_millis(self.cfg.retrieval.search_timeout_ms);
		let searches = collections
			.iter()
			.map(|collection| self.search_collection(*collection, &vector, limit, search_timeout));
		let candidates: Vec<(CollectionKind, VectorHit)> =
			join_all(searches).await.into_iter().flatten().collect();

		if candidates.is_empty() {
			return Ok(RetrieveResponse { hits: Vec::new() });
		}

		let hydrated = self.hydrate(req.owner_id, &candidates).await?;
		let mut missing = HashSet::new();

		for (_, hit) in &candidates {
			if !hydrated.contains_key(&hit.record_id) {
				missing.insert(hit.record_id);
			}
		}
		if !missing.is_empty() {
			tracing::warn!(
				count = missing.len(),
				"Dropped index hits with no backing record; the index is stale."
			);
			self.note_stale_drops(missing.len() as u64);
		}

		let mut hits: Vec<RetrievalHit> = candidates
			.into_iter()
			.filter_map(|(collection, hit)| {
				hydrated
					.get(&hit.record_id)
					// The batch query is owner scoped; re-check anyway.
					.filter(|record| record.owner_id == req.owner_id)
					.map(|record| RetrievalHit {
						record: record.clone(),
						score: hit.score,
						collection,
					})
			})
			.collect();

		hits.sort_by(|lhs, rhs| rank::hit_ordering(&hit_key(lhs), &hit_key(rhs)));

		let mut seen = HashSet::new();

		hits.retain(|hit| seen.insert(hit.record.record_id));
		hits.truncate(limit as usize);

		Ok(RetrieveResponse { hits })
	}

	/// One collection's top-k search, hits annotated with their origin.
	/// Failures and timeouts degrade to zero hits so the remaining
	/// collections still answer.
	async fn search_collection(
		&self,
		collection: CollectionKind,
		vector: &[f32],
		limit: u32,
		timeout: Duration,
	) -> Vec<(CollectionKind, VectorHit)> {
		let hits = match time::timeout(
			timeout,
			self.clients.index.search(collection, vector, limit),
		)
		.await
		{
			Ok(Ok(hits)) => hits,
			Ok(Err(err)) => {
				tracing::warn!(%collection, "Vector search failed, collection skipped: {err}");

				Vec::new()
			},
			Err(_) => {
				tracing::warn!(%collection, "Vector search timed out, collection skipped.");

				Vec::new()
			},
		};

		hits.into_iter().map(|hit| (collection, hit)).collect()
	}

	/// Single batch fetch of every candidate the fan-out produced. A slow or
	/// failing record store is fatal here; without hydration there is nothing
	/// to return.
	async fn hydrate(
		&self,
		owner_id: Uuid,
		candidates: &[(CollectionKind, VectorHit)],
	) -> Result<HashMap<Uuid, ContentRecord>> {
		let ids: Vec<Uuid> = {
			let mut seen = HashSet::new();

			candidates.iter().map(|(_, hit)| hit.record_id).filter(|id| seen.insert(*id)).collect()
		};
		let timeout = Duration::from_millis(self.cfg.retrieval.hydrate_timeout_ms);
		let records =
			time::timeout(timeout, self.clients.records.get_by_ids(owner_id, &ids))
				.await
				.map_err(|_| Error::Storage {
					message: "Record hydration timed out.".to_string(),
				})??;

		Ok(records.into_iter().map(|record| (record.record_id, record)).collect())
	}
}

fn hit_key(hit: &RetrievalHit) -> HitKey {
	HitKey {
		score: hit.score,
		created_at: hit.record.created_at,
		record_id: hit.record.record_id,
	}
}

fn resolve_collections(collections: Option<Vec<CollectionKind>>) -> Result<Vec<CollectionKind>> {
	let Some(requested) = collections else {
		return Ok(CollectionKind::ALL.to_vec());
	};

	if requested.is_empty() {
		return Err(Error::InvalidRequest {
			message: "collections must name at least one collection.".to_string(),
		});
	}

	let mut seen = HashSet::new();

	Ok(requested.into_iter().filter(|kind| seen.insert(*kind)).collect())
}
