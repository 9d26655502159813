//! Production adapters binding the client traits to the real backends.

use uuid::Uuid;

use crate::{
	BoxFuture, EmbeddingClient, RecordStoreClient, Result, VectorHit, VectorIndexClient,
};
use mnemo_config::EmbeddingProviderConfig;
use mnemo_domain::{CollectionKind, ContentRecord};
use mnemo_providers::embedding;
use mnemo_storage::{db::Db, qdrant::QdrantStore, records};

pub struct HttpEmbedding {
	cfg: EmbeddingProviderConfig,
}
impl HttpEmbedding {
	pub fn new(cfg: EmbeddingProviderConfig) -> Self {
		Self { cfg }
	}
}
impl EmbeddingClient for HttpEmbedding {
	fn embed<'a>(&'a self, texts: &'a [String]) -> BoxFuture<'a, Result<Vec<Vec<f32>>>> {
		Box::pin(async move { Ok(embedding::embed(&self.cfg, texts).await?) })
	}
}

pub struct QdrantVectorIndex {
	store: QdrantStore,
}
impl QdrantVectorIndex {
	pub fn new(store: QdrantStore) -> Self {
		Self { store }
	}
}
impl VectorIndexClient for QdrantVectorIndex {
	fn upsert<'a>(
		&'a self,
		collection: CollectionKind,
		record_id: Uuid,
		owner_id: Uuid,
		vector: Vec<f32>,
	) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move {
			Ok(self.store.upsert_vector(collection, record_id, owner_id, vector).await?)
		})
	}

	fn search<'a>(
		&'a self,
		collection: CollectionKind,
		vector: &'a [f32],
		limit: u32,
	) -> BoxFuture<'a, Result<Vec<VectorHit>>> {
		Box::pin(async move {
			let hits = self.store.search(collection, vector, limit).await?;

			Ok(hits
				.into_iter()
				.map(|(record_id, score)| VectorHit { record_id, score })
				.collect())
		})
	}

	fn delete<'a>(
		&'a self,
		collection: CollectionKind,
		record_id: Uuid,
	) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move { Ok(self.store.delete_vector(collection, record_id).await?) })
	}
}

pub struct PgRecordStore {
	db: Db,
}
impl PgRecordStore {
	pub fn new(db: Db) -> Self {
		Self { db }
	}
}
impl RecordStoreClient for PgRecordStore {
	fn insert<'a>(&'a self, record: &'a ContentRecord) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move { Ok(records::insert(&self.db.pool, record).await?) })
	}

	fn get_by_ids<'a>(
		&'a self,
		owner_id: Uuid,
		ids: &'a [Uuid],
	) -> BoxFuture<'a, Result<Vec<ContentRecord>>> {
		Box::pin(async move { Ok(records::get_by_ids(&self.db.pool, owner_id, ids).await?) })
	}

	fn delete<'a>(&'a self, record_id: Uuid, owner_id: Uuid) -> BoxFuture<'a, Result<bool>> {
		Box::pin(async move { Ok(records::delete(&self.db.pool, record_id, owner_id).await?) })
	}

	fn list_page<'a>(
		&'a self,
		offset: i64,
		limit: i64,
	) -> BoxFuture<'a, Result<Vec<ContentRecord>>> {
		Box::pin(async move { Ok(records::list_page(&self.db.pool, offset, limit).await?) })
	}
}
