//! Hybrid retrieval service over a Postgres record store and a Qdrant vector
//! index.
//!
//! Postgres is the source of truth for content records; Qdrant holds one
//! collection per [`CollectionKind`] and is treated as a rebuildable cache.
//! Every external collaborator sits behind a client trait so the pipeline can
//! be exercised end to end without network access.

pub mod clients;
pub mod delete;
pub mod ingest;
pub mod rebuild;
pub mod reindex;
pub mod retrieve;

mod error;

pub use error::{Error, Result};

use std::{
	future::Future,
	pin::Pin,
	sync::{
		Arc,
		atomic::{AtomicU64, Ordering},
	},
	time::Duration,
};

use tokio::time;
use uuid::Uuid;

pub use delete::{DeleteRequest, DeleteResponse};
pub use ingest::{IngestRequest, IngestResponse};
pub use rebuild::RebuildReport;
pub use reindex::{ReindexRequest, ReindexResponse};
pub use retrieve::{RetrievalHit, RetrieveRequest, RetrieveResponse};
use mnemo_config::Config;
use mnemo_domain::{CollectionKind, ContentRecord};
use mnemo_storage::{db::Db, qdrant::QdrantStore};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A raw nearest-neighbor match before hydration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VectorHit {
	pub record_id: Uuid,
	pub score: f32,
}

pub trait EmbeddingClient
where
	Self: Send + Sync,
{
	fn embed<'a>(&'a self, texts: &'a [String]) -> BoxFuture<'a, Result<Vec<Vec<f32>>>>;
}

pub trait VectorIndexClient
where
	Self: Send + Sync,
{
	fn upsert<'a>(
		&'a self,
		collection: CollectionKind,
		record_id: Uuid,
		owner_id: Uuid,
		vector: Vec<f32>,
	) -> BoxFuture<'a, Result<()>>;

	fn search<'a>(
		&'a self,
		collection: CollectionKind,
		vector: &'a [f32],
		limit: u32,
	) -> BoxFuture<'a, Result<Vec<VectorHit>>>;

	fn delete<'a>(
		&'a self,
		collection: CollectionKind,
		record_id: Uuid,
	) -> BoxFuture<'a, Result<()>>;
}

pub trait RecordStoreClient
where
	Self: Send + Sync,
{
	fn insert<'a>(&'a self, record: &'a ContentRecord) -> BoxFuture<'a, Result<()>>;

	fn get_by_ids<'a>(
		&'a self,
		owner_id: Uuid,
		ids: &'a [Uuid],
	) -> BoxFuture<'a, Result<Vec<ContentRecord>>>;

	fn delete<'a>(&'a self, record_id: Uuid, owner_id: Uuid) -> BoxFuture<'a, Result<bool>>;

	fn list_page<'a>(&'a self, offset: i64, limit: i64)
	-> BoxFuture<'a, Result<Vec<ContentRecord>>>;
}

#[derive(Clone)]
pub struct Clients {
	pub embedding: Arc<dyn EmbeddingClient>,
	pub index: Arc<dyn VectorIndexClient>,
	pub records: Arc<dyn RecordStoreClient>,
}
impl Clients {
	pub fn new(
		embedding: Arc<dyn EmbeddingClient>,
		index: Arc<dyn VectorIndexClient>,
		records: Arc<dyn RecordStoreClient>,
	) -> Self {
		Self { embedding, index, records }
	}
}

pub struct MnemoService {
	pub cfg: Config,
	pub clients: Clients,
	stale_drops: AtomicU64,
}
impl MnemoService {
	pub fn new(cfg: Config, db: Db, qdrant: QdrantStore) -> Self {
		let clients = Clients {
			embedding: Arc::new(clients::HttpEmbedding::new(cfg.providers.embedding.clone())),
			index: Arc::new(clients::QdrantVectorIndex::new(qdrant)),
			records: Arc::new(clients::PgRecordStore::new(db)),
		};

		Self::with_clients(cfg, clients)
	}

	pub fn with_clients(cfg: Config, clients: Clients) -> Self {
		Self { cfg, clients, stale_drops: AtomicU64::new(0) }
	}

	/// Total hits dropped so far because the index pointed at records the
	/// store no longer has.
	pub fn stale_drop_count(&self) -> u64 {
		self.stale_drops.load(Ordering::Relaxed)
	}

	pub(crate) fn note_stale_drops(&self, count: u64) {
		self.stale_drops.fetch_add(count, Ordering::Relaxed);
	}

	/// Embeds a single text, enforcing the provider timeout and the
	/// configured vector dimension.
	pub(crate) async fn embed_one(&self, text: &str) -> Result<Vec<f32>> {
		let timeout = Duration::from_millis(self.cfg.providers.embedding.timeout_ms);
		let texts = [text.to_string()];
		let embeddings = time::timeout(timeout, self.clients.embedding.embed(&texts))
			.await
			.map_err(|_| Error::Provider { message: "Embedding request timed out.".to_string() })??;
		let Some(vector) = embeddings.into_iter().next() else {
			return Err(Error::Provider {
				message: "Embedding provider returned no vectors.".to_string(),
			});
		};

		if vector.len() != self.cfg.storage.qdrant.vector_dim as usize {
			return Err(Error::Provider {
				message: format!(
					"Embedding vector has {} dimensions, expected {}.",
					vector.len(),
					self.cfg.storage.qdrant.vector_dim
				),
			});
		}

		Ok(vector)
	}

	/// Loads one record, treating anything the owner cannot see as missing.
	pub(crate) async fn fetch_owned(
		&self,
		owner_id: Uuid,
		record_id: Uuid,
	) -> Result<ContentRecord> {
		let records = self.clients.records.get_by_ids(owner_id, &[record_id]).await?;

		records
			.into_iter()
			.next()
			.ok_or_else(|| Error::NotFound { message: format!("Record {record_id} not found.") })
	}
}
