use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
	pub storage: Storage,
	pub providers: Providers,
	pub ingest: Ingest,
	pub retrieval: Retrieval,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
	pub qdrant: Qdrant,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Qdrant {
	pub url: String,
	/// Collections are named `{collection_prefix}_{kind}`, one per content
	/// category.
	pub collection_prefix: String,
	pub vector_dim: u32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Providers {
	pub embedding: EmbeddingProviderConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct EmbeddingProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub dimensions: u32,
	pub timeout_ms: u64,
	pub default_headers: Map<String, Value>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Ingest {
	pub max_title_chars: u32,
	pub max_body_chars: u32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Retrieval {
	/// Result cap applied when the caller does not pass one.
	pub default_limit: u32,
	pub max_limit: u32,
	pub search_timeout_ms: u64,
	pub hydrate_timeout_ms: u64,
}
