mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, EmbeddingProviderConfig, Ingest, Postgres, Providers, Qdrant, Retrieval, Storage,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;
	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);
	validate(&cfg)?;

	Ok(cfg)
}

/// Strips incidental whitespace so downstream comparisons and URL joins see
/// the intended values.
pub fn normalize(cfg: &mut Config) {
	for value in [
		&mut cfg.storage.postgres.dsn,
		&mut cfg.storage.qdrant.url,
		&mut cfg.storage.qdrant.collection_prefix,
		&mut cfg.providers.embedding.provider_id,
		&mut cfg.providers.embedding.api_base,
		&mut cfg.providers.embedding.api_key,
		&mut cfg.providers.embedding.path,
		&mut cfg.providers.embedding.model,
	] {
		let trimmed = value.trim().to_string();

		if trimmed.len() != value.len() {
			*value = trimmed;
		}
	}
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.storage.qdrant.url.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.qdrant.url must be non-empty.".to_string(),
		});
	}
	if cfg.storage.qdrant.collection_prefix.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.qdrant.collection_prefix must be non-empty.".to_string(),
		});
	}
	if cfg.storage.qdrant.vector_dim == 0 {
		return Err(Error::Validation {
			message: "storage.qdrant.vector_dim must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.embedding.dimensions != cfg.storage.qdrant.vector_dim {
		return Err(Error::Validation {
			message: "providers.embedding.dimensions must match storage.qdrant.vector_dim."
				.to_string(),
		});
	}
	if cfg.providers.embedding.api_key.trim().is_empty() {
		return Err(Error::Validation {
			message: "providers.embedding.api_key must be non-empty.".to_string(),
		});
	}
	if cfg.providers.embedding.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "providers.embedding.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.ingest.max_title_chars == 0 || cfg.ingest.max_body_chars == 0 {
		return Err(Error::Validation {
			message: "ingest.max_title_chars and ingest.max_body_chars must be greater than zero."
				.to_string(),
		});
	}
	if cfg.retrieval.default_limit == 0 {
		return Err(Error::Validation {
			message: "retrieval.default_limit must be greater than zero.".to_string(),
		});
	}
	if cfg.retrieval.default_limit > cfg.retrieval.max_limit {
		return Err(Error::Validation {
			message: "retrieval.default_limit must not exceed retrieval.max_limit.".to_string(),
		});
	}
	if cfg.retrieval.search_timeout_ms == 0 || cfg.retrieval.hydrate_timeout_ms == 0 {
		return Err(Error::Validation {
			message: "retrieval timeouts must be greater than zero.".to_string(),
		});
	}

	Ok(())
}
