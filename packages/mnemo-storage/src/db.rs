use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::Result;

const SCHEMA_LOCK_ID: i64 = 6_220_913;

pub struct Db {
	pub pool: PgPool,
}
impl Db {
	pub async fn connect(cfg: &mnemo_config::Postgres) -> Result<Self> {
		let pool =
			PgPoolOptions::new().max_connections(cfg.pool_max_conns).connect(&cfg.dsn).await?;

		Ok(Self { pool })
	}

	/// Applies the schema idempotently. The advisory lock is transaction
	/// scoped so concurrent bootstraps serialize on one connection and the
	/// lock releases when the transaction ends.
	pub async fn ensure_schema(&self) -> Result<()> {
		let mut tx = self.pool.begin().await?;

		sqlx::query("SELECT pg_advisory_xact_lock($1)")
			.bind(SCHEMA_LOCK_ID)
			.execute(&mut *tx)
			.await?;

		for statement in include_str!("../sql/init.sql").split(';') {
			let trimmed = statement.trim();

			if trimmed.is_empty() {
				continue;
			}

			sqlx::query(trimmed).execute(&mut *tx).await?;
		}

		tx.commit().await?;

		Ok(())
	}
}
