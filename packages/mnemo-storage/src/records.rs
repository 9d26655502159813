use sqlx::PgPool;
use uuid::Uuid;

use crate::{Result, models::ContentRow};
use mnemo_domain::ContentRecord;

/// Inserts the record, replacing any previous row with the same id so a
/// caller retrying a failed ingest with its pre-generated id stays
/// idempotent.
pub async fn insert(pool: &PgPool, record: &ContentRecord) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO content_records (record_id, owner_id, title, body, source_url, collection, created_at)
VALUES ($1, $2, $3, $4, $5, $6, $7)
ON CONFLICT (record_id) DO UPDATE
SET
	title = EXCLUDED.title,
	body = EXCLUDED.body,
	source_url = EXCLUDED.source_url",
	)
	.bind(record.record_id)
	.bind(record.owner_id)
	.bind(record.title.as_str())
	.bind(record.body.as_str())
	.bind(record.source_url.as_deref())
	.bind(record.collection.as_str())
	.bind(record.created_at)
	.execute(pool)
	.await?;

	Ok(())
}

/// Batch point lookup scoped to one owner. Row order is not guaranteed;
/// callers re-key by id.
pub async fn get_by_ids(pool: &PgPool, owner_id: Uuid, ids: &[Uuid]) -> Result<Vec<ContentRecord>> {
	if ids.is_empty() {
		return Ok(Vec::new());
	}

	let rows: Vec<ContentRow> =
		sqlx::query_as("SELECT * FROM content_records WHERE record_id = ANY($1) AND owner_id = $2")
			.bind(ids)
			.bind(owner_id)
			.fetch_all(pool)
			.await?;

	rows.into_iter().map(ContentRecord::try_from).collect()
}

pub async fn delete(pool: &PgPool, record_id: Uuid, owner_id: Uuid) -> Result<bool> {
	let result = sqlx::query("DELETE FROM content_records WHERE record_id = $1 AND owner_id = $2")
		.bind(record_id)
		.bind(owner_id)
		.execute(pool)
		.await?;

	Ok(result.rows_affected() > 0)
}

/// Stable page over every record, oldest first. Used by the index rebuild
/// sweep.
pub async fn list_page(pool: &PgPool, offset: i64, limit: i64) -> Result<Vec<ContentRecord>> {
	let rows: Vec<ContentRow> = sqlx::query_as(
		"SELECT * FROM content_records ORDER BY created_at, record_id OFFSET $1 LIMIT $2",
	)
	.bind(offset)
	.bind(limit)
	.fetch_all(pool)
	.await?;

	rows.into_iter().map(ContentRecord::try_from).collect()
}
