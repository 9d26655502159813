use std::cmp::Ordering;

use time::OffsetDateTime;
use uuid::Uuid;

/// Sort key of a merged retrieval hit.
#[derive(Clone, Copy, Debug)]
pub struct HitKey {
	pub score: f32,
	pub created_at: OffsetDateTime,
	pub record_id: Uuid,
}

/// Global ranking rule: score descending, ties broken by the most recent
/// record first, then by id so equal rows order deterministically.
pub fn hit_ordering(lhs: &HitKey, rhs: &HitKey) -> Ordering {
	rhs.score
		.total_cmp(&lhs.score)
		.then_with(|| rhs.created_at.cmp(&lhs.created_at))
		.then_with(|| lhs.record_id.cmp(&rhs.record_id))
}
