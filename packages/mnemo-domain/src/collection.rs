use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// The vector collection a record's embedding lives in. A record belongs to
/// exactly one collection for its lifetime.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionKind {
	ContextNote,
	JournalEntry,
	Goal,
}
impl CollectionKind {
	pub const ALL: [Self; 3] = [Self::ContextNote, Self::JournalEntry, Self::Goal];

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::ContextNote => "context_note",
			Self::JournalEntry => "journal_entry",
			Self::Goal => "goal",
		}
	}
}
impl fmt::Display for CollectionKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
impl FromStr for CollectionKind {
	type Err = UnknownCollection;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"context_note" => Ok(Self::ContextNote),
			"journal_entry" => Ok(Self::JournalEntry),
			"goal" => Ok(Self::Goal),
			_ => Err(UnknownCollection { value: s.to_string() }),
		}
	}
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown collection: {value:?}.")]
pub struct UnknownCollection {
	pub value: String,
}
