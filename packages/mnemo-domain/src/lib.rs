pub mod gate;
pub mod rank;
pub mod time_serde;

mod collection;
mod record;

pub use collection::{CollectionKind, UnknownCollection};
pub use record::ContentRecord;
