//! Content module - entries, sources, and the list/detail loaders

mod entry;
mod error;
pub mod loader;
mod normalize;
pub mod source;

pub use entry::{Collection, ContentEntry, EXCERPT_LENGTH};
pub use error::LoadError;
pub use loader::ContentLoader;
pub use normalize::{find_entry, normalize_entries, parse_resource, sort_by_recency, EntryMap};
pub use source::{ContentSource, DirSource, Fetched, HttpSource};
