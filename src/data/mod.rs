//! Site data index.
//!
//! Loads `works.json`, derives the deduplicated creator list and answers
//! lookups by id. Everything is read-only once built.
//!
//! ```text
//! works.json ──► loader ──► SiteIndex ──┬──► query / check
//!                                      └──► files (public/_data/*.json)
//! ```

pub mod files;
mod index;
pub mod loader;
mod types;

pub use index::SiteIndex;
pub use loader::{load_index, parse_works};
#[allow(unused_imports)]
pub use loader::LoadError;
#[allow(unused_imports)]
pub use types::{Creator, CreatorField, Divergence, IndexReport, TimelineDay, Work, WorkType};
