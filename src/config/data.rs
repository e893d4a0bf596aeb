//! `[data]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[data]` section in folio.toml - where the works dataset lives.
///
/// # Example
/// ```toml
/// [data]
/// works = "src/data/works.json"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct DataConfig {
    /// Works file, relative to the site root.
    #[serde(default = "defaults::data::works")]
    #[educe(Default = defaults::data::works())]
    pub works: PathBuf,
}
