//! `[base]` section configuration.
//!
//! Site metadata, printed by `folio check`.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[base]` section in folio.toml.
///
/// # Example
/// ```toml
/// [base]
/// title = "Spring Festival 2025"
/// description = "Works from the spring event"
/// language = "zh-Hans"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    #[serde(default = "defaults::base::title")]
    #[educe(Default = defaults::base::title())]
    pub title: String,

    #[serde(default)]
    pub description: String,

    /// BCP 47 language code (e.g., "zh-Hans", "en-US").
    #[serde(default = "defaults::base::language")]
    #[educe(Default = defaults::base::language())]
    pub language: String,
}
