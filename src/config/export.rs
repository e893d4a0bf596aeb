//! `[export]` section configuration.

use super::defaults;
use crate::data::files::WriteOptions;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[export]` section in folio.toml - data files for the front-end.
///
/// # Example
/// ```toml
/// [export]
/// output = "public"   # site output directory
/// dir = "_data"       # data directory inside `output`
/// pretty = false
/// per_entry = true    # write creator/<id>.json and work/<id>.json
/// clean = false       # remove the data directory before writing
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct ExportConfig {
    #[serde(default = "defaults::export::output")]
    #[educe(Default = defaults::export::output())]
    pub output: PathBuf,

    #[serde(default = "defaults::export::dir")]
    #[educe(Default = defaults::export::dir())]
    pub dir: PathBuf,

    #[serde(default)]
    pub pretty: bool,

    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub per_entry: bool,

    #[serde(default)]
    pub clean: bool,
}

impl ExportConfig {
    /// Full path of the data directory.
    pub fn data_dir(&self) -> PathBuf {
        self.output.join(&self.dir)
    }

    pub const fn write_options(&self) -> WriteOptions {
        WriteOptions {
            pretty: self.pretty,
            per_entry: self.per_entry,
        }
    }
}
