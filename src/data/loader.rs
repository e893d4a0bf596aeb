//! Reading `works.json` from disk.

use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

use super::{index::SiteIndex, types::Work};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("`{0}` is not a JSON array of works")]
    Json(PathBuf, #[source] serde_json::Error),
}

/// Parse a serialized array of works.
pub fn parse_works(content: &str) -> serde_json::Result<Vec<Work>> {
    // Editors on Windows like to prepend a BOM
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    serde_json::from_str(content)
}

pub fn load_works(path: &Path) -> Result<Vec<Work>, LoadError> {
    let content =
        fs::read_to_string(path).map_err(|err| LoadError::Io(path.to_path_buf(), err))?;
    parse_works(&content).map_err(|err| LoadError::Json(path.to_path_buf(), err))
}

/// Load the works file and build the index over it.
pub fn load_index(path: &Path) -> Result<SiteIndex, LoadError> {
    load_works(path).map(SiteIndex::new)
}
