//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from reading or checking `folio.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid folio.toml")]
    Toml(#[from] toml::de::Error),

    #[error("[data.works] not found: {}", .0.display())]
    WorksMissing(PathBuf),

    #[error("[data.works] is not a file: {}", .0.display())]
    WorksNotFile(PathBuf),

    #[error("[export.dir] `{}` must be a non-empty relative path inside [export.output]", .0.display())]
    ExportDir(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_config_error_display() {
        let io_err = ConfigError::Io(
            PathBuf::from("folio.toml"),
            Error::new(ErrorKind::PermissionDenied, "denied"),
        );
        let display = format!("{io_err}");
        assert!(display.contains("IO error"));
        assert!(display.contains("folio.toml"));

        let missing = ConfigError::WorksMissing(PathBuf::from("data/works.json"));
        assert_eq!(missing.to_string(), "[data.works] not found: data/works.json");

        let dir = ConfigError::ExportDir(PathBuf::from("../_data"));
        assert!(dir.to_string().starts_with("[export.dir] `../_data`"));
    }

    #[test]
    fn test_toml_error_converts() {
        let err: ConfigError = toml::from_str::<toml::Value>("[broken").unwrap_err().into();
        assert!(matches!(err, ConfigError::Toml(_)));
    }
}
