//! Site configuration management for `folio.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                      |
//! |-------------|----------------------------------------------|
//! | `[base]`    | Site metadata (title, description, language) |
//! | `[data]`    | Location of the works dataset                |
//! | `[export]`  | Data files written for the front-end         |
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "Spring Festival 2025"
//!
//! [data]
//! works = "src/data/works.json"
//!
//! [export]
//! output = "public"
//! pretty = true
//! ```
//!
//! The file is optional; every field has a default.

mod base;
mod data;
pub mod defaults;
mod error;
mod export;

use base::BaseConfig;
use data::DataConfig;
use export::ExportConfig;

pub use error::ConfigError;

use crate::cli::{Cli, Commands};
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Component, Path, PathBuf},
};

/// Root configuration structure representing folio.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Site root directory (set from the CLI)
    #[serde(skip)]
    pub root: PathBuf,

    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Basic site information
    #[serde(default)]
    pub base: BaseConfig,

    /// Works dataset location
    #[serde(default)]
    pub data: DataConfig,

    /// Data export settings
    #[serde(default)]
    pub export: ExportConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Load `<root>/<cli.config>` if present, defaults otherwise, then apply CLI overrides.
    pub fn load(cli: &Cli) -> Result<Self> {
        let root = cli.root.as_deref().unwrap_or(Path::new("./"));
        let config_path = root.join(&cli.config);

        let mut config = if config_path.is_file() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };
        config.update_with_cli(cli);
        Ok(config)
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        Self::update_option(&mut self.data.works, cli.works.as_ref());

        if let Commands::Export {
            output,
            pretty,
            clean,
        } = &cli.command
        {
            Self::update_option(&mut self.export.output, output.as_ref());
            Self::update_option(&mut self.export.pretty, pretty.as_ref());
            self.export.clean |= *clean;
        }

        let root = Self::normalize_path(cli.root.as_deref().unwrap_or(Path::new("./")));
        self.config_path = Self::normalize_path(&root.join(&cli.config));
        self.data.works = Self::normalize_path(&root.join(&self.data.works));
        self.export.output = Self::normalize_path(&root.join(&self.export.output));
        self.root = root;
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration before the works are loaded
    pub fn validate(&self) -> Result<()> {
        let works = &self.data.works;
        if !works.exists() {
            bail!(ConfigError::WorksMissing(works.clone()));
        }
        if !works.is_file() {
            bail!(ConfigError::WorksNotFile(works.clone()));
        }

        let dir = &self.export.dir;
        let inside_output = dir
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if dir.as_os_str().is_empty() || !inside_output {
            bail!(ConfigError::ExportDir(dir.clone()));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
