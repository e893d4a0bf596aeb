//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Folio gallery data CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Site root directory (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name, relative to root (default: folio.toml)
    #[arg(short = 'C', long, default_value = "folio.toml")]
    pub config: PathBuf,

    /// Works file, relative to root. Overrides `[data.works]`
    #[arg(short, long)]
    pub works: Option<PathBuf>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Load the works, build the index and report data problems
    Check {
        /// Exit with an error if any problem is found
        #[arg(long)]
        strict: bool,
    },

    /// List creators in first-appearance order
    Creators {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List works, optionally filtered
    Works {
        /// Only works of this type (text, visual, video, other, illust, comic, music)
        #[arg(short = 't', long = "type")]
        work_type: Option<String>,

        /// Only works attributed to this creator id
        #[arg(long)]
        creator: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show one creator and its works as JSON
    Creator {
        /// Creator id (exact match)
        id: String,
    },

    /// Show one work as JSON
    Work {
        /// Work id (exact match)
        id: String,
    },

    /// Show works grouped by day offset
    Timeline {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Write the JSON data files read by the gallery pages
    Export {
        /// Output directory path (relative to root)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON files
        #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        pretty: Option<bool>,

        /// Remove the data directory before writing
        #[arg(long)]
        clean: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_export() {
        let cli = Cli::parse_from(["folio", "-r", "site", "export", "-o", "dist", "--pretty"]);

        assert_eq!(cli.root, Some(PathBuf::from("site")));
        assert_eq!(cli.config, PathBuf::from("folio.toml"));
        match cli.command {
            Commands::Export { output, pretty, clean } => {
                assert_eq!(output, Some(PathBuf::from("dist")));
                assert_eq!(pretty, Some(true));
                assert!(!clean);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_pretty_false() {
        let cli = Cli::parse_from(["folio", "export", "--pretty", "false"]);
        assert!(matches!(cli.command, Commands::Export { pretty: Some(false), .. }));
    }

    #[test]
    fn test_parse_works_filters() {
        let cli = Cli::parse_from(["folio", "-w", "works.json", "works", "--type", "video", "--creator", "c1"]);

        assert_eq!(cli.works, Some(PathBuf::from("works.json")));
        match cli.command {
            Commands::Works { work_type, creator, json } => {
                assert_eq!(work_type.as_deref(), Some("video"));
                assert_eq!(creator.as_deref(), Some("c1"));
                assert!(!json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_lookup() {
        let cli = Cli::parse_from(["folio", "creator", "c1"]);
        assert!(matches!(cli.command, Commands::Creator { ref id } if id == "c1"));
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
