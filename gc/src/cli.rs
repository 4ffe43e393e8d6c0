//! CLI argument parsing for gc

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gc")]
#[command(author, version, about = "Inspect global coordinates of a cube description", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    /// Output format (text or json)
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show every coordinate of a cube description
    Show {
        /// Cube description (YAML)
        #[arg(required = true)]
        file: PathBuf,
    },

    /// Print the value of one coordinate
    Get {
        /// Cube description (YAML)
        #[arg(required = true)]
        file: PathBuf,

        /// Coordinate name
        #[arg(required = true)]
        name: String,

        /// Convert a scalar quantity to this unit
        #[arg(short, long)]
        unit: Option<String>,
    },

    /// List the physical type of each coordinate
    Types {
        /// Cube description (YAML)
        #[arg(required = true)]
        file: PathBuf,
    },

    /// Show coordinates with a given physical type
    Filter {
        /// Cube description (YAML)
        #[arg(required = true)]
        file: PathBuf,

        /// Physical type to match exactly ("none" matches unset types)
        #[arg(required = true)]
        physical_type: String,
    },

    /// Check physical type strings
    Validate {
        /// Physical types to check
        #[arg(required = true)]
        physical_types: Vec<String>,
    },

    /// List the UCD1+ vocabulary
    Vocabulary {
        /// Only words starting with this prefix
        #[arg(short, long)]
        prefix: Option<String>,
    },
}

/// Output format for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Map the CLI spelling of a physical type to a filter argument
pub fn parse_physical_type_arg(arg: &str) -> Option<&str> {
    if arg.eq_ignore_ascii_case("none") { None } else { Some(arg) }
}
