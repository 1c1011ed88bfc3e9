//! Command-line argument definitions

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "metainherit")]
#[command(about = "Resolve inherited annotation metadata across type hierarchies", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve metadata for a type or method with override semantics
    Resolve {
        /// Type model file (json, yaml or toml)
        #[arg(short, long)]
        model: PathBuf,

        /// Type the target is declared on
        #[arg(short = 't', long = "type")]
        type_name: String,

        /// Method name; omit to resolve type-level metadata
        #[arg(long)]
        method: Option<String>,

        /// Method parameter types, comma separated
        #[arg(long, value_delimiter = ',')]
        params: Vec<String>,

        /// Runtime type to analyse (defaults to --type)
        #[arg(long)]
        declaring: Option<String>,

        /// Configuration file (defaults to the nearest .metainherit.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Only collect these metadata kinds, comma separated
        #[arg(long, value_delimiter = ',')]
        only: Option<Vec<String>>,

        /// Include metadata declared on the type itself
        #[arg(long, num_args = 0..=1, default_missing_value = "true")]
        include_class: Option<bool>,

        /// Include metadata declared on superclasses
        #[arg(long, num_args = 0..=1, default_missing_value = "true")]
        include_superclasses: Option<bool>,

        /// Include metadata declared on interfaces
        #[arg(long, num_args = 0..=1, default_missing_value = "true")]
        include_interfaces: Option<bool>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Union the metadata of a type or method with that of its interfaces
    Interfaces {
        /// Type model file (json, yaml or toml)
        #[arg(short, long)]
        model: PathBuf,

        /// Type to inspect
        #[arg(short = 't', long = "type")]
        type_name: String,

        /// Method name; omit to inspect type-level metadata
        #[arg(long)]
        method: Option<String>,

        /// Method parameter types, comma separated
        #[arg(long, value_delimiter = ',')]
        params: Vec<String>,

        /// Only report this metadata kind
        #[arg(long)]
        kind: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Validate a type model file
    Check {
        /// Type model file (json, yaml or toml)
        #[arg(short, long)]
        model: PathBuf,
    },

    /// Write a default .metainherit.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Parse CLI arguments
pub fn parse_args() -> Cli {
    Cli::parse()
}
