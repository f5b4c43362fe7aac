//! Command line argument parsing for the nerdict CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// nerdict - dictionary-driven entity extraction
#[derive(Parser, Debug, Clone)]
#[command(name = "nerdict")]
#[command(about = "Dictionary-driven entity extraction and synonym normalization")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct NerdictArgs {
    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl NerdictArgs {
    /// Get the effective verbosity level: 0 quiet, 1 normal, 2 verbose, 3+ debug.
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose.saturating_add(1)
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run texts through a pipeline and print the extracted entities
    Parse(ParseArgs),

    /// Build a pipeline from a configuration and persist its metadata
    Persist(PersistArgs),

    /// Show the components of a pipeline and their dictionary sizes
    Inspect(InspectArgs),
}

/// Where a pipeline comes from: a configuration file or a persisted model.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct PipelineSource {
    /// Pipeline configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding a persisted pipeline
    #[arg(short, long, value_name = "MODEL_DIR")]
    pub model: Option<PathBuf>,
}

/// Arguments for parsing texts
#[derive(Parser, Debug, Clone)]
pub struct ParseArgs {
    #[command(flatten)]
    pub source: PipelineSource,

    /// Text to parse
    #[arg(value_name = "TEXT", conflicts_with = "input")]
    pub text: Option<String>,

    /// File with one text per line
    #[arg(short, long, value_name = "INPUT_FILE")]
    pub input: Option<PathBuf>,

    /// Include tokens in the output
    #[arg(long)]
    pub tokens: bool,
}

/// Arguments for persisting a pipeline
#[derive(Parser, Debug, Clone)]
pub struct PersistArgs {
    /// Pipeline configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: PathBuf,

    /// Directory to write the metadata into
    #[arg(short, long, value_name = "MODEL_DIR")]
    pub output: PathBuf,
}

/// Arguments for inspecting a pipeline
#[derive(Parser, Debug, Clone)]
pub struct InspectArgs {
    #[command(flatten)]
    pub source: PipelineSource,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}
