//! Command line argument parsing for the Spanfold CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Spanfold - compile query text into boolean match expressions
#[derive(Parser, Debug, Clone)]
#[command(name = "spanfold")]
#[command(about = "Compile query text into boolean match expressions across fields and variants")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SpanfoldArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug, 4=trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SpanfoldArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show the span tree of an analyzed text
    Tree(TreeArgs),

    /// Compile a text into an across-variants expression
    Compile(CompileArgs),

    /// Parse a JSON request file and compile it
    Request(RequestArgs),
}

/// Arguments for showing a span tree
#[derive(Parser, Debug, Clone)]
pub struct TreeArgs {
    /// Query text
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Analyzer to run over the text
    #[arg(short, long, default_value = "standard")]
    pub analyzer: String,
}

/// Arguments for compiling a text
#[derive(Parser, Debug, Clone)]
pub struct CompileArgs {
    /// Query text
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Fields to match, as "field1,field2^boost"
    #[arg(short = 'F', long)]
    pub fields: String,

    /// Analyzer to run over the text
    #[arg(short, long, default_value = "standard")]
    pub analyzer: String,

    /// Combine alternatives with soft disjunctions
    #[arg(long)]
    pub dis_max: bool,

    /// Tie breaker of the soft disjunctions
    #[arg(long, default_value = "0.0", requires = "dis_max")]
    pub tie_breaker: f32,

    /// Weight of the whole query
    #[arg(short, long, default_value = "1.0")]
    pub boost: f32,

    /// Named provider expanding each field/term pair
    #[arg(short, long)]
    pub script: Option<String>,

    /// Provider parameters as a JSON object
    #[arg(long, requires = "script")]
    pub params: Option<String>,

    /// Compile the filter form (no weights)
    #[arg(long)]
    pub filter: bool,
}

/// Arguments for compiling a request file
#[derive(Parser, Debug, Clone)]
pub struct RequestArgs {
    /// JSON request file
    #[arg(value_name = "REQUEST_FILE")]
    pub request_file: PathBuf,

    /// JSONL documents to match the expression against
    #[arg(short, long, value_name = "DOCUMENT_FILE")]
    pub documents: Option<PathBuf>,

    /// Analyzer used to index the documents
    #[arg(long, default_value = "simple")]
    pub index_analyzer: String,

    /// Compile the filter form (no weights)
    #[arg(long)]
    pub filter: bool,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
