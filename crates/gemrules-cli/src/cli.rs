use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "GEMRules Developers",
    version,
    about = "GEMRules CLI - Generates gene transcription and translation rules for rule-based biochemical models and exports them as BNGL.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assemble a model from a definition file and export it as BNGL.
    Generate(GenerateArgs),
    /// Assemble a model and print per-protein rule and parameter counts.
    Inspect(InspectArgs),
}

/// Arguments for the `generate` subcommand.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Path to the model definition file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub model: PathBuf,

    /// Path for the BNGL output file. Writes to stdout if omitted.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// CSV table of `name,value` rows replacing generated parameter values.
    #[arg(long, value_name = "PATH")]
    pub overrides: Option<PathBuf>,
}

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Path to the model definition file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub model: PathBuf,

    /// Also list every generated rule name.
    #[arg(long)]
    pub rules: bool,
}
