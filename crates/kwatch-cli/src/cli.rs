use clap::{Parser, Subcommand, ValueEnum};
use kwatch_api::ApiVersion;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "kwatch")]
#[command(about = "Encode, decode and convert watch event streams")]
pub struct Cli {
    /// YAML or JSON file with default kind, api version and logging settings.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Write events from a YAML/JSON list as watch frames.
    Encode(EncodeCommand),
    /// Print the events carried by a watch stream.
    Decode(DecodeCommand),
    /// Re-encode a watch stream in another api version.
    Convert(ConvertCommand),
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Pod,
    Service,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, clap::Args)]
pub struct EncodeCommand {
    #[arg(long)]
    pub input: PathBuf,
    #[arg(long, value_enum)]
    pub kind: Option<ObjectKind>,
    #[arg(long)]
    pub api_version: Option<ApiVersion>,
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct DecodeCommand {
    /// Stream to read; stdin when omitted or `-`.
    #[arg(long)]
    pub input: Option<PathBuf>,
    #[arg(long, value_enum)]
    pub kind: Option<ObjectKind>,
    #[arg(long)]
    pub api_version: Option<ApiVersion>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Object key left out of fingerprints, e.g. `resourceVersion`.
    #[arg(long = "fingerprint-ignore")]
    pub fingerprint_ignore: Vec<String>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ConvertCommand {
    #[arg(long)]
    pub input: Option<PathBuf>,
    #[arg(long)]
    pub from: ApiVersion,
    #[arg(long)]
    pub to: ApiVersion,
    #[arg(long, value_enum)]
    pub kind: Option<ObjectKind>,
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
