//! CLI argument definitions for the `ddi` tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use ddi_model::{Kind, ResolutionLevel};

#[derive(Parser)]
#[command(
    name = "ddi",
    version,
    about = "Browse DDI resources with reference resolution and DDI 3.3 XML output",
    long_about = "Browse DDI 3.3 metadata (concepts, variables, code lists, categories and\n\
                  their schemes) stored as JSON collections.\n\n\
                  References can be expanded one level (children) or fully (all), and\n\
                  results rendered as JSON or as a DDI XML ResourcePackage."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding the JSON collections (default: $DDI_DATA_DIR, then bundled fixtures).
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List resources of one kind, filtered and paginated.
    List(ListArgs),

    /// Show one resource by id or URN.
    Get(GetArgs),

    /// List resource kinds and their loaded collections.
    Kinds,
}

#[derive(Parser)]
pub struct ListArgs {
    /// Resource path or kind (variables, concept-schemes, CodeList, ...).
    #[arg(value_name = "RESOURCE", value_parser = Kind::parse_resource)]
    pub resource: Kind,

    /// Keep only the resource with this exact URN.
    #[arg(long)]
    pub urn: Option<String>,

    /// Keep resources maintained by these agencies.
    #[arg(long = "agency-id", value_name = "AGENCY")]
    pub agency_ids: Vec<String>,

    /// Keep resources with these ids (URNs match on their id segment).
    #[arg(long = "id", value_name = "ID")]
    pub ids: Vec<String>,

    /// Keep resources with these versions.
    #[arg(long = "version", value_name = "VERSION")]
    pub versions: Vec<String>,

    /// Keep resources whose concept reference names one of these ids or URNs.
    #[arg(long = "concept-reference", value_name = "ID")]
    pub concept_references: Vec<String>,

    /// Case-insensitive search over labels and names.
    #[arg(long)]
    pub search: Option<String>,

    /// Skip this many matching resources.
    #[arg(long, default_value_t = 0)]
    pub offset: usize,

    /// Return at most this many resources.
    #[arg(long)]
    pub limit: Option<usize>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Parser)]
pub struct GetArgs {
    /// Resource path or kind (variables, concept-schemes, CodeList, ...).
    #[arg(value_name = "RESOURCE", value_parser = Kind::parse_resource)]
    pub resource: Kind,

    /// Resource id or URN.
    #[arg(value_name = "ID")]
    pub id: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args)]
pub struct OutputArgs {
    /// Reference resolution depth: none, children or all (default from ddi.toml, else none).
    #[arg(long = "references", value_name = "LEVEL")]
    pub references: Option<ResolutionLevel>,

    /// Negotiate the output format from a media type, as an Accept header would.
    #[arg(long, value_name = "MEDIA_TYPE", conflicts_with = "format")]
    pub accept: Option<String>,

    /// Output format (default from ddi.toml, else json).
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Json,
    Xml,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
