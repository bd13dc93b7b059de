use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Artifact kinds that can be converted between tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Kind {
    Hooks,
    Mcp,
    Agents,
    Skills,
    Commands,
    Validation,
}

impl Kind {
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Hooks => "hooks",
            Kind::Mcp => "mcp",
            Kind::Agents => "agents",
            Kind::Skills => "skills",
            Kind::Commands => "commands",
            Kind::Validation => "validation",
        }
    }
}

/// Command-line interface for `assistkit`.
#[derive(Debug, Parser)]
#[command(
    name = "assistkit",
    version,
    about = "Convert assistant configuration between Claude Code, Cursor, Windsurf, Kiro, Gemini and Codex"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Converts one file from a tool's format to another's.
    Convert {
        /// What the input file contains.
        #[arg(long, value_enum, default_value_t = Kind::Hooks)]
        kind: Kind,
        /// Adapter the input is written for.
        #[arg(long)]
        from: String,
        /// Adapter to produce output for.
        #[arg(long)]
        to: String,
        /// Input file.
        input: PathBuf,
        /// Writes the result here instead of stdout.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Lists registered adapters, optionally for one kind.
    Adapters {
        #[arg(long, value_enum)]
        kind: Option<Kind>,
    },
    /// Prints the canonical hook events and which tools support them.
    Events,
    /// Checks a bundle file for naming, version and hook problems.
    Validate {
        /// Bundle JSON file.
        bundle: PathBuf,
    },
    /// Generates a bundle into each tool's native layout.
    Generate {
        /// Bundle JSON file.
        bundle: PathBuf,
        /// Tools to generate (repeatable). Defaults to every supported tool.
        #[arg(long = "tool", value_name = "TOOL", conflicts_with = "all")]
        tools: Vec<String>,
        /// Generates every supported tool.
        #[arg(long, default_value_t = false)]
        all: bool,
        /// Root directory; each tool is written to `<dir>/<tool>`.
        #[arg(long, env = "ASSISTKIT_OUTPUT_DIR", default_value = "dist")]
        output_dir: PathBuf,
    },
    /// Renders canonical validation areas as per-tool validators.
    Validators {
        /// Directory with one canonical JSON file per area.
        specs: PathBuf,
        /// Adapters to render (repeatable). Defaults to every registered one.
        #[arg(long = "adapter", value_name = "ADAPTER")]
        adapters: Vec<String>,
        /// Root directory; each adapter is written to `<dir>/<adapter>`.
        #[arg(long, env = "ASSISTKIT_OUTPUT_DIR", default_value = "dist")]
        output_dir: PathBuf,
    },
}
