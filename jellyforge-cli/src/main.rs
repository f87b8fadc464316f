//! Jellyforge — compile tag-builder templates into Jelly views.
//!
//! # Usage
//!
//! ```text
//! jellyforge compile <root> [--suffix tera] [--dry-run] [--fail-fast] [--json]
//! jellyforge diff <root> [--suffix tera]
//! jellyforge tags [--root <root>] [--json]
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{compile::CompileArgs, diff::DiffArgs, tags::TagsArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "jellyforge",
    version,
    about = "Compile tag-builder templates into Jelly views",
    long_about = None,
)]
struct Cli {
    /// Log progress to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render every template under a directory next to its source.
    Compile(CompileArgs),

    /// Show unified diff of what compile would write.
    Diff(DiffArgs),

    /// List the tag operations available to templates.
    Tags(TagsArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Commands::Compile(args) => args.run(),
        Commands::Diff(args) => args.run(),
        Commands::Tags(args) => args.run(),
    }
}
