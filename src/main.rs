//! `magtext` CLI - convert text into a glyph placement script

mod cmd;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "magtext")]
#[command(about = "Typeset text as a layout placement script built from glyph cells")]
#[command(version)]
struct Cli {
    /// Verbose logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (default: ~/.config/magtext/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Glyph library directory, overriding the configuration
    #[arg(short = 'L', long, global = true, value_name = "DIR")]
    library: Option<PathBuf>,

    /// Glyph drawn for characters without a cell
    #[arg(long, global = true, value_name = "CHAR")]
    fallback: Option<char>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert text into a placement script
    Render {
        /// Cell name the layout is archived under
        #[arg(short = 'c', long = "cellname", value_name = "NAME")]
        cellname: String,

        /// Read text from this file instead of stdin
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Write the script to this file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show how each character resolves to a glyph cell
    Inspect {
        /// Characters to look up
        text: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let overrides = cmd::Overrides {
        config: cli.config,
        library: cli.library,
        fallback: cli.fallback,
    };

    match cli.command {
        Commands::Render {
            cellname,
            input,
            output,
        } => cmd::render::cmd_render(&overrides, &cellname, input.as_deref(), output.as_deref()),
        Commands::Inspect { text } => cmd::inspect::cmd_inspect(&overrides, &text),
    }
}

/// Log to stderr; stdout carries the script.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
