//! shi-confgen CLI - ArduinoJson configuration code generator
//!
//! Commands:
//! - `shi-confgen generate` - Generate `_config.cpp` sources from headers
//! - `shi-confgen inspect` - Show what a header parses to and how it would be generated
//! - `shi-confgen check` - Validate a shi-confgen.toml manifest

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

mod generate;
mod inspect;
mod logging;
mod manifest;

#[derive(Parser)]
#[command(name = "shi-confgen")]
#[command(author, version, about = "Generate ArduinoJson code for SHI configuration classes", long_about = None)]
struct Cli {
    /// Increase log detail (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate configuration sources
    Generate {
        /// Header files, directories or glob patterns (default: manifest inputs)
        inputs: Vec<String>,

        /// Path to shi-confgen.toml (default: ./shi-confgen.toml if present)
        #[arg(short, long)]
        manifest: Option<String>,

        /// Qualified marker base (default: SHI::Configuration)
        #[arg(long)]
        marker: Option<String>,

        /// Also accept the doubly prefixed marker spelling
        #[arg(long)]
        legacy_marker: bool,

        /// Date stamped into generated files (default: today)
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<NaiveDate>,

        /// Skip files with immutable public fields instead of aborting
        #[arg(short, long)]
        keep_going: bool,

        /// Report what would be written without writing
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Print parsed declarations, eligibility and field strategies as JSON
    Inspect {
        /// Header file to inspect
        header: String,

        /// Qualified marker base (default: SHI::Configuration)
        #[arg(long)]
        marker: Option<String>,
    },

    /// Validate a shi-confgen.toml manifest
    Check {
        /// Path to shi-confgen.toml (default: ./shi-confgen.toml)
        #[arg(short, long)]
        manifest: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_logging(logging::level_for(cli.verbose, cli.quiet));

    match cli.command {
        Commands::Generate {
            inputs,
            manifest,
            marker,
            legacy_marker,
            date,
            keep_going,
            dry_run,
        } => {
            generate::run(generate::GenerateOptions {
                inputs,
                manifest,
                marker,
                legacy_marker,
                date,
                keep_going,
                dry_run,
            })?;
        }
        Commands::Inspect { header, marker } => {
            inspect::run(&header, marker)?;
        }
        Commands::Check { manifest } => {
            manifest::check(manifest)?;
        }
    }

    Ok(())
}
