//! Command-line serializer for JSON payload descriptions.

#![warn(
    clippy::nursery,
    clippy::pedantic,
    clippy::expect_used,
    clippy::unwrap_used
)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::{error, fs};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use sometlv::{fmt, json, Serializable};

const SEPARATOR: &str = "------------------------------";

#[derive(Debug, Parser)]
#[command(about = "SOME/IP TLV payload serializer", version)]
struct Args {
    /// JSON message definition. Can be specified multiple times.
    #[arg(value_name = "JSON", required = true)]
    files: Vec<PathBuf>,

    /// Print a verbose explanation of the serialization.
    #[arg(short = 'v', long = "explain", visible_alias = "verbose")]
    explain: bool,

    /// Be more quiet.
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let default_level = if args.quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    for file in &args.files {
        if let Err(err) = print_serialization(file, args.explain, args.quiet) {
            tracing::error!("failed serializing file {}: {err}", file.display());
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}

fn print_serialization(
    file: &Path,
    explain: bool,
    quiet: bool,
) -> Result<(), Box<dyn error::Error>> {
    tracing::info!("serializing message in file {}", file.display());
    let description = fs::read_to_string(file)?;
    let message = json::from_str(&description)?;

    if explain {
        println!(
            "{}",
            message.print_details(0, fmt::DEFAULT_COLUMN_WIDTH, false)?
        );
        return Ok(());
    }

    let mut lines = if quiet {
        Vec::new()
    } else {
        vec![format!("{SEPARATOR}\nSerialized message:\n")]
    };
    lines.extend(fmt::hex_rows(&message.serialization()?, 8));
    if !quiet {
        lines.push(SEPARATOR.to_owned());
    }
    println!("{}", lines.join("\n"));
    Ok(())
}
