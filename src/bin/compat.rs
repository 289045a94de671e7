//! Schema Compatibility CLI
//!
//! Compares two JSON Schema files and exits non-zero when the second is
//! not backward compatible with the first. Prints nothing on success.

use std::path::PathBuf;

use clap::Parser;
use json_schema_compat::{compare_schema_files, CompatConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schema-compat")]
#[command(about = "Check that a changed JSON Schema is backward compatible with the original")]
struct Cli {
    /// Original schema file
    original: PathBuf,

    /// Changed schema file
    changed: PathBuf,

    /// Treat new anyOf alternatives as non-breaking
    #[arg(long)]
    allow_new_one_of: bool,

    /// Treat new enum values as non-breaking
    #[arg(long)]
    allow_new_enum_value: bool,

    /// Reconcile anyOf reorderings instead of flagging them
    #[arg(long)]
    allow_reorder: bool,

    /// Identifier whose removal is non-breaking (repeatable)
    #[arg(long = "deprecated-item", value_name = "NAME")]
    deprecated_items: Vec<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CompatConfig {
        allow_new_one_of: cli.allow_new_one_of,
        allow_new_enum_value: cli.allow_new_enum_value,
        allow_reorder: cli.allow_reorder,
        deprecated_items: cli.deprecated_items,
    };

    let result = compare_schema_files(&cli.original, &cli.changed, &config)?;

    if !result.valid {
        eprintln!("The schema is not backward compatible:");
        for error in result.errors() {
            eprintln!("  {}", error);
        }
        std::process::exit(1);
    }

    Ok(())
}
