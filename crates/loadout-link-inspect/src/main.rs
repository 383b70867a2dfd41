//! Decodes a share link and prints what it restores.
//!
//! ```text
//! loadout-link-inspect <link-or-code> [catalog.txt]
//! ```
//!
//! `catalog.txt` holds one valid package key per line; when given, package
//! keys are checked against it. Set `RUST_LOG=debug` to trace every decode
//! stage.

use std::fs;
use std::process::ExitCode;

use loadout_link::{CatalogContext, ShareCodec, validate_packages};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let Some(link) = args.next() else {
        eprintln!("usage: loadout-link-inspect <link-or-code> [catalog.txt]");
        return ExitCode::from(2);
    };
    let catalog_path = args.next();

    let codec = ShareCodec::builtin();
    let resolved = match codec.decode_link(&link) {
        Ok(resolved) => resolved,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!("=== Selection ===");
    match serde_json::to_string_pretty(&resolved.selection) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    }

    println!("\n=== Diagnostics ===");
    println!("Skipped entries: {}", resolved.skipped);
    for warning in &resolved.warnings {
        println!("  - {warning}");
    }

    if let Some(path) = catalog_path {
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) => {
                eprintln!("error: reading {path}: {err}");
                return ExitCode::FAILURE;
            }
        };
        let catalog: CatalogContext = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let validation = validate_packages(&resolved.selection.packages, &catalog);

        println!("\n=== Packages ===");
        println!("Catalog size: {}", catalog.len());
        println!("Available: {}", validation.valid.len());
        println!("Not in catalog: {}", validation.invalid);
    }

    ExitCode::SUCCESS
}
