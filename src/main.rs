//! Command-line interface for sigcheck

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
use std::io::Write;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use sigcheck::registry::Registry;
#[cfg(feature = "cli")]
use sigcheck::report::{report_json, write_report};
#[cfg(feature = "cli")]
use sigcheck::validators::validate_registry;

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "sigcheck")]
#[command(author, version, about = "Consistency checker for XML API signature registries", long_about = None)]
struct Cli {
    /// Path to the signature registry document
    #[arg(value_name = "REGISTRY")]
    registry: PathBuf,

    /// Output the report as JSON
    #[arg(short, long)]
    json: bool,
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.json {
        println!("Loading file...");
    }

    let source = cli.registry.display().to_string();
    let registry = Registry::from_file(&cli.registry)?;
    let outcome = validate_registry(&registry);

    if cli.json {
        let value = report_json(&source, &registry, &outcome);
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        write_report(&mut handle, &source, &registry, &outcome)?;
        handle.flush()?;
    }

    if outcome.has_errors() {
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
