//! Command-line interface for woden

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use std::process::ExitCode;

#[cfg(feature = "cli")]
use tracing_subscriber::EnvFilter;

#[cfg(feature = "cli")]
use woden::catalog::XmlCatalog;
#[cfg(feature = "cli")]
use woden::{ReaderConfig, WsdlDocument, WsdlReader};

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "woden")]
#[command(author, version, about = "WSDL 2.0 reader and validator", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand, Debug)]
enum Commands {
    /// Read a WSDL 2.0 description and report assertion violations
    Validate {
        /// Path to the WSDL file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output the report as JSON
        #[arg(short, long)]
        json: bool,

        /// OASIS XML catalog used to remap schema locations
        #[arg(short, long, value_name = "CATALOG")]
        catalog: Option<PathBuf>,

        /// Only read the description; skip validation
        #[arg(long)]
        no_validation: bool,
    },
}

#[cfg(feature = "cli")]
fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Validate {
            file,
            json,
            catalog,
            no_validation,
        } => cmd_validate(file, json, catalog, no_validation),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

/// Returns whether the description is valid
#[cfg(feature = "cli")]
fn cmd_validate(
    file: PathBuf,
    json_output: bool,
    catalog: Option<PathBuf>,
    no_validation: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    let mut config = ReaderConfig::new().with_validation(!no_validation);
    if let Some(path) = catalog {
        config = config.with_catalog(XmlCatalog::from_file(&path)?);
    }

    let document = WsdlReader::with_config(config).read_file(&file)?;

    if json_output {
        print_report_json(&file, &document)?;
    } else {
        print_report(&file, &document);
    }

    Ok(document.is_valid())
}

#[cfg(feature = "cli")]
fn print_report(file: &std::path::Path, document: &WsdlDocument) {
    let description = &document.description;
    println!("woden v{}", woden::VERSION);
    println!();
    println!("Description: {}", file.display());
    println!(
        "  Target Namespace: {}",
        description.target_namespace.as_deref().unwrap_or("(none)")
    );
    println!("  Interfaces: {}", description.interfaces.len());
    println!("  Bindings: {}", description.bindings.len());
    println!("  Services: {}", description.services.len());

    let Some(report) = &document.report else {
        println!();
        println!("Validation skipped");
        return;
    };

    if !document.diagnostics.is_empty() {
        println!();
        for diagnostic in &document.diagnostics {
            println!("  {}", diagnostic);
        }
    }

    println!();
    if report.is_valid() {
        println!("✓ Description is valid ({} warnings)", report.warnings);
    } else {
        println!(
            "✗ Description is invalid ({} errors, {} warnings)",
            report.errors, report.warnings
        );
    }
}

#[cfg(feature = "cli")]
fn print_report_json(
    file: &std::path::Path,
    document: &WsdlDocument,
) -> Result<(), Box<dyn std::error::Error>> {
    use serde_json::json;

    let diagnostics: Vec<_> = document
        .diagnostics
        .iter()
        .map(|d| {
            json!({
                "id": d.message_id,
                "severity": d.severity,
                "message": d.message(),
                "args": d.args,
                "location": d.locator,
            })
        })
        .collect();

    let output = json!({
        "file": file.display().to_string(),
        "targetNamespace": document.description.target_namespace,
        "valid": document.is_valid(),
        "report": document.report,
        "diagnostics": diagnostics,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    std::process::exit(1);
}
