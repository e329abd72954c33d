//! ingress-validate - validate Ingress manifests against the controller's rules.
//!
//! Reads a JSON Ingress or List from FILE, or from stdin when FILE is absent
//! or `-`, and reports every field error prefixed by the Ingress name.
//!
//! Exit status: 0 when every Ingress is valid, 1 when any is invalid, 2 when
//! the input or configuration cannot be read.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::filter::Directive;

use ingress_validator::config::{PLUS_ENV, parse_tier};
use ingress_validator::manifest::parse_ingresses;
use ingress_validator::validation::display_name;
use ingress_validator::{Config, ErrorList, Result, Tier, validate_ingress};

/// Validate Kubernetes Ingress manifests for the NGINX Ingress Controller
#[derive(Debug, Parser)]
#[command(name = "ingress-validate", version, about)]
struct Args {
    /// JSON Ingress or List to validate; `-` or absent reads stdin
    file: Option<PathBuf>,

    /// Validate for NGINX Plus, unlocking its annotations and LB methods
    #[arg(
        long = "nginx-plus",
        env = PLUS_ENV,
        value_name = "BOOL",
        default_value = "false",
        value_parser = parse_tier
    )]
    tier: Tier,

    /// Report format
    #[arg(long, value_enum, default_value_t = Output::Text)]
    output: Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Output {
    /// `<name>: <error>` lines
    Text,
    /// One JSON object per Ingress
    Json,
}

impl Args {
    /// The file to read, or `None` for stdin
    fn input_path(&self) -> Option<&PathBuf> {
        self.file.as_ref().filter(|path| path.as_os_str() != "-")
    }
}

/// Per-Ingress result in JSON output
#[derive(Debug, Serialize)]
struct Report<'a> {
    name: String,
    valid: bool,
    errors: &'a ErrorList,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize tracing subscriber
    let filter = tracing_subscriber::EnvFilter::from_default_env();
    let filter = match "ingress_validator=info".parse::<Directive>() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .json()
        .init();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            error!(error = %e, "Validation could not run");
            ExitCode::from(2)
        }
    }
}

/// Validate all Ingresses in the input. Returns whether all of them are valid.
fn run(args: &Args) -> Result<bool> {
    let config = Config { tier: args.tier };

    let input = match args.input_path() {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let ingresses = parse_ingresses(&input)?;
    info!(count = ingresses.len(), tier = %config.tier, "Validating ingresses");

    let mut all_valid = true;
    for ingress in &ingresses {
        let errors = validate_ingress(ingress, config.tier);
        all_valid &= errors.is_empty();
        let name = display_name(ingress);
        match args.output {
            Output::Json => {
                let report = Report {
                    valid: errors.is_empty(),
                    name,
                    errors: &errors,
                };
                println!("{}", serde_json::to_string(&report)?);
            }
            Output::Text if errors.is_empty() => println!("{}: valid", name),
            Output::Text => {
                for err in &errors {
                    println!("{}: {}", name, err);
                }
            }
        }
    }

    Ok(all_valid)
}
