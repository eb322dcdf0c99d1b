//! gym-intake: interactive command-line intake form for gym memberships.
//!
//! Collects login details, confirms them, then walks through personal,
//! payment and agreement fields before printing a summary. The first
//! rejected field ends the session.

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{ensure, Result};
use chrono::NaiveDate;
use clap::Parser;
use gymintake::{Config, Intake, IntakeError, Prompter};

use prompt::{LinePrompter, TermPrompter};

/// Exit codes for the CLI
///
/// - 0: Completed, or ended after a failed credential re-entry
/// - 1: A field was rejected or input could not be read
mod exit_codes {
    pub const SUCCESS: u8 = 0;
    pub const FAILURE: u8 = 1;
}

mod prompt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

/// Gym membership intake form
#[derive(Parser)]
#[command(name = "gym-intake")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (defaults to .gymintake.toml in the current directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Date ages are calculated against, as YYYY-MM-DD (defaults to today)
    #[arg(long, value_name = "YYYY-MM-DD")]
    reference_date: Option<NaiveDate>,

    /// Monthly price for adults
    #[arg(long)]
    base_price: Option<u32>,

    /// Summary format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Read answers line by line even when attached to a terminal
    #[arg(long)]
    plain: bool,
}

fn main() -> ExitCode {
    // Initialize logging on stderr so prompts on stdout stay clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let format = cli.format;

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            if format == OutputFormat::Json {
                let error_json = serde_json::json!({
                    "error": "CommandFailed",
                    "message": e.to_string(),
                });
                eprintln!("{}", error_json);
            } else {
                eprintln!("Error: {:#}", e);
            }
            ExitCode::from(exit_codes::FAILURE)
        }
    }
}

fn run(cli: Cli) -> Result<u8> {
    let config = load_config(&cli)?;

    let interactive = !cli.plain
        && io::stdin().is_terminal()
        && dialoguer::console::Term::stderr().is_term();

    if interactive {
        run_intake(TermPrompter, &config, cli.format)
    } else {
        let stdin = io::stdin();
        run_intake(
            LinePrompter::new(stdin.lock(), io::stdout()),
            &config,
            cli.format,
        )
    }
}

/// Layer command-line overrides on top of the file and environment config.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            ensure!(path.is_file(), "Config file not found: {}", path.display());
            Config::load_file(path)
        }
        None => Config::load(&std::env::current_dir()?),
    };

    if let Some(date) = cli.reference_date {
        config.reference_date = Some(date);
    }
    if let Some(price) = cli.base_price {
        config.base_price = price;
    }

    Ok(config)
}

fn run_intake<P: Prompter>(prompter: P, config: &Config, format: OutputFormat) -> Result<u8> {
    let mut intake = Intake::new(prompter, config);
    tracing::debug!(reference_date = %intake.reference_date(), "starting intake");

    match intake.run() {
        Ok(user) => {
            let summary = match format {
                OutputFormat::Text => user.to_string(),
                OutputFormat::Json => serde_json::to_string_pretty(&user)?,
            };
            intake.present(&summary)?;
            Ok(exit_codes::SUCCESS)
        }
        Err(e) => {
            report(&e, format);
            Ok(e.exit_code())
        }
    }
}

fn report(error: &IntakeError, format: OutputFormat) {
    if format == OutputFormat::Json {
        let error_json = serde_json::json!({
            "error": error.kind(),
            "message": error.to_string(),
        });
        eprintln!("{}", error_json);
    } else {
        eprintln!("{}. Exiting program.", error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_overrides() {
        let cli = Cli::try_parse_from([
            "gym-intake",
            "--reference-date",
            "2023-12-01",
            "--base-price",
            "4000",
            "--format",
            "json",
            "--plain",
        ])
        .unwrap();
        assert_eq!(cli.reference_date, NaiveDate::from_ymd_opt(2023, 12, 1));
        assert_eq!(cli.base_price, Some(4000));
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.plain);
    }

    #[test]
    fn test_rejects_bad_reference_date() {
        assert!(Cli::try_parse_from(["gym-intake", "--reference-date", "01/12/2023"]).is_err());
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("typo.toml");

        let cli = Cli::try_parse_from(["gym-intake", "--config", path.to_str().unwrap()]).unwrap();
        let err = load_config(&cli).unwrap_err();
        assert!(err.to_string().starts_with("Config file not found:"));
    }

    #[test]
    fn test_flags_override_config_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("intake.toml");
        std::fs::write(&path, "base_price = 4000\nreference_date = \"2020-01-01\"\n").unwrap();

        let cli = Cli::try_parse_from([
            "gym-intake",
            "--config",
            path.to_str().unwrap(),
            "--reference-date",
            "2023-12-01",
        ])
        .unwrap();
        let config = load_config(&cli).unwrap();
        assert_eq!(config.base_price, 4000);
        assert_eq!(config.reference_date, NaiveDate::from_ymd_opt(2023, 12, 1));
    }
}
