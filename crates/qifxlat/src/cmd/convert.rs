//! Implementation of the qifxlat command.

use crate::cmd::completions::ShellType;
use crate::config::{ConfigError, Options, Settings};
use crate::report;
use crate::writer::{self, WriteError, WriteSummary};
use anyhow::{Context, Result};
use clap::Parser;
use qifxlat_booking::{normalize, Transaction};
use qifxlat_parser::{read, Buffer, ReadResult};
use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Translate a QIF export to CSV, JSON or Ledger.
///
/// With no output file the input is read and validated only.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// The QIF file to read
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// The QIF file to read (alternative to FILE)
    #[arg(long = "input", value_name = "FILE", env = "QIFXLAT_INPUT")]
    pub input: Option<PathBuf>,

    /// Write transactions as CSV to this file
    #[arg(long, value_name = "FILE", env = "QIFXLAT_OUTPUT_CSV_FILENAME")]
    pub output_csv_filename: Option<PathBuf>,

    /// Write accounts, categories and transactions as JSON to this file
    #[arg(long, value_name = "FILE", env = "QIFXLAT_OUTPUT_JSON_FILENAME")]
    pub output_json_filename: Option<PathBuf>,

    /// Write balanced entries for the ledger CLI to this file
    #[arg(long, value_name = "FILE", env = "QIFXLAT_OUTPUT_LEDGER_FILENAME")]
    pub output_ledger_filename: Option<PathBuf>,

    /// Log how long each stage took (default: true)
    #[arg(
        long,
        value_name = "BOOL",
        env = "QIFXLAT_SHOW_TIMING",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub show_timing: Option<bool>,

    /// Do not log stage timings
    #[arg(long)]
    pub no_show_timing: bool,

    /// Log at debug level
    #[arg(short, long, env = "QIFXLAT_VERBOSE")]
    pub verbose: bool,

    /// Read settings from a JSON file keyed by long option names
    #[arg(long, value_name = "FILE", env = "QIFXLAT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Generate shell completions and exit
    #[arg(long, value_name = "SHELL", hide = true)]
    pub generate_completions: Option<ShellType>,
}

impl Args {
    /// The settings named on the command line or in the environment.
    #[must_use]
    pub fn options(&self) -> Options {
        Options {
            input: self.file.clone().or_else(|| self.input.clone()),
            output_csv_filename: self.output_csv_filename.clone(),
            output_json_filename: self.output_json_filename.clone(),
            output_ledger_filename: self.output_ledger_filename.clone(),
            show_timing: if self.no_show_timing {
                Some(false)
            } else {
                self.show_timing
            },
            verbose: self.verbose.then_some(true),
        }
    }

    /// Layer the command line over the config file, if any.
    ///
    /// # Errors
    ///
    /// Fails if the config file cannot be loaded or no input file is named.
    pub fn settings(&self) -> Result<Settings, ConfigError> {
        let file = match &self.config {
            Some(path) => Options::load(path)?,
            None => Options::default(),
        };
        Settings::try_from(self.options().or(file))
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}

fn log_timing(settings: &Settings, stage: &str, started: Instant) {
    if settings.show_timing {
        tracing::info!(
            "{stage}: finished in {:.2}ms",
            started.elapsed().as_secs_f64() * 1000.0
        );
    }
}

/// Read and validate the input file, reporting parse errors to `stderr`.
///
/// Returns `None` when a parse error was reported.
fn import<W: Write>(path: &Path, stderr: &mut W) -> Result<Option<ReadResult>> {
    let bytes = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;

    let buffer = match Buffer::new(&bytes) {
        Ok(buffer) => buffer,
        Err(err) => {
            let lossy = String::from_utf8_lossy(&bytes);
            report::report_parse_error(&err, path, &lossy, stderr)?;
            return Ok(None);
        }
    };

    match read(&buffer) {
        Ok(result) => Ok(Some(result)),
        Err(err) => {
            report::report_parse_error(&err, path, buffer.as_str(), stderr)?;
            Ok(None)
        }
    }
}

fn export<F>(settings: &Settings, stage: &str, path: &Path, write: F) -> Result<WriteSummary>
where
    F: FnOnce(BufWriter<File>) -> Result<WriteSummary, WriteError>,
{
    let started = Instant::now();
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let summary =
        write(BufWriter::new(file)).with_context(|| format!("failed to write {}", path.display()))?;
    log_timing(settings, stage, started);
    Ok(summary)
}

/// Run one translation with resolved settings.
///
/// # Errors
///
/// Fails on I/O errors and on transactions the writers reject. Parse errors
/// are reported to stderr and yield exit code 1.
pub fn run(settings: &Settings) -> Result<ExitCode> {
    let started = Instant::now();
    let mut stderr = io::stderr().lock();
    let Some(result) = import(&settings.input, &mut stderr)? else {
        return Ok(ExitCode::from(1));
    };
    log_timing(settings, "import", started);

    tracing::info!(
        accounts = result.account_count(),
        categories = result.categories.as_ref().map_or(0, |s| s.len()),
        memorized = result.memorized.len(),
        prices = result.prices.len(),
        securities = result.securities.as_ref().map_or(0, |s| s.len()),
        tags = result.tags.as_ref().map_or(0, |s| s.len()),
        transactions = result.transactions.len(),
        "import: read {}",
        settings.input.display()
    );

    if !settings.has_output() {
        tracing::warn!("no output files requested; QIF data was validated only");
        return Ok(ExitCode::SUCCESS);
    }

    let transactions: Vec<Transaction> = normalize(&result.transactions);

    if let Some(path) = &settings.output_csv {
        export(settings, "csv", path, |out| {
            writer::csv::write(&result, &transactions, out)
        })?;
    }
    if let Some(path) = &settings.output_json {
        export(settings, "json", path, |out| {
            writer::json::write(&result, &transactions, out)
        })?;
    }
    if let Some(path) = &settings.output_ledger {
        export(settings, "ledger", path, |out| {
            writer::ledger::write(&result, &transactions, out)
        })?;
    }

    log_timing(settings, "qifxlat", started);
    Ok(ExitCode::SUCCESS)
}

/// Main entry point for the qifxlat command.
pub fn main() -> ExitCode {
    main_with_name("qifxlat")
}

/// Main entry point with custom binary name.
pub fn main_with_name(bin_name: &str) -> ExitCode {
    let args = Args::parse();

    if let Some(shell) = args.generate_completions {
        crate::cmd::completions::generate_completions::<Args>(shell, bin_name);
        return ExitCode::SUCCESS;
    }

    let settings = match args.settings() {
        Ok(settings) => settings,
        Err(e) => {
            let e = anyhow::Error::from(e);
            eprintln!("error: {e:#}");
            return ExitCode::from(2);
        }
    };

    init_tracing(settings.verbose);

    match run(&settings) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}
