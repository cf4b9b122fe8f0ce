//! Settings layering.
//!
//! Settings come from three layers: command-line flags (with their
//! `QIFXLAT_*` environment fallbacks, resolved by clap), an optional JSON
//! config file, and built-in defaults. Each layer is an [`Options`]; the
//! first layer that sets a value wins.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading or resolving settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {}", path.display())]
    Read {
        /// Config file path.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The config file is not valid.
    #[error("invalid config file {}", path.display())]
    Parse {
        /// Config file path.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: serde_json::Error,
    },
    /// No layer named an input file.
    #[error("no input file given (pass FILE, --input or set QIFXLAT_INPUT)")]
    MissingInput,
}

/// One layer of settings. Keys in a config file are the long option names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Options {
    /// QIF file to read.
    pub input: Option<PathBuf>,
    /// CSV file to create.
    pub output_csv_filename: Option<PathBuf>,
    /// JSON file to create.
    pub output_json_filename: Option<PathBuf>,
    /// Ledger file to create.
    pub output_ledger_filename: Option<PathBuf>,
    /// Log how long each stage took.
    pub show_timing: Option<bool>,
    /// Log at debug level.
    pub verbose: Option<bool>,
}

impl Options {
    /// Load a layer from a JSON config file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, is not JSON, or has unknown keys.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Fill every unset value from `lower`.
    #[must_use]
    pub fn or(self, lower: Self) -> Self {
        Self {
            input: self.input.or(lower.input),
            output_csv_filename: self.output_csv_filename.or(lower.output_csv_filename),
            output_json_filename: self.output_json_filename.or(lower.output_json_filename),
            output_ledger_filename: self.output_ledger_filename.or(lower.output_ledger_filename),
            show_timing: self.show_timing.or(lower.show_timing),
            verbose: self.verbose.or(lower.verbose),
        }
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// QIF file to read.
    pub input: PathBuf,
    /// CSV file to create.
    pub output_csv: Option<PathBuf>,
    /// JSON file to create.
    pub output_json: Option<PathBuf>,
    /// Ledger file to create.
    pub output_ledger: Option<PathBuf>,
    /// Log how long each stage took. Defaults to on.
    pub show_timing: bool,
    /// Log at debug level.
    pub verbose: bool,
}

impl Settings {
    /// Whether any output file was requested.
    #[must_use]
    pub const fn has_output(&self) -> bool {
        self.output_csv.is_some() || self.output_json.is_some() || self.output_ledger.is_some()
    }
}

impl TryFrom<Options> for Settings {
    type Error = ConfigError;

    fn try_from(options: Options) -> Result<Self, Self::Error> {
        Ok(Self {
            input: options.input.ok_or(ConfigError::MissingInput)?,
            output_csv: options.output_csv_filename,
            output_json: options.output_json_filename,
            output_ledger: options.output_ledger_filename,
            show_timing: options.show_timing.unwrap_or(true),
            verbose: options.verbose.unwrap_or(false),
        })
    }
}
