//! Command-line argument definitions for sheet-export
//!
//! Defines the CLI interface using the clap derive API. Global flags
//! (configuration file, verbosity) sit on [`Args`]; each subcommand carries
//! its own arguments.

use crate::constants::{
    ACCESS_TOKEN_ENV, API_KEY_ENV, CREDENTIAL_FILE_ENV, DEFAULT_CONFIG_FILE,
    DEFAULT_CREDENTIAL_FILE, DEFAULT_OUTPUT_DIR, SPREADSHEET_ID_ENV,
};
use crate::fetch::{Credentials, FetchMode};
use crate::output::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Export spreadsheet tabs into typed YAML or JSON records
///
/// Every configured sheet is matched against its declared column schema and
/// each cell is coerced to the column's type. Cells that cannot be coerced
/// are omitted from their record and logged.
#[derive(Debug, Clone, Parser)]
#[command(name = "sheet-export", version, about, long_about = None)]
pub struct Args {
    /// Configuration file declaring sheets and their columns
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        default_value = DEFAULT_CONFIG_FILE,
        global = true
    )]
    pub config_file: PathBuf,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose", global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Load and validate the configuration file
    Validate,
    /// Fetch the spreadsheet and write one file per configured sheet
    Export(ExportArgs),
}

/// Arguments for the export command
#[derive(Debug, Clone, Parser)]
pub struct ExportArgs {
    /// Spreadsheet id, as it appears in the spreadsheet URL
    #[arg(long = "id", value_name = "ID", env = SPREADSHEET_ID_ENV)]
    pub spreadsheet_id: String,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,

    /// Directory the sheet files are written to
    #[arg(short = 'd', long = "dir", value_name = "PATH", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Read a saved Sheets API response instead of calling the API
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// OAuth2 access token for the Sheets API; takes precedence over an API key
    #[arg(long = "token", value_name = "TOKEN", env = ACCESS_TOKEN_ENV, hide_env_values = true)]
    pub token: Option<String>,

    /// API key for publicly readable spreadsheets
    #[arg(long = "api-key", value_name = "KEY", env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Service-account key file, used when neither a token nor an API key is given
    #[arg(
        long = "credential",
        value_name = "FILE",
        env = CREDENTIAL_FILE_ENV,
        default_value = DEFAULT_CREDENTIAL_FILE
    )]
    pub credential: PathBuf,

    /// Request unformatted values only; number formats are not available
    #[arg(long = "values-only")]
    pub values_only: bool,
}

impl Args {
    /// Log level derived from `-v` count, `--quiet` forces errors only
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn", // Coercion failures and retries only
                1 => "info",  // Fetch progress and files written
                2 => "debug", // Requests and header rows
                _ => "trace",
            }
        }
    }

    /// Progress spinners are hidden in quiet mode
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl ExportArgs {
    /// Credentials for the HTTP fetcher; only needed without `--input`.
    /// A token wins over an API key, and either wins over the key file.
    pub fn credentials(&self) -> Credentials {
        match (&self.token, &self.api_key) {
            (Some(token), _) => Credentials::AccessToken(token.clone()),
            (None, Some(key)) => Credentials::ApiKey(key.clone()),
            (None, None) => Credentials::ServiceAccountFile(self.credential.clone()),
        }
    }

    pub fn fetch_mode(&self) -> FetchMode {
        if self.values_only {
            FetchMode::ValuesOnly
        } else {
            FetchMode::Grid
        }
    }
}
