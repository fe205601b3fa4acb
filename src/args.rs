//! These structs provide the CLI interface for the convert CLI.

use clap::Parser;
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing_subscriber::filter::LevelFilter;

/// convert: Converts a Swarmic JSON export to CSV files.
///
/// Each data category in the export (sleep, calories, exercise, bodyweight, finance transactions
/// and daily net worth) is written to its own CSV file, with readable date columns and a few
/// derived columns such as sleep duration and income/expense classification.
///
/// Examples:
///
///   convert swarmic_export_2025-10-24.json
///
///   convert export.json ./csv_output --no-summary
#[derive(Debug, Parser, Clone)]
#[command(name = "convert", version)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    /// Path to the Swarmic JSON export file.
    json_file: DisplayPath,

    /// Output directory for CSV files. Defaults to the directory holding the JSON file.
    output_dir: Option<DisplayPath>,

    /// Skip the summary report after export.
    #[arg(long)]
    no_summary: bool,
}

impl Args {
    pub fn new(
        common: Common,
        json_file: impl Into<PathBuf>,
        output_dir: Option<PathBuf>,
        no_summary: bool,
    ) -> Self {
        Self {
            common,
            json_file: DisplayPath::from(json_file.into()),
            output_dir: output_dir.map(DisplayPath::from),
            no_summary,
        }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn json_file(&self) -> &DisplayPath {
        &self.json_file
    }

    pub fn output_dir(&self) -> Option<&DisplayPath> {
        self.output_dir.as_ref()
    }

    pub fn no_summary(&self) -> bool {
        self.no_summary
    }
}

/// Arguments that control the program rather than the conversion.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG. See the tracing-subscriber EnvFilter documentation.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,
}

impl Common {
    pub fn new(log_level: LevelFilter) -> Self {
        Self { log_level }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}
