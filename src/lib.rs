//! Converts a Swarmic JSON data export into one CSV file per data category.
//!
//! The conversion can be driven from code as well as from the `convert` binary:
//!
//! ```no_run
//! use swarmic_csv::Converter;
//!
//! # fn main() -> swarmic_csv::Result<()> {
//! let converter = Converter::new("swarmic_export.json", Some("./csv_exports".into()))?;
//! let exported = converter.export_to_csv()?;
//! println!("{}", converter.summary(&exported)?);
//! # Ok(())
//! # }
//! ```

pub mod args;
pub mod commands;
mod convert;
mod envelope;
mod error;
mod fs;
pub mod model;
mod summary;
mod transform;


pub use convert::{Converter, ExportedFiles};
pub use envelope::ExportDocument;
pub use error::{Error, Result};
pub use summary::{CategoryCount, GeneratedFile, Summary};
