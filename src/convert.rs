//! The conversion of one export file into a CSV file per category.

use crate::envelope::ExportDocument;
use crate::model::{Category, Table};
use crate::summary::Summary;
use crate::{fs, transform, Result};
use anyhow::bail;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// The CSV file written for each category that had records, in category order.
pub type ExportedFiles = BTreeMap<Category, PathBuf>;

/// Converts a Swarmic JSON export into CSV files.
///
/// The export is loaded and normalized when the `Converter` is created. Nothing is written until
/// `export_to_csv` is called.
#[derive(Debug, Clone)]
pub struct Converter {
    json_path: PathBuf,
    output_dir: PathBuf,
    document: ExportDocument,
}

impl Converter {
    /// Loads the export at `json_path`.
    ///
    /// # Arguments
    /// - `json_path` - The Swarmic JSON export file.
    /// - `output_dir` - Where CSV files are written. Defaults to the directory holding
    ///   `json_path`. It is created when the export is written.
    ///
    /// # Errors
    /// - The JSON file does not exist or cannot be read.
    /// - The file is not valid JSON.
    pub fn new(json_path: impl Into<PathBuf>, output_dir: Option<PathBuf>) -> Result<Self> {
        let json_path = json_path.into();
        if !json_path.exists() {
            bail!("JSON file not found: {}", json_path.display());
        }

        let output_dir = output_dir.unwrap_or_else(|| default_output_dir(&json_path));
        let document = ExportDocument::load(&json_path)?;

        Ok(Self {
            json_path,
            output_dir,
            document,
        })
    }

    pub fn json_path(&self) -> &Path {
        &self.json_path
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn document(&self) -> &ExportDocument {
        &self.document
    }

    /// Writes one CSV file for every category that has at least one record.
    ///
    /// # Errors
    /// - The export has no `data` section. Nothing is written in that case.
    /// - The output directory or a CSV file cannot be written.
    pub fn export_to_csv(&self) -> Result<ExportedFiles> {
        let Some(data) = self.document.data() else {
            bail!("Invalid JSON structure: 'data' section not found");
        };

        fs::create_dir_all(&self.output_dir)?;
        info!("Found {} data categories to export", data.len());

        let mut exported = ExportedFiles::new();
        let total = Category::ALL.len();
        for (ix, category) in Category::ALL.into_iter().enumerate() {
            debug!("Exporting {category} ({}/{total})", ix + 1);
            match self.export_category(category)? {
                Some(path) => {
                    exported.insert(category, path);
                }
                None => info!("{category}: No data found (skipped)"),
            }
        }

        Ok(exported)
    }

    /// Builds, transforms and writes the table for `category`. Returns `None` when the category
    /// has no records.
    fn export_category(&self, category: Category) -> Result<Option<PathBuf>> {
        let Some(records) = self.document.records(category) else {
            return Ok(None);
        };

        let mut table = Table::from_records(records);
        if table.is_empty() {
            return Ok(None);
        }
        transform::apply(category, &mut table);

        let path = self.output_dir.join(category.filename());
        table.write_csv_file(&path)?;
        info!(
            "{category}: {} records -> {}",
            table.len(),
            category.filename()
        );

        Ok(Some(path))
    }

    /// Gathers the summary report for a finished export.
    pub fn summary(&self, exported: &ExportedFiles) -> Result<Summary> {
        Summary::new(
            &self.json_path,
            &self.output_dir,
            &self.document,
            exported,
        )
    }
}

fn default_output_dir(json_path: &Path) -> PathBuf {
    match json_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
