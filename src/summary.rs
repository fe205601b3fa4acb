//! The report printed after an export.

use crate::convert::ExportedFiles;
use crate::envelope::ExportDocument;
use crate::model::Category;
use crate::{fs, Result};
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const RULE: &str = "============================================================";

/// Record counts and output files of a finished export.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    source: PathBuf,
    exported_at: Option<String>,
    version: Option<String>,
    /// Categories with at least one record.
    categories: Vec<CategoryCount>,
    /// Records across every category, including ones not written.
    total_records: usize,
    output_dir: PathBuf,
    files: Vec<GeneratedFile>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: Category,
    pub records: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub name: String,
    pub bytes: u64,
}

impl GeneratedFile {
    pub fn kilobytes(&self) -> f64 {
        self.bytes as f64 / 1024.0
    }
}

impl Summary {
    pub(crate) fn new(
        source: &Path,
        output_dir: &Path,
        document: &ExportDocument,
        exported: &ExportedFiles,
    ) -> Result<Self> {
        let mut categories = Vec::new();
        let mut total_records = 0;
        for category in Category::ALL {
            if !document.contains(category) {
                continue;
            }
            let records = document.record_count(category);
            total_records += records;
            if records > 0 {
                categories.push(CategoryCount { category, records });
            }
        }

        let files = exported
            .values()
            .map(|path| -> Result<GeneratedFile> {
                Ok(GeneratedFile {
                    name: path
                        .file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_default(),
                    bytes: fs::file_size(path)?,
                })
            })
            .collect::<Result<Vec<GeneratedFile>>>()?;

        Ok(Self {
            source: source.to_path_buf(),
            exported_at: document.exported_at().map(String::from),
            version: document.version().map(String::from),
            categories,
            total_records,
            output_dir: output_dir.to_path_buf(),
            files,
        })
    }

    pub fn categories(&self) -> &[CategoryCount] {
        &self.categories
    }

    pub fn total_records(&self) -> usize {
        self.total_records
    }

    pub fn files(&self) -> &[GeneratedFile] {
        &self.files
    }
}

impl Display for Summary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{RULE}")?;
        writeln!(f, "EXPORT SUMMARY REPORT")?;
        writeln!(f, "{RULE}")?;
        writeln!(f)?;
        writeln!(f, "Source File: {}", self.source.display())?;
        writeln!(
            f,
            "Export Date: {}",
            self.exported_at.as_deref().unwrap_or("Unknown")
        )?;
        writeln!(f, "Version: {}", self.version.as_deref().unwrap_or("Unknown"))?;
        writeln!(f)?;
        writeln!(f, "Export Statistics:")?;
        for count in &self.categories {
            writeln!(
                f,
                "  - {}: {} records",
                count.category,
                group_thousands(count.records)
            )?;
            writeln!(f, "    {}", count.category.description())?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "Total Records Exported: {}",
            group_thousands(self.total_records)
        )?;
        writeln!(f)?;
        writeln!(f, "Output Directory: {}", self.output_dir.display())?;
        writeln!(f, "Generated Files:")?;
        for file in &self.files {
            writeln!(f, "  - {} ({:.1} KB)", file.name, file.kilobytes())?;
        }
        writeln!(f)?;
        writeln!(f, "Export completed successfully!")?;
        write!(f, "{RULE}")
    }
}

/// Inserts a comma between every group of three digits, e.g. `1234567` -> `1,234,567`.
fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;
    use crate::Converter;
    use serde_json::json;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_summary_counts() {
        let env = TestEnv::new();
        let path = env.write_json("export.json", &TestEnv::sample_export());
        let converter = Converter::new(path, Some(env.path("out"))).unwrap();
        let exported = converter.export_to_csv().unwrap();
        let summary = converter.summary(&exported).unwrap();

        let counts: Vec<(Category, usize)> = summary
            .categories()
            .iter()
            .map(|c| (c.category, c.records))
            .collect();
        assert_eq!(
            counts,
            vec![
                (Category::SleepSessions, 2),
                (Category::CaloriesEntries, 2),
                (Category::Transactions, 3),
                (Category::NetWorthDaily, 2),
            ]
        );
        assert_eq!(summary.total_records(), 9);
        assert_eq!(summary.files().len(), 4);
        assert!(summary.files().iter().all(|f| f.bytes > 0));
    }

    #[test]
    fn test_summary_display() {
        let env = TestEnv::new();
        let path = env.write_json(
            "export.json",
            &json!({"data": {"net_worth_daily": [{"snapshot_date": "2025-10-22", "net_worth": 1}]}}),
        );
        let converter = Converter::new(path, Some(env.path("out"))).unwrap();
        let exported = converter.export_to_csv().unwrap();
        let text = converter.summary(&exported).unwrap().to_string();

        assert!(text.starts_with(RULE));
        assert!(text.contains("Export Date: Unknown"));
        assert!(text.contains("Version: Unknown"));
        assert!(text.contains("  - net_worth_daily: 1 records\n    Daily net worth snapshots"));
        assert!(text.contains("Total Records Exported: 1\n"));
        assert!(text.contains("  - net_worth_daily.csv (0.1 KB)"));
        assert!(!text.contains("sleep_sessions"));
    }
}
