//! A small column-oriented view over the heterogeneous records of one export category.

use crate::model::Cell;
use crate::Result;
use anyhow::Context;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

/// The rows of one category with a column for every field seen in any record.
///
/// Column order is the order in which fields are first seen, followed by any columns added
/// afterwards. Records that lack a field hold `Cell::Null` in that column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    column_map: HashMap<String, usize>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Builds a table from a list of JSON records. A record that is not an object contributes a
    /// row of nulls so that the row count always matches the record count.
    ///
    /// A column that holds only numbers and nulls is a floating point column as soon as one of its
    /// values is a float or null, so its whole numbers are stored as `Cell::Float` and written as
    /// `650.0`. Columns of non-null integers keep `Cell::Int`.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a Value>) -> Self {
        let mut table = Table::default();
        let mut objects = Vec::new();

        for record in records {
            let object = record.as_object();
            if let Some(object) = object {
                for key in object.keys() {
                    table.push_column(key);
                }
            }
            objects.push(object);
        }

        table.rows = objects
            .into_iter()
            .map(|object| {
                table
                    .columns
                    .iter()
                    .map(|column| {
                        object
                            .and_then(|o| o.get(column))
                            .map(Cell::from)
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect();

        for ix in 0..table.columns.len() {
            table.widen_integers(ix);
        }
        table
    }

    fn widen_integers(&mut self, ix: usize) {
        let cells = || self.rows.iter().map(|row| &row[ix]);
        let numeric = cells().all(|c| matches!(c, Cell::Int(_) | Cell::Float(_) | Cell::Null));
        let has_int = cells().any(|c| matches!(c, Cell::Int(_)));
        let has_gap_or_float = cells().any(|c| matches!(c, Cell::Float(_) | Cell::Null));
        if !(numeric && has_int && has_gap_or_float) {
            return;
        }
        for row in self.rows.iter_mut() {
            if let Cell::Int(i) = row[ix] {
                row[ix] = Cell::Float(i as f64);
            }
        }
    }

    fn push_column(&mut self, name: &str) -> usize {
        if let Some(ix) = self.column_map.get(name) {
            return *ix;
        }
        let ix = self.columns.len();
        self.columns.push(name.to_string());
        self.column_map.insert(name.to_string(), ix);
        ix
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_map.contains_key(name)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.column_map.get(name).copied()
    }

    /// The cells of the named column, top to bottom.
    pub fn column(&self, name: &str) -> Option<Vec<&Cell>> {
        let ix = self.column_index(name)?;
        Some(self.rows.iter().map(|row| &row[ix]).collect())
    }

    /// The cell at `row` in the named column.
    pub fn get(&self, row: usize, name: &str) -> Option<&Cell> {
        let ix = self.column_index(name)?;
        self.rows.get(row).map(|r| &r[ix])
    }

    /// Replaces the values of the named column, appending it as the last column when it does not
    /// exist yet. `values` must have one entry per row.
    pub fn set_column(&mut self, name: &str, values: Vec<Cell>) {
        debug_assert_eq!(values.len(), self.rows.len());
        let existing = self.column_index(name);
        let ix = self.push_column(name);
        for (row, value) in self.rows.iter_mut().zip(values) {
            if existing.is_some() {
                row[ix] = value;
            } else {
                row.push(value);
            }
        }
    }

    /// Stable sort of the rows by the named column. Nulls go last in either direction.
    pub fn sort_by_column(&mut self, name: &str, descending: bool) {
        let Some(ix) = self.column_index(name) else {
            return;
        };
        self.rows.sort_by(|a, b| match (a[ix].is_null(), b[ix].is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) if descending => b[ix].compare(&a[ix]),
            (false, false) => a[ix].compare(&b[ix]),
        });
    }

    /// Writes the header and rows as CSV with `\n` line endings and minimal quoting.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);

        csv.write_record(&self.columns)
            .context("Unable to write CSV header")?;
        for row in &self.rows {
            csv.write_record(row.iter().map(|cell| cell.to_string()))
                .context("Unable to write CSV row")?;
        }
        csv.flush().context("Unable to flush CSV output")?;
        Ok(())
    }

    /// Writes the table to a CSV file at `path`, replacing any existing file.
    pub fn write_csv_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = crate::fs::file(path)?;
        self.write_csv(std::io::BufWriter::new(file))
            .with_context(|| format!("Unable to write CSV file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn csv_string(table: &Table) -> String {
        let mut buf = Vec::new();
        table.write_csv(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_union_of_fields_in_first_seen_order() {
        let records = vec![
            json!({"id": 1, "b": "x"}),
            json!({"id": 2, "c": true}),
            json!({"a": 1.5}),
        ];
        let table = Table::from_records(&records);
        assert_eq!(table.columns(), &["id", "b", "c", "a"]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(0, "c"), Some(&Cell::Null));
        assert_eq!(table.get(1, "c"), Some(&Cell::Bool(true)));
        assert_eq!(table.get(2, "id"), Some(&Cell::Null));
    }

    #[test]
    fn test_non_object_record_is_a_null_row() {
        let records = vec![json!({"id": 1}), json!(42)];
        let table = Table::from_records(&records);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(1, "id"), Some(&Cell::Null));
    }

    #[test]
    fn test_number_columns_with_floats_or_gaps_are_float() {
        let records = vec![
            json!({"calories": 650, "quality": 4, "id": 1}),
            json!({"calories": 420.5, "id": 2}),
        ];
        let table = Table::from_records(&records);
        assert_eq!(table.get(0, "calories"), Some(&Cell::Float(650.0)));
        assert_eq!(
            csv_string(&table),
            "calories,quality,id\n650.0,4.0,1\n420.5,,2\n"
        );
    }

    #[test]
    fn test_explicit_null_makes_number_column_float() {
        let records = vec![json!({"n": 3}), json!({"n": null})];
        let table = Table::from_records(&records);
        assert_eq!(table.get(0, "n"), Some(&Cell::Float(3.0)));
    }

    #[test]
    fn test_mixed_kind_column_keeps_integers() {
        let records = vec![json!({"v": 1}), json!({"v": "x"}), json!({})];
        let table = Table::from_records(&records);
        assert_eq!(table.get(0, "v"), Some(&Cell::Int(1)));
    }

    #[test]
    fn test_all_null_column_is_untouched() {
        let records = vec![json!({"v": null}), json!({"w": 1})];
        let table = Table::from_records(&records);
        assert_eq!(table.get(0, "v"), Some(&Cell::Null));
        assert_eq!(table.get(0, "w"), Some(&Cell::Null));
        assert_eq!(table.get(1, "w"), Some(&Cell::Float(1.0)));
    }

    #[test]
    fn test_set_column_appends_then_replaces() {
        let records = vec![json!({"id": 1}), json!({"id": 2})];
        let mut table = Table::from_records(&records);
        table.set_column("extra", vec![Cell::Int(10), Cell::Int(20)]);
        assert_eq!(table.columns(), &["id", "extra"]);
        table.set_column("id", vec![Cell::Int(5), Cell::Int(6)]);
        assert_eq!(table.columns(), &["id", "extra"]);
        assert_eq!(table.get(1, "id"), Some(&Cell::Int(6)));
        assert_eq!(table.get(1, "extra"), Some(&Cell::Int(20)));
    }

    #[test]
    fn test_sort_nulls_last_both_directions() {
        let records = vec![
            json!({"k": 2}),
            json!({"k": null}),
            json!({"k": 3}),
            json!({"k": 1}),
        ];
        let mut table = Table::from_records(&records);
        table.sort_by_column("k", false);
        let asc: Vec<String> = table.column("k").unwrap().iter().map(|c| c.to_string()).collect();
        assert_eq!(asc, vec!["1.0", "2.0", "3.0", ""]);

        table.sort_by_column("k", true);
        let desc: Vec<String> = table.column("k").unwrap().iter().map(|c| c.to_string()).collect();
        assert_eq!(desc, vec!["3.0", "2.0", "1.0", ""]);
    }

    #[test]
    fn test_sort_is_stable() {
        let records = vec![
            json!({"k": 1, "n": "first"}),
            json!({"k": 0, "n": "zero"}),
            json!({"k": 1, "n": "second"}),
        ];
        let mut table = Table::from_records(&records);
        table.sort_by_column("k", false);
        let names: Vec<String> = table.column("n").unwrap().iter().map(|c| c.to_string()).collect();
        assert_eq!(names, vec!["zero", "first", "second"]);
    }

    #[test]
    fn test_write_csv() {
        let records = vec![
            json!({"id": 1, "note": "hello, world", "ok": true}),
            json!({"id": 2, "note": "say \"hi\""}),
        ];
        let table = Table::from_records(&records);
        assert_eq!(
            csv_string(&table),
            "id,note,ok\n1,\"hello, world\",True\n2,\"say \"\"hi\"\"\",\n"
        );
    }

    #[test]
    fn test_write_csv_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        let table = Table::from_records(&[json!({"id": 1})]);
        table.write_csv_file(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "id\n1\n");
    }
}
