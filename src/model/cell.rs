use crate::model::timestamp::DATE_FORMAT;
use crate::model::{Amount, Timestamp};
use chrono::NaiveDate;
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

/// A single value in a category table.
///
/// Cells start out as a direct translation of the JSON scalars found in the export and are
/// replaced by richer variants (`Timestamp`, `Date`, `Amount`) as the derived columns are built.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Amount(Amount),
    Text(String),
    Timestamp(Timestamp),
    Date(NaiveDate),
}

impl Cell {
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// Compares two non-null cells for sorting. Numbers compare numerically with each other,
    /// dates and timestamps compare chronologically with each other, and otherwise cells of
    /// different kinds order as booleans, numbers, dates, text.
    pub fn compare(&self, other: &Cell) -> Ordering {
        match (self, other) {
            (Cell::Bool(a), Cell::Bool(b)) => a.cmp(b),
            (Cell::Int(a), Cell::Int(b)) => a.cmp(b),
            (Cell::Amount(a), Cell::Amount(b)) => a.cmp(b),
            (Cell::Text(a), Cell::Text(b)) => a.cmp(b),
            (Cell::Date(a), Cell::Date(b)) => a.cmp(b),
            (Cell::Timestamp(a), Cell::Timestamp(b)) => a.cmp(b),
            (Cell::Date(a), Cell::Timestamp(b)) => Timestamp::from(*a).cmp(b),
            (Cell::Timestamp(a), Cell::Date(b)) => a.cmp(&Timestamp::from(*b)),
            (a, b) => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
                _ => a.kind_rank().cmp(&b.kind_rank()),
            },
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Int(i) => Some(*i as f64),
            Cell::Float(f) => Some(*f),
            Cell::Amount(a) => Some(a.to_f64()),
            _ => None,
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            Cell::Null => 4,
            Cell::Bool(_) => 0,
            Cell::Int(_) | Cell::Float(_) | Cell::Amount(_) => 1,
            Cell::Timestamp(_) | Cell::Date(_) => 2,
            Cell::Text(_) => 3,
        }
    }
}

impl From<&Value> for Cell {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Cell::Null,
            Value::Bool(b) => Cell::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Cell::Int(i),
                None => n.as_f64().map(Cell::Float).unwrap_or(Cell::Null),
            },
            Value::String(s) => Cell::Text(s.clone()),
            // Nested structures are kept as compact JSON text.
            Value::Array(_) | Value::Object(_) => Cell::Text(value.to_string()),
        }
    }
}

impl Display for Cell {
    /// The text written to a CSV field.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Null => Ok(()),
            Cell::Bool(true) => write!(f, "True"),
            Cell::Bool(false) => write!(f, "False"),
            Cell::Int(i) => write!(f, "{i}"),
            Cell::Float(x) => write!(f, "{}", format_float(*x)),
            Cell::Amount(a) => write!(f, "{a}"),
            Cell::Text(s) => write!(f, "{s}"),
            Cell::Timestamp(ts) => write!(f, "{ts}"),
            Cell::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
        }
    }
}

/// Formats a float so that whole numbers keep one decimal place, e.g. `8.0`, and other values use
/// the shortest representation that round-trips. Magnitudes from `1e16` up, or below `1e-4`, are
/// written in exponent form with a signed two digit exponent, e.g. `1e+30` or `1.5e-05`.
fn format_float(x: f64) -> String {
    if x.is_nan() {
        String::new()
    } else if x.is_infinite() {
        String::from(if x > 0.0 { "inf" } else { "-inf" })
    } else if x != 0.0 && (x.abs() >= 1e16 || x.abs() < 1e-4) {
        exponent_notation(x)
    } else if x.fract() == 0.0 {
        format!("{x:.1}")
    } else {
        format!("{x}")
    }
}

fn exponent_notation(x: f64) -> String {
    let formatted = format!("{x:e}");
    let Some((mantissa, exponent)) = formatted.split_once('e') else {
        return formatted;
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{mantissa}e{sign}{digits:0>2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn test_from_json() {
        assert_eq!(Cell::from(&json!(null)), Cell::Null);
        assert_eq!(Cell::from(&json!(true)), Cell::Bool(true));
        assert_eq!(Cell::from(&json!(7)), Cell::Int(7));
        assert_eq!(Cell::from(&json!(7.5)), Cell::Float(7.5));
        assert_eq!(Cell::from(&json!("x")), Cell::Text(String::from("x")));
        assert_eq!(
            Cell::from(&json!({"a": [1, 2]})),
            Cell::Text(String::from(r#"{"a":[1,2]}"#))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Cell::Null.to_string(), "");
        assert_eq!(Cell::Bool(false).to_string(), "False");
        assert_eq!(Cell::Int(-3).to_string(), "-3");
        assert_eq!(Cell::Float(8.0).to_string(), "8.0");
        assert_eq!(Cell::Float(7.25).to_string(), "7.25");
        assert_eq!(Cell::Float(f64::NAN).to_string(), "");
        assert_eq!(Cell::Float(0.0).to_string(), "0.0");
        assert_eq!(
            Cell::Amount(Amount::from_str("-42.50").unwrap()).to_string(),
            "-42.5"
        );
        assert_eq!(
            Cell::Date(NaiveDate::from_ymd_opt(2025, 1, 2).unwrap()).to_string(),
            "2025-01-02"
        );
    }

    #[test]
    fn test_display_exponent_form() {
        assert_eq!(Cell::Float(1e30).to_string(), "1e+30");
        assert_eq!(Cell::Float(-2.5e16).to_string(), "-2.5e+16");
        assert_eq!(Cell::Float(1.5e-5).to_string(), "1.5e-05");
        assert_eq!(Cell::Float(1e300).to_string(), "1e+300");
        assert_eq!(Cell::Float(9999999999999998.0).to_string(), "9999999999999998.0");
        assert_eq!(Cell::Float(0.0001).to_string(), "0.0001");
    }

    #[test]
    fn test_compare_numbers_across_kinds() {
        assert_eq!(Cell::Int(2).compare(&Cell::Float(1.5)), Ordering::Greater);
        assert_eq!(
            Cell::Amount(Amount::from_str("3").unwrap()).compare(&Cell::Int(3)),
            Ordering::Equal
        );
    }

    #[test]
    fn test_compare_date_and_timestamp() {
        let date = Cell::Date(NaiveDate::from_ymd_opt(2025, 1, 2).unwrap());
        let ts = Cell::Timestamp(Timestamp::parse("2025-01-01T23:00:00").unwrap());
        assert_eq!(date.compare(&ts), Ordering::Greater);
    }

    #[test]
    fn test_compare_mixed_kinds() {
        let text = Cell::Text(String::from("10"));
        assert_eq!(Cell::Int(99).compare(&text), Ordering::Less);
        assert_eq!(text.compare(&Cell::Bool(true)), Ordering::Greater);
    }
}
