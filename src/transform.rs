//! Derived columns and ordering applied to a category table before it is written.

use crate::model::{Amount, Category, Cell, Table, Timestamp, TransactionType, DATE_FORMAT};
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::str::FromStr;

/// Columns used to order rows that have no `id`, in priority order. Rows are sorted newest first.
const SORT_DATE_COLUMNS: [&str; 4] = [
    "session_date",
    "log_date",
    "transaction_date",
    "snapshot_date",
];

/// Runs every transformation that applies to `category` over `table`.
pub(crate) fn apply(category: Category, table: &mut Table) {
    format_dates(table, category.date_fields());
    match category {
        Category::SleepSessions => calculate_sleep_duration(table),
        Category::Transactions => add_financial_summaries(table),
        _ => {}
    }
    sort_rows(table);
}

/// Whether a field holds a calendar date rather than a point in time.
fn is_date_only(field: &str) -> bool {
    let lower = field.to_lowercase();
    lower.contains("date") && !lower.contains("time")
}

/// Parses each present date field into timestamps and adds a `<field>_readable` column.
///
/// Date-only fields are reduced to their calendar date, and their readable column holds the plain
/// date. A value that could not be parsed gets an empty readable cell, never a `NaT` marker, even
/// when other values in the column parsed.
pub(crate) fn format_dates(table: &mut Table, date_fields: &[&str]) {
    for field in date_fields {
        let Some(cells) = table.column(field) else {
            continue;
        };
        let stamps: Vec<Option<Timestamp>> =
            cells.into_iter().map(Timestamp::from_cell).collect();
        let readable_column = format!("{field}_readable");

        let (values, readable): (Vec<Cell>, Vec<Cell>) = if is_date_only(field) {
            stamps
                .iter()
                .map(|stamp| match stamp {
                    Some(ts) => (
                        Cell::Date(ts.date()),
                        Cell::Text(ts.date().format(DATE_FORMAT).to_string()),
                    ),
                    None => (Cell::Null, Cell::Text(String::new())),
                })
                .unzip()
        } else {
            stamps
                .iter()
                .map(|stamp| match stamp {
                    Some(ts) => (Cell::Timestamp(*ts), Cell::Text(ts.readable())),
                    None => (Cell::Null, Cell::Null),
                })
                .unzip()
        };

        table.set_column(field, values);
        table.set_column(&readable_column, readable);
    }
}

/// Adds `duration_hours`, the time between `sleep_time` and `wake_time` rounded to two decimals.
/// A negative duration, from a bedtime recorded on the wrong side of midnight, gets 24 hours added.
pub(crate) fn calculate_sleep_duration(table: &mut Table) {
    let (Some(sleep), Some(wake)) = (table.column("sleep_time"), table.column("wake_time")) else {
        return;
    };

    let durations: Vec<Cell> = sleep
        .into_iter()
        .zip(wake)
        .map(|(from, to)| match (Timestamp::from_cell(from), Timestamp::from_cell(to)) {
            (Some(from), Some(to)) => Cell::Float(duration_hours(&from, &to)),
            _ => Cell::Null,
        })
        .collect();

    table.set_column("duration_hours", durations);
}

fn duration_hours(sleep: &Timestamp, wake: &Timestamp) -> f64 {
    let hours = (sleep.hours_until(wake) * 100.0).round_ties_even() / 100.0;
    if hours < 0.0 {
        hours + 24.0
    } else {
        hours
    }
}

/// A value of the `amount` column after numeric coercion.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Coerced {
    Int(i64),
    Exact(Amount),
    /// A number too large or too precise for `Amount`.
    Float(f64),
}

impl Coerced {
    /// Reads a number from `cell`. Text must hold the whole number, so `"$5"` or `"1,000"` give
    /// `None`, as does NaN.
    fn from_cell(cell: &Cell) -> Option<Self> {
        let coerced = match cell {
            Cell::Int(i) => Coerced::Int(*i),
            Cell::Amount(a) => Coerced::Exact(*a),
            Cell::Float(f) => Amount::from_cell(cell)
                .map(Coerced::Exact)
                .unwrap_or(Coerced::Float(*f)),
            Cell::Text(s) => {
                let s = s.trim();
                if let Ok(i) = s.parse::<i64>() {
                    Coerced::Int(i)
                } else if let Ok(a) = Amount::from_str(s) {
                    Coerced::Exact(a)
                } else {
                    Coerced::Float(s.parse::<f64>().ok()?)
                }
            }
            _ => return None,
        };
        match coerced {
            Coerced::Float(f) if f.is_nan() => None,
            other => Some(other),
        }
    }

    fn sign(&self) -> Option<Ordering> {
        match self {
            Coerced::Int(i) => Some(i.cmp(&0)),
            Coerced::Exact(a) if a.is_positive() => Some(Ordering::Greater),
            Coerced::Exact(a) if a.is_negative() => Some(Ordering::Less),
            Coerced::Exact(_) => Some(Ordering::Equal),
            Coerced::Float(f) => f.partial_cmp(&0.0),
        }
    }

    /// The value and its absolute value as cells of a floating point column.
    fn float_cells(self) -> (Cell, Cell) {
        match self {
            Coerced::Int(i) => {
                let amount = Amount::from(Decimal::from(i));
                (Cell::Amount(amount), Cell::Amount(amount.abs()))
            }
            Coerced::Exact(a) => (Cell::Amount(a), Cell::Amount(a.abs())),
            Coerced::Float(f) => (Cell::Float(f), Cell::Float(f.abs())),
        }
    }
}

/// Coerces `amount` to a number and adds `transaction_type` and `amount_absolute`.
///
/// The column stays an integer column when every value is a whole number written without a
/// decimal point. Otherwise, including when any value is missing or unparseable, both `amount`
/// and `amount_absolute` are floating point and whole numbers are written as `100.0`.
pub(crate) fn add_financial_summaries(table: &mut Table) {
    let Some(cells) = table.column("amount") else {
        return;
    };
    let coerced: Vec<Option<Coerced>> = cells.into_iter().map(Coerced::from_cell).collect();

    let kinds = coerced
        .iter()
        .map(|c| {
            let sign = c.as_ref().and_then(Coerced::sign);
            Cell::Text(TransactionType::classify(sign).to_string())
        })
        .collect();

    let integers: Option<Vec<(i64, i64)>> = coerced
        .iter()
        .map(|c| match c {
            Some(Coerced::Int(i)) => Some((*i, i.checked_abs()?)),
            _ => None,
        })
        .collect();

    let (amounts, absolute): (Vec<Cell>, Vec<Cell>) = match integers {
        Some(pairs) => pairs
            .into_iter()
            .map(|(value, abs)| (Cell::Int(value), Cell::Int(abs)))
            .unzip(),
        None => coerced
            .into_iter()
            .map(|c| c.map(Coerced::float_cells).unwrap_or_default())
            .unzip(),
    };

    table.set_column("amount", amounts);
    table.set_column("transaction_type", kinds);
    table.set_column("amount_absolute", absolute);
}

/// Orders rows by ascending `id` when present, otherwise newest first by the first available
/// date column. Tables with neither keep their input order.
pub(crate) fn sort_rows(table: &mut Table) {
    if table.has_column("id") {
        table.sort_by_column("id", false);
    } else if let Some(column) = SORT_DATE_COLUMNS.iter().find(|c| table.has_column(c)) {
        table.sort_by_column(column, true);
    }
}
