//! Amount type for the numeric `amount` field of finance transactions.
//!
//! This module provides the `Amount` type which wraps `Decimal` so that values such as `"-42.50"`
//! keep their exact decimal representation instead of picking up binary floating point noise
//! when the absolute value is derived from them.

use crate::model::Cell;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Represents a transaction amount.
///
/// An `Amount` cell belongs to a floating point column, so it is written the way such a column is:
/// trailing zeros are dropped and whole numbers keep a single `.0`. Columns where every amount is a
/// plain integer hold `Cell::Int` instead.
///
/// # Examples
///
/// ```
/// # use swarmic_csv::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("-42.50").unwrap();
/// assert_eq!(amount.to_string(), "-42.5");
/// assert_eq!(amount.abs().to_string(), "42.5");
/// ```
///
/// ```
/// # use swarmic_csv::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("100").unwrap();
/// assert_eq!(amount.to_string(), "100.0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount {
    value: Decimal,
}

impl Amount {
    /// Creates a new Amount from a Decimal value.
    pub const fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.value().is_zero()
    }

    /// Returns true if the amount is positive.
    pub fn is_positive(&self) -> bool {
        !self.is_zero() && self.value().is_sign_positive()
    }

    /// Returns true if the amount is negative.
    pub fn is_negative(&self) -> bool {
        !self.is_zero() && self.value().is_sign_negative()
    }

    /// Returns the absolute value of the amount.
    pub fn abs(&self) -> Self {
        Self::new(self.value().abs())
    }

    /// Returns the amount as an `f64`, used when comparing against other numeric cells.
    pub fn to_f64(&self) -> f64 {
        self.value().to_f64().unwrap_or_default()
    }

    /// Coerces a table cell into an `Amount`. Anything that is not a finite number, or a string
    /// holding one, becomes `None`, as does a number outside the range of `Decimal`.
    pub fn from_cell(cell: &Cell) -> Option<Self> {
        match cell {
            Cell::Amount(amount) => Some(*amount),
            Cell::Int(i) => Some(Self::new(Decimal::from(*i))),
            Cell::Float(f) => Decimal::try_from(*f).ok().map(Self::new),
            Cell::Text(s) => Self::from_str(s).ok(),
            _ => None,
        }
    }
}

/// An error that can occur when parsing strings into `Decimal` values.
pub struct AmountError(rust_decimal::Error);

impl Debug for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl std::error::Error for AmountError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        // Plain decimal first, then scientific notation such as "1.5e3"
        let value = match Decimal::from_str(trimmed) {
            Ok(value) => value,
            Err(e) => Decimal::from_scientific(trimmed).map_err(|_| AmountError(e))?,
        };

        Ok(Amount::new(value))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0.0");
        }
        let num = self.value().normalize();
        if num.scale() == 0 {
            write!(f, "{num}.0")
        } else {
            write!(f, "{num}")
        }
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}
