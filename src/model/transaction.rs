use serde::Serialize;
use std::cmp::Ordering;

/// Income/expense classification derived from the sign of a transaction amount.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
#[serde(rename_all = "PascalCase")]
pub enum TransactionType {
    Income,
    Expense,
    /// The amount was zero or could not be read as a number.
    Unknown,
}

serde_plain::derive_display_from_serialize!(TransactionType);

impl TransactionType {
    /// Classifies an amount by how it compares to zero. `None` means there was no number.
    pub fn classify(sign: Option<Ordering>) -> Self {
        match sign {
            Some(Ordering::Greater) => TransactionType::Income,
            Some(Ordering::Less) => TransactionType::Expense,
            _ => TransactionType::Unknown,
        }
    }
}
