//! Types that represent the data being converted, such as `Category`, `Table` and `Amount`.
mod amount;
mod category;
mod cell;
mod table;
mod timestamp;
mod transaction;

pub use amount::{Amount, AmountError};
pub use category::{Category, CategoryConfig};
pub use cell::Cell;
pub use table::Table;
pub use timestamp::{Timestamp, DATE_FORMAT, READABLE_FORMAT};
pub use transaction::TransactionType;
