//! Type definitions for the fraud verdict service

pub mod transaction;
pub mod verdict;

pub use transaction::{TransactionRecord, TransactionType};
pub use verdict::Verdict;
