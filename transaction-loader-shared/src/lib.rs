//! # Transaction Loader Shared
//!
//! This crate defines the document type indexed by the transaction loader,
//! together with the fixed field name lists used to validate and map it.

pub mod types;

pub use types::transaction_record::{
    TransactionRecord, AMOUNT_FIELDS, DATE_FIELDS, TRANSACTION_FIELDS,
};
