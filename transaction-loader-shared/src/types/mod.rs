//! Shared types for the transaction loader.

pub mod transaction_record;
