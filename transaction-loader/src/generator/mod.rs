//! Record generator for the transaction loader.
//!
//! Produces synthetic transaction records with independently sampled fields.

pub mod fabricate;
mod transaction_generator;

pub use transaction_generator::{TransactionGenerator, MAX_AGE_DAYS, MAX_AMOUNT, MIN_AMOUNT};
