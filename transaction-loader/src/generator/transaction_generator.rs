//! Synthetic transaction record generator.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;
use transaction_loader_shared::TransactionRecord;

use crate::generator::fabricate::{self, pick};

/// Lower bound of every monetary field.
pub const MIN_AMOUNT: f64 = 100.0;
/// Upper bound of every monetary field.
pub const MAX_AMOUNT: f64 = 10_000.0;
/// Transaction dates fall between this many days and one day before now.
pub const MAX_AGE_DAYS: i64 = 95;

const ACCOUNT_POOL_SIZE: usize = 50;
const CUSTOMER_REF_POOL_SIZE: usize = 10;

const CURRENCIES: [&str; 4] = ["USD", "EUR", "GBP", "JPY"];
const TRANSACTION_TYPES: [&str; 3] = ["TRANSFER", "WITHDRAWAL", "DEPOSIT"];
const ACCOUNT_STATUSES: [&str; 2] = ["Active", "Inactive"];
const ACCOUNT_TYPES: [&str; 2] = ["Business", "Personal"];
const CLEARED_STATUSES: [&str; 2] = ["Cleared", "Pending"];
const DEBIT_CREDIT: [&str; 2] = ["CR", "DB"];
const BANK_REFS: [&str; 3] = ["BankRef001", "BankRef002", "BankRef003"];
const IBAN_VALUES: [&str; 3] = ["IBAN123", "IBAN456", "IBAN789"];
const SOURCE_IDENTIFIER: &str = "BCBS";

/// Round to two decimal places.
fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Generates fully populated [`TransactionRecord`]s.
///
/// Account numbers and customer references are drawn from small pools built
/// at construction, so the same accounts recur across records. Generation
/// never fails.
pub struct TransactionGenerator<R: Rng = StdRng> {
    rng: R,
    account_numbers: Vec<String>,
    customer_refs: Vec<String>,
}

impl TransactionGenerator<StdRng> {
    /// Create a generator seeded from OS entropy.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create a reproducible generator from a seed.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for TransactionGenerator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> TransactionGenerator<R> {
    /// Create a generator drawing from the given RNG.
    pub fn with_rng(mut rng: R) -> Self {
        let account_numbers = (0..ACCOUNT_POOL_SIZE)
            .map(|_| rng.gen_range(100_000_000_000u64..=999_999_999_999).to_string())
            .collect();
        let customer_refs = (0..CUSTOMER_REF_POOL_SIZE)
            .map(|_| format!("CustRef{}", rng.gen_range(10_000..=99_999)))
            .collect();

        debug!(
            accounts = ACCOUNT_POOL_SIZE,
            customer_refs = CUSTOMER_REF_POOL_SIZE,
            "Built transaction generator pools"
        );

        Self {
            rng,
            account_numbers,
            customer_refs,
        }
    }

    /// Generate a record dated relative to the current time.
    pub fn generate(&mut self) -> TransactionRecord {
        self.generate_at(Utc::now())
    }

    /// Generate a record dated relative to `now`.
    ///
    /// One transaction date is sampled per record and written to every date
    /// field in the same format.
    pub fn generate_at(&mut self, now: DateTime<Utc>) -> TransactionRecord {
        let age_days = self.rng.gen_range(1..=MAX_AGE_DAYS);
        let txn_date = (now - Duration::days(age_days)).to_rfc3339_opts(SecondsFormat::Micros, true);

        let rng = &mut self.rng;
        let account_number = self.account_numbers[rng.gen_range(0..self.account_numbers.len())].clone();
        let customer_reference = self.customer_refs[rng.gen_range(0..self.customer_refs.len())].clone();

        TransactionRecord {
            account_number,
            account_name: fabricate::company(rng),
            account_status: pick(rng, &ACCOUNT_STATUSES).to_string(),
            account_type: pick(rng, &ACCOUNT_TYPES).to_string(),
            amount: round_cents(rng.gen_range(MIN_AMOUNT..=MAX_AMOUNT)),
            bank_identifier: fabricate::bban(rng),
            bank_reference: pick(rng, &BANK_REFS).to_string(),
            currency: pick(rng, &CURRENCIES).to_string(),
            cheque_number: format!("CHQ{}", rng.gen_range(1000..=9999)),
            payment_info_id: fabricate::uuid(rng),
            cleared_file_date: txn_date.clone(),
            cleared_interest_date: txn_date.clone(),
            cleared_status: pick(rng, &CLEARED_STATUSES).to_string(),
            counterparty_account_number: fabricate::iban(rng),
            counterparty_bank_code: fabricate::swift(rng),
            counterparty_name: fabricate::company(rng),
            credit_amount: round_cents(rng.gen_range(MIN_AMOUNT..=MAX_AMOUNT)),
            customer_reference,
            debit_amount: round_cents(rng.gen_range(MIN_AMOUNT..=MAX_AMOUNT)),
            debit_credit_indicator: pick(rng, &DEBIT_CREDIT).to_string(),
            entry_created_at: txn_date.clone(),
            entry_date: txn_date.clone(),
            iban: pick(rng, &IBAN_VALUES).to_string(),
            input_date: txn_date.clone(),
            input_time: fabricate::time_of_day(rng),
            narrative_1: fabricate::sentence(rng),
            narrative_2: fabricate::sentence(rng),
            narrative_line_1: fabricate::sentence(rng),
            narrative_line_2: fabricate::sentence(rng),
            narrative_line_3: fabricate::sentence(rng),
            narrative_line_4: fabricate::sentence(rng),
            number_of_transactions: rng.gen_range(1..=500),
            offset_account_tag: fabricate::word(rng),
            proprietary_type: fabricate::word(rng),
            reason: fabricate::sentence(rng),
            source_identifier: SOURCE_IDENTIFIER.to_string(),
            source_system_reference: fabricate::uuid(rng),
            transaction_code_description: fabricate::word(rng),
            transaction_code: fabricate::word(rng),
            transaction_details: fabricate::sentence(rng),
            transaction_entry_date: txn_date.clone(),
            transaction_type: pick(rng, &TRANSACTION_TYPES).to_string(),
            value_date: txn_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashSet;
    use transaction_loader_shared::TRANSACTION_FIELDS;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_amounts_in_range_with_two_decimals() {
        let mut generator = TransactionGenerator::seeded(1);
        for _ in 0..500 {
            let record = generator.generate_at(fixed_now());
            for amount in record.amounts() {
                assert!((MIN_AMOUNT..=MAX_AMOUNT).contains(&amount), "{}", amount);
                assert_eq!(round_cents(amount), amount);
            }
        }
    }

    #[test]
    fn test_date_fields_share_one_date() {
        let mut generator = TransactionGenerator::seeded(2);
        let now = fixed_now();
        for _ in 0..200 {
            let record = generator.generate_at(now);
            let dates = record.date_values();
            assert!(dates.iter().all(|d| *d == dates[0]));

            let parsed = DateTime::parse_from_rfc3339(dates[0]).unwrap().with_timezone(&Utc);
            let age = now - parsed;
            assert!(age >= Duration::days(1) && age <= Duration::days(MAX_AGE_DAYS));
        }
    }

    #[test]
    fn test_categorical_fields_use_enumerations() {
        let mut generator = TransactionGenerator::seeded(3);
        for _ in 0..200 {
            let record = generator.generate_at(fixed_now());
            assert!(CURRENCIES.contains(&record.currency.as_str()));
            assert!(TRANSACTION_TYPES.contains(&record.transaction_type.as_str()));
            assert!(ACCOUNT_STATUSES.contains(&record.account_status.as_str()));
            assert!(ACCOUNT_TYPES.contains(&record.account_type.as_str()));
            assert!(CLEARED_STATUSES.contains(&record.cleared_status.as_str()));
            assert!(DEBIT_CREDIT.contains(&record.debit_credit_indicator.as_str()));
            assert!(BANK_REFS.contains(&record.bank_reference.as_str()));
            assert!(IBAN_VALUES.contains(&record.iban.as_str()));
            assert_eq!(record.source_identifier, SOURCE_IDENTIFIER);
            assert!((1..=500).contains(&record.number_of_transactions));
        }
    }

    #[test]
    fn test_identifier_formats() {
        let mut generator = TransactionGenerator::seeded(4);
        let record = generator.generate_at(fixed_now());

        assert_eq!(record.account_number.len(), 12);
        assert!(record.account_number.chars().all(|c| c.is_ascii_digit()));
        assert!(record.cheque_number.starts_with("CHQ"));
        assert_eq!(record.cheque_number.len(), 7);
        assert!(record.customer_reference.starts_with("CustRef"));
        assert!(uuid::Uuid::parse_str(&record.payment_info_id).is_ok());
        assert!(uuid::Uuid::parse_str(&record.source_system_reference).is_ok());
    }

    #[test]
    fn test_accounts_come_from_fixed_pool() {
        let mut generator = TransactionGenerator::seeded(5);
        let accounts: HashSet<String> = (0..2_000)
            .map(|_| generator.generate_at(fixed_now()).account_number)
            .collect();
        assert!(accounts.len() <= ACCOUNT_POOL_SIZE);

        let refs: HashSet<String> = (0..500)
            .map(|_| generator.generate_at(fixed_now()).customer_reference)
            .collect();
        assert!(refs.len() <= CUSTOMER_REF_POOL_SIZE);
    }

    #[test]
    fn test_every_field_present_and_populated() {
        let mut generator = TransactionGenerator::seeded(6);
        for _ in 0..200 {
            let value = serde_json::to_value(generator.generate_at(fixed_now())).unwrap();
            let object = value.as_object().unwrap();

            assert_eq!(object.len(), TRANSACTION_FIELDS.len());
            for field in TRANSACTION_FIELDS {
                let field_value = object
                    .get(field)
                    .unwrap_or_else(|| panic!("{} missing", field));
                assert!(!field_value.is_null(), "{} is null", field);
                if let Some(text) = field_value.as_str() {
                    assert!(!text.trim().is_empty(), "{} is empty", field);
                }
            }
        }
    }

    #[test]
    fn test_same_seed_same_records() {
        let mut a = TransactionGenerator::seeded(99);
        let mut b = TransactionGenerator::seeded(99);
        assert_eq!(a.generate_at(fixed_now()), b.generate_at(fixed_now()));
    }
}
