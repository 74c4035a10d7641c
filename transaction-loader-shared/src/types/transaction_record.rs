//! Transaction record document type.
//!
//! This module defines the flat document that is generated and indexed into
//! the search engine. Field names on the wire follow the core banking export
//! the index was designed for, not Rust naming.

use serde::{Deserialize, Serialize};

/// Every field name of a serialized [`TransactionRecord`], in declaration order.
pub const TRANSACTION_FIELDS: [&str; 43] = [
    "AccNmbr",
    "AccName",
    "AccEntrStsFlg",
    "AccTyp",
    "Amt",
    "BnkIdfr",
    "BnkRef",
    "Ccy",
    "ChqNo",
    "ChqPmtInfId",
    "ClrdFteDt",
    "ClrdOfIntrstDte",
    "ClrdStats",
    "CntrPrtyAccNo",
    "CntrPrtyBnkSrtCde",
    "CntrPrtyNme",
    "CrAmt",
    "CstmrRef",
    "DbAmt",
    "DbCreInd",
    "EntCrtdDtTm",
    "EntrDte",
    "Iban",
    "InpDt",
    "InpTm",
    "Narrative1",
    "Narrative2",
    "NartvLn1",
    "NartvLn2",
    "NartvLn3",
    "NartvLn4",
    "NmbrOfTxn",
    "OfsAccHTag",
    "PrtryTp",
    "Rsn",
    "SrcIdr",
    "SrcSysTrnRef",
    "TransCdeDsc",
    "TrnCd9",
    "TxnDtls",
    "TxnEntDte",
    "TxnTyp",
    "ValDte",
];

/// Fields that carry the record's transaction date.
pub const DATE_FIELDS: [&str; 7] = [
    "ClrdFteDt",
    "ClrdOfIntrstDte",
    "EntCrtdDtTm",
    "EntrDte",
    "InpDt",
    "TxnEntDte",
    "ValDte",
];

/// Monetary fields, always rounded to two decimal places.
pub const AMOUNT_FIELDS: [&str; 3] = ["Amt", "CrAmt", "DbAmt"];

/// A single synthetic financial transaction.
///
/// Every field is always populated. Date fields hold an ISO-8601 timestamp
/// and, within one record, all hold the same value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionRecord {
    #[serde(rename = "AccNmbr")]
    pub account_number: String,
    #[serde(rename = "AccName")]
    pub account_name: String,
    /// `Active` or `Inactive`.
    #[serde(rename = "AccEntrStsFlg")]
    pub account_status: String,
    /// `Business` or `Personal`.
    #[serde(rename = "AccTyp")]
    pub account_type: String,
    #[serde(rename = "Amt")]
    pub amount: f64,
    #[serde(rename = "BnkIdfr")]
    pub bank_identifier: String,
    #[serde(rename = "BnkRef")]
    pub bank_reference: String,
    /// ISO 4217 currency code.
    #[serde(rename = "Ccy")]
    pub currency: String,
    #[serde(rename = "ChqNo")]
    pub cheque_number: String,
    #[serde(rename = "ChqPmtInfId")]
    pub payment_info_id: String,
    #[serde(rename = "ClrdFteDt")]
    pub cleared_file_date: String,
    #[serde(rename = "ClrdOfIntrstDte")]
    pub cleared_interest_date: String,
    /// `Cleared` or `Pending`.
    #[serde(rename = "ClrdStats")]
    pub cleared_status: String,
    #[serde(rename = "CntrPrtyAccNo")]
    pub counterparty_account_number: String,
    #[serde(rename = "CntrPrtyBnkSrtCde")]
    pub counterparty_bank_code: String,
    #[serde(rename = "CntrPrtyNme")]
    pub counterparty_name: String,
    #[serde(rename = "CrAmt")]
    pub credit_amount: f64,
    #[serde(rename = "CstmrRef")]
    pub customer_reference: String,
    #[serde(rename = "DbAmt")]
    pub debit_amount: f64,
    /// `CR` or `DB`.
    #[serde(rename = "DbCreInd")]
    pub debit_credit_indicator: String,
    #[serde(rename = "EntCrtdDtTm")]
    pub entry_created_at: String,
    #[serde(rename = "EntrDte")]
    pub entry_date: String,
    #[serde(rename = "Iban")]
    pub iban: String,
    #[serde(rename = "InpDt")]
    pub input_date: String,
    /// Time of day, `HH:MM:SS`.
    #[serde(rename = "InpTm")]
    pub input_time: String,
    #[serde(rename = "Narrative1")]
    pub narrative_1: String,
    #[serde(rename = "Narrative2")]
    pub narrative_2: String,
    #[serde(rename = "NartvLn1")]
    pub narrative_line_1: String,
    #[serde(rename = "NartvLn2")]
    pub narrative_line_2: String,
    #[serde(rename = "NartvLn3")]
    pub narrative_line_3: String,
    #[serde(rename = "NartvLn4")]
    pub narrative_line_4: String,
    #[serde(rename = "NmbrOfTxn")]
    pub number_of_transactions: u32,
    #[serde(rename = "OfsAccHTag")]
    pub offset_account_tag: String,
    #[serde(rename = "PrtryTp")]
    pub proprietary_type: String,
    #[serde(rename = "Rsn")]
    pub reason: String,
    #[serde(rename = "SrcIdr")]
    pub source_identifier: String,
    #[serde(rename = "SrcSysTrnRef")]
    pub source_system_reference: String,
    #[serde(rename = "TransCdeDsc")]
    pub transaction_code_description: String,
    #[serde(rename = "TrnCd9")]
    pub transaction_code: String,
    #[serde(rename = "TxnDtls")]
    pub transaction_details: String,
    #[serde(rename = "TxnEntDte")]
    pub transaction_entry_date: String,
    /// `TRANSFER`, `WITHDRAWAL` or `DEPOSIT`.
    #[serde(rename = "TxnTyp")]
    pub transaction_type: String,
    #[serde(rename = "ValDte")]
    pub value_date: String,
}

impl TransactionRecord {
    /// All date-valued fields of this record, in [`DATE_FIELDS`] order.
    pub fn date_values(&self) -> [&str; 7] {
        [
            &self.cleared_file_date,
            &self.cleared_interest_date,
            &self.entry_created_at,
            &self.entry_date,
            &self.input_date,
            &self.transaction_entry_date,
            &self.value_date,
        ]
    }

    /// All monetary fields of this record, in [`AMOUNT_FIELDS`] order.
    pub fn amounts(&self) -> [f64; 3] {
        [self.amount, self.credit_amount, self.debit_amount]
    }
}
