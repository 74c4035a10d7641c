//! Index settings and mappings for the transaction index.

use serde_json::{json, Map, Value};
use transaction_loader_shared::{AMOUNT_FIELDS, DATE_FIELDS, TRANSACTION_FIELDS};

/// Free-text fields analysed for full-text search.
const TEXT_FIELDS: [&str; 9] = [
    "Narrative1",
    "Narrative2",
    "NartvLn1",
    "NartvLn2",
    "NartvLn3",
    "NartvLn4",
    "Rsn",
    "TxnDtls",
    "TransCdeDsc",
];

/// Name fields searchable as text and aggregatable through `.raw`.
const NAME_FIELDS: [&str; 2] = ["AccName", "CntrPrtyNme"];

fn is_one_of(field: &str, fields: &[&str]) -> bool {
    fields.iter().any(|candidate| *candidate == field)
}

/// Mapping for a single transaction field.
fn field_mapping(field: &str) -> Value {
    if is_one_of(field, &AMOUNT_FIELDS) {
        json!({ "type": "double" })
    } else if is_one_of(field, &DATE_FIELDS) {
        json!({ "type": "date" })
    } else if field == "NmbrOfTxn" {
        json!({ "type": "integer" })
    } else if is_one_of(field, &NAME_FIELDS) {
        json!({
            "type": "text",
            "fields": {
                "raw": {
                    "type": "keyword"
                }
            }
        })
    } else if is_one_of(field, &TEXT_FIELDS) {
        json!({ "type": "text" })
    } else {
        json!({ "type": "keyword" })
    }
}

/// Get the index settings and mappings for the transaction index.
///
/// The configuration includes:
/// - **double**: Monetary amounts, for range queries and sums
/// - **date**: Every field derived from the transaction date
/// - **text**: Narratives and names, for full-text search
/// - **keyword**: Codes, references and enumerations, for filtering
///
/// Dynamic mapping is `strict` so a document with an unexpected field is
/// rejected instead of silently widening the mapping.
pub fn get_index_settings() -> Value {
    let properties: Map<String, Value> = TRANSACTION_FIELDS
        .iter()
        .map(|field| (field.to_string(), field_mapping(field)))
        .collect();

    json!({
        "settings": {
            "number_of_shards": 1,
            "number_of_replicas": 1
        },
        "mappings": {
            "dynamic": "strict",
            "properties": properties
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_settings_structure() {
        let settings = get_index_settings();

        assert!(settings["settings"]["number_of_shards"].is_number());
        assert!(settings["settings"]["number_of_replicas"].is_number());
        assert_eq!(settings["mappings"]["dynamic"], "strict");

        let properties = settings["mappings"]["properties"].as_object().unwrap();
        assert_eq!(properties.len(), TRANSACTION_FIELDS.len());
        for field in TRANSACTION_FIELDS {
            assert!(properties.contains_key(field), "{} is not mapped", field);
        }
    }

    #[test]
    fn test_field_types() {
        let settings = get_index_settings();
        let properties = &settings["mappings"]["properties"];

        for field in AMOUNT_FIELDS {
            assert_eq!(properties[field]["type"], "double");
        }
        for field in DATE_FIELDS {
            assert_eq!(properties[field]["type"], "date");
        }
        assert_eq!(properties["NmbrOfTxn"]["type"], "integer");
        assert_eq!(properties["AccName"]["type"], "text");
        assert_eq!(properties["AccName"]["fields"]["raw"]["type"], "keyword");
        assert_eq!(properties["Narrative1"]["type"], "text");
        assert_eq!(properties["Ccy"]["type"], "keyword");
        assert_eq!(properties["InpTm"]["type"], "keyword");
    }

    #[test]
    fn test_text_fields_are_transaction_fields() {
        for field in TEXT_FIELDS.iter().chain(NAME_FIELDS.iter()) {
            assert!(TRANSACTION_FIELDS.contains(field));
        }
    }
}
