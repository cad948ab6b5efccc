//! End-to-end tests for the validation dispatcher.

use chrono::{Duration, Utc};
use serde_json::json;

use transaction_analyser::domain::Transaction;
use transaction_analyser::validation::TransactionValidator;

fn bank_card_transaction(card_number: &str) -> Transaction {
    serde_json::from_value(json!({
        "transactionId": "123e4567-e89b-12d3-a456-426614174000",
        "amount": 100.50,
        "currency": "USD",
        "timestamp": "2025-01-08T10:00:00Z",
        "ipAddress": "192.168.1.1",
        "type": "bank_card",
        "details": {
            "cardNumber": card_number,
            "cvv": "123",
            "bin": "411111",
            "expiryDate": "12/25",
            "bank": "Test Bank"
        }
    }))
    .unwrap()
}

fn cryptocurrency_transaction(tx_hash: &str) -> Transaction {
    serde_json::from_value(json!({
        "transactionId": "123e4567-e89b-12d3-a456-426614174000",
        "amount": 0.5,
        "currency": "USD",
        "timestamp": "2025-01-08T10:00:00Z",
        "ipAddress": "192.168.1.1",
        "type": "cryptocurrency",
        "details": {
            "walletAddress": "bc1qxy2kgdygjrsqtzq2n0yrf2493p83kkfjhx0wlh",
            "exchangeRate": 45000.50,
            "txHash": tx_hash
        }
    }))
    .unwrap()
}

#[test]
fn validates_correct_bank_card_transaction() {
    let validator = TransactionValidator::new();
    let result = validator.validate(&bank_card_transaction("4111111111111111"));

    assert!(result.is_valid);
    assert!(result.errors.is_empty());

    let enriched = result.enriched_transaction.expect("enriched record");
    assert_eq!(enriched.validation_status.as_str(), "valid");

    let wire = serde_json::to_value(&enriched).unwrap();
    assert_eq!(wire["validationStatus"], "valid");
    assert!(wire.get("processedAt").is_some());
}

#[test]
fn rejects_invalid_card_number() {
    let validator = TransactionValidator::new();
    let result = validator.validate(&bank_card_transaction("1234567890123456"));

    assert!(!result.is_valid);
    assert!(result
        .errors
        .contains(&"Card number must be valid (Luhn algorithm).".to_string()));
    assert!(result
        .recommendations
        .contains(&"Verify the card number format.".to_string()));
    assert!(result.enriched_transaction.is_none());
}

#[test]
fn luhn_accepts_well_formed_card_lengths() {
    let validator = TransactionValidator::new();
    // 13, 15, and 16 digit cards that satisfy the checksum
    for card in ["4222222222222", "378282246310005", "5500005555555559"] {
        let result = validator.validate(&bank_card_transaction(card));
        assert!(
            !result
                .errors
                .iter()
                .any(|e| e.contains("Luhn")),
            "card {card} should pass the Luhn check"
        );
    }
}

#[test]
fn validates_correct_cryptocurrency_transaction() {
    let validator = TransactionValidator::new();
    let result = validator.validate(&cryptocurrency_transaction(
        "a1b2c3d4e5f67890123456789012345678901234567890123456789012345678",
    ));

    assert!(result.is_valid);
    assert_eq!(
        result
            .enriched_transaction
            .unwrap()
            .validation_status
            .as_str(),
        "valid"
    );
}

#[test]
fn rejects_invalid_hash_format() {
    let validator = TransactionValidator::new();
    let result = validator.validate(&cryptocurrency_transaction("abc123"));

    assert!(!result.is_valid);
    assert!(result
        .errors
        .contains(&"Hash must be 64-character hexadecimal string.".to_string()));
}

#[test]
fn accepts_uppercase_hash() {
    let validator = TransactionValidator::new();
    let result = validator.validate(&cryptocurrency_transaction(
        "A1B2C3D4E5F67890123456789012345678901234567890123456789012345678",
    ));
    assert!(result.is_valid);
}

#[test]
fn rejects_negative_amount() {
    let validator = TransactionValidator::new();
    let tx: Transaction = serde_json::from_value(json!({
        "transactionId": "123e4567-e89b-12d3-a456-426614174000",
        "amount": -50,
        "currency": "USD",
        "timestamp": "2025-01-08T10:00:00Z",
        "ipAddress": "192.168.1.1",
        "type": "bank_card",
        "details": {}
    }))
    .unwrap();

    let result = validator.validate(&tx);
    assert!(!result.is_valid);
    assert!(result
        .errors
        .contains(&"Amount must be greater than zero.".to_string()));
    assert!(result.enriched_transaction.is_none());
}

#[test]
fn rejects_zero_and_missing_amount() {
    let validator = TransactionValidator::new();

    for amount in [json!(0), json!(null)] {
        let mut doc = json!({
            "transactionId": "tx-1",
            "currency": "USD",
            "timestamp": "2025-01-08T10:00:00Z",
            "type": "bank_card",
            "details": {}
        });
        doc["amount"] = amount;
        let tx: Transaction = serde_json::from_value(doc).unwrap();
        let result = validator.validate(&tx);
        assert!(result
            .errors
            .contains(&"Amount must be greater than zero.".to_string()));
    }
}

#[test]
fn rejects_invalid_currency() {
    let validator = TransactionValidator::new();
    let tx: Transaction = serde_json::from_value(json!({
        "transactionId": "123e4567-e89b-12d3-a456-426614174000",
        "amount": 100,
        "currency": "INVALID",
        "timestamp": "2025-01-08T10:00:00Z",
        "ipAddress": "192.168.1.1",
        "type": "bank_card",
        "details": {}
    }))
    .unwrap();

    let result = validator.validate(&tx);
    assert!(!result.is_valid);
    assert!(result
        .errors
        .contains(&"Currency must be a valid ISO 4217 code.".to_string()));
}

#[test]
fn rejects_future_timestamp() {
    let validator = TransactionValidator::new();
    let future = (Utc::now() + Duration::days(365)).to_rfc3339();
    let tx: Transaction = serde_json::from_value(json!({
        "transactionId": "123e4567-e89b-12d3-a456-426614174000",
        "amount": 100,
        "currency": "USD",
        "timestamp": future,
        "ipAddress": "192.168.1.1",
        "type": "bank_card",
        "details": {}
    }))
    .unwrap();

    let result = validator.validate(&tx);
    assert!(!result.is_valid);
    assert!(result
        .errors
        .contains(&"Timestamp must not be in the future.".to_string()));
}

#[test]
fn timestamp_equal_to_validation_time_is_accepted() {
    let validator = TransactionValidator::new();
    let now = Utc::now();
    let mut tx = bank_card_transaction("4111111111111111");
    tx.timestamp = Some(now.to_rfc3339());

    // Strictly-after comparison: the boundary instant passes
    let result = validator.validate_at(&tx, now);
    assert!(result.is_valid);
}

#[test]
fn repeated_validation_with_fixed_instant_is_identical() {
    let validator = TransactionValidator::new();
    let now = Utc::now();

    let tx = cryptocurrency_transaction("abc123");
    let first = validator.validate_at(&tx, now);
    let second = validator.validate_at(&tx, now);
    assert_eq!(first.errors, second.errors);
    assert_eq!(first.recommendations, second.recommendations);

    let tx = bank_card_transaction("4111111111111111");
    let first = validator.validate_at(&tx, now);
    let second = validator.validate_at(&tx, now);
    assert_eq!(first, second);
}

#[test]
fn every_rejection_carries_a_recommendation() {
    let validator = TransactionValidator::new();
    let tx: Transaction = serde_json::from_value(json!({
        "amount": -1,
        "currency": "XXX_NOT_A_CODE",
        "timestamp": "garbage",
        "ipAddress": "not-an-ip",
        "type": "teleport",
        "details": {}
    }))
    .unwrap();

    let result = validator.validate(&tx);
    assert!(!result.is_valid);
    assert!(!result.errors.is_empty());
    assert_eq!(result.errors.len(), result.recommendations.len());
}

#[test]
fn unsupported_type_skips_detail_checks() {
    let validator = TransactionValidator::new();
    let tx: Transaction = serde_json::from_value(json!({
        "transactionId": "tx-1",
        "amount": 10,
        "currency": "USD",
        "timestamp": "2025-01-08T10:00:00Z",
        "type": "barter",
        "details": {"cardNumber": "1234567890123456"}
    }))
    .unwrap();

    let result = validator.validate(&tx);
    assert_eq!(
        result.errors,
        vec!["Unsupported transaction type.".to_string()]
    );
}

#[test]
fn non_object_input_yields_single_generic_error() {
    let validator = TransactionValidator::new();

    for document in [json!(null), json!(42), json!("payload"), json!([1, 2])] {
        let result = validator.validate_json(&document);
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
        assert!(result.enriched_transaction.is_none());
    }
}
