//! Validation engine: field validators, type rule sets, and the dispatcher.
//!
//! The engine is synchronous and stateless. Each call is a pure function
//! of `(transaction, captured_time)`: the current time is sampled exactly
//! once per call, shared by the future-timestamp check and the enrichment
//! `processedAt` stamp, and no external state is read or written.

pub mod fields;
pub mod rules;

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::domain::{EnrichedTransaction, Transaction, ValidationResult};
use rules::{BankCardRuleSet, CryptocurrencyRuleSet, TypeRuleSet, ValidationReport};

/// Dispatcher combining common checks with per-type rule sets.
///
/// Rule sets are registered by their type discriminator; adding a new
/// transaction type is a registration, not a control-flow change.
pub struct TransactionValidator {
    rule_sets: HashMap<&'static str, Box<dyn TypeRuleSet>>,
}

impl Default for TransactionValidator {
    fn default() -> Self {
        let mut validator = Self {
            rule_sets: HashMap::new(),
        };
        validator.register(Box::new(BankCardRuleSet));
        validator.register(Box::new(CryptocurrencyRuleSet));
        validator
    }
}

impl TransactionValidator {
    /// Create a validator with the default rule sets (`bank_card`,
    /// `cryptocurrency`).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rule set under its type discriminator, replacing any
    /// previous registration for the same type.
    pub fn register(&mut self, rule_set: Box<dyn TypeRuleSet>) {
        self.rule_sets.insert(rule_set.type_name(), rule_set);
    }

    /// Validate a transaction against the current wall clock.
    #[must_use]
    pub fn validate(&self, transaction: &Transaction) -> ValidationResult {
        self.validate_at(transaction, Utc::now())
    }

    /// Validate a transaction against an explicit instant.
    ///
    /// Runs the common checks, then the rule set selected by the declared
    /// type, and aggregates every violation in check order. On success the
    /// result carries the enriched record stamped with `now`; the input
    /// transaction is never mutated.
    #[must_use]
    pub fn validate_at(&self, transaction: &Transaction, now: DateTime<Utc>) -> ValidationResult {
        let mut report = ValidationReport::default();

        self.check_common(transaction, now, &mut report);
        self.check_type_rules(transaction, &mut report);

        if report.is_clean() {
            ValidationResult::valid(EnrichedTransaction::new(transaction.clone(), now))
        } else {
            let (errors, recommendations) = report.into_parts();
            ValidationResult::rejected(errors, recommendations)
        }
    }

    /// Validate a loosely-shaped JSON document, as handed over by the
    /// ingestion and store adapters.
    ///
    /// Structurally unusable inputs (non-objects, ill-typed top-level
    /// fields) are converted into a single generic validation error rather
    /// than a fault: callers always receive a [`ValidationResult`].
    #[must_use]
    pub fn validate_json(&self, document: &serde_json::Value) -> ValidationResult {
        if !document.is_object() {
            return ValidationResult::invalid_input("Transaction payload must be a JSON object.");
        }
        match serde_json::from_value::<Transaction>(document.clone()) {
            Ok(transaction) => self.validate(&transaction),
            Err(_) => ValidationResult::invalid_input("Transaction payload is malformed."),
        }
    }

    /// Type-agnostic checks: id presence, amount, currency, timestamp,
    /// and a loose IP literal check.
    fn check_common(&self, tx: &Transaction, now: DateTime<Utc>, report: &mut ValidationReport) {
        match tx.transaction_id.as_deref() {
            None | Some("") => report.reject(
                "Transaction ID is required.",
                "Include a unique transactionId field.",
            ),
            Some(_) => {}
        }

        match tx.amount {
            Some(amount) if fields::is_positive_number(amount) => {}
            _ => report.reject(
                "Amount must be greater than zero.",
                "Ensure the amount is a positive value.",
            ),
        }

        match tx.currency.as_deref() {
            Some(currency) if fields::is_iso4217_currency(currency) => {}
            _ => report.reject(
                "Currency must be a valid ISO 4217 code.",
                "Use a supported three-letter currency code.",
            ),
        }

        match tx.timestamp.as_deref() {
            None => report.reject(
                "Timestamp is required.",
                "Include an ISO-8601 timestamp field.",
            ),
            Some(raw) => match fields::parse_timestamp(raw) {
                None => report.reject(
                    "Timestamp must be a valid ISO-8601 date.",
                    "Format the timestamp as ISO-8601.",
                ),
                Some(parsed) if parsed > now => report.reject(
                    "Timestamp must not be in the future.",
                    "Check the clock of the transaction source.",
                ),
                Some(_) => {}
            },
        }

        // Loose format check only; deep IP validation is out of scope
        if let Some(ip) = tx.ip_address.as_deref()
            && !fields::is_ip_literal(ip)
        {
            report.reject(
                "IP address must be a valid IPv4 or IPv6 literal.",
                "Check the originating IP address.",
            );
        }
    }

    /// Dispatch to the rule set registered for the declared type. Unknown
    /// or missing types yield a single error and no further field checks.
    fn check_type_rules(&self, tx: &Transaction, report: &mut ValidationReport) {
        let Some(declared) = tx.transaction_type.as_deref() else {
            report.reject(
                "Unsupported transaction type.",
                "Use one of the supported transaction types.",
            );
            return;
        };

        match self.rule_sets.get(declared) {
            Some(rule_set) => rule_set.validate_details(&tx.details, report),
            None => report.reject(
                "Unsupported transaction type.",
                "Use one of the supported transaction types.",
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_bank_card() -> Transaction {
        serde_json::from_value(json!({
            "transactionId": "123e4567-e89b-12d3-a456-426614174000",
            "amount": 100.50,
            "currency": "USD",
            "timestamp": "2025-01-08T10:00:00Z",
            "ipAddress": "192.168.1.1",
            "type": "bank_card",
            "details": {
                "cardNumber": "4111111111111111",
                "cvv": "123",
                "bin": "411111",
                "expiryDate": "12/25",
                "bank": "Test Bank"
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_valid_bank_card_transaction_is_enriched() {
        let validator = TransactionValidator::new();
        let result = validator.validate(&valid_bank_card());

        assert!(result.is_valid);
        assert!(result.errors.is_empty());
        let enriched = result.enriched_transaction.expect("enriched record");
        assert_eq!(enriched.validation_status.as_str(), "valid");
    }

    #[test]
    fn test_input_transaction_is_not_mutated() {
        let validator = TransactionValidator::new();
        let tx = valid_bank_card();
        let before = tx.clone();
        let result = validator.validate(&tx);

        assert_eq!(tx, before);
        assert_eq!(
            result.enriched_transaction.unwrap().transaction,
            before
        );
    }

    #[test]
    fn test_time_sampled_once_per_call() {
        let validator = TransactionValidator::new();
        let now = Utc::now();
        let result = validator.validate_at(&valid_bank_card(), now);
        assert_eq!(result.enriched_transaction.unwrap().processed_at, now);
    }

    #[test]
    fn test_validation_is_deterministic_for_fixed_instant() {
        let validator = TransactionValidator::new();
        let now = Utc::now();
        let tx = valid_bank_card();

        let first = validator.validate_at(&tx, now);
        let second = validator.validate_at(&tx, now);
        assert_eq!(first, second);
    }

    #[test]
    fn test_future_timestamp_rejected() {
        let validator = TransactionValidator::new();
        let mut tx = valid_bank_card();
        let future = (Utc::now() + chrono::Duration::days(365)).to_rfc3339();
        tx.timestamp = Some(future);

        let result = validator.validate(&tx);
        assert!(!result.is_valid);
        assert!(result
            .errors
            .contains(&"Timestamp must not be in the future.".to_string()));
    }

    #[test]
    fn test_unparseable_timestamp_rejected() {
        let validator = TransactionValidator::new();
        let mut tx = valid_bank_card();
        tx.timestamp = Some("not-a-date".to_string());

        let result = validator.validate(&tx);
        assert!(result
            .errors
            .contains(&"Timestamp must be a valid ISO-8601 date.".to_string()));
    }

    #[test]
    fn test_common_and_type_errors_aggregate_in_order() {
        let validator = TransactionValidator::new();
        let tx: Transaction = serde_json::from_value(json!({
            "transactionId": "tx-1",
            "amount": -50,
            "currency": "INVALID",
            "timestamp": "2025-01-08T10:00:00Z",
            "type": "bank_card",
            "details": {}
        }))
        .unwrap();

        let result = validator.validate(&tx);
        assert!(!result.is_valid);

        // Common checks come first, then type-specific checks
        let amount_idx = result
            .errors
            .iter()
            .position(|e| e == "Amount must be greater than zero.")
            .unwrap();
        let card_idx = result
            .errors
            .iter()
            .position(|e| e == "Card number is required.")
            .unwrap();
        assert!(amount_idx < card_idx);
        assert!(result
            .errors
            .contains(&"Currency must be a valid ISO 4217 code.".to_string()));
        assert_eq!(result.errors.len(), result.recommendations.len());
    }

    #[test]
    fn test_unknown_type_yields_single_type_error() {
        let validator = TransactionValidator::new();
        let tx: Transaction = serde_json::from_value(json!({
            "transactionId": "tx-1",
            "amount": 10.0,
            "currency": "USD",
            "timestamp": "2025-01-08T10:00:00Z",
            "type": "wire_transfer",
            "details": {"iban": "DE0000"}
        }))
        .unwrap();

        let result = validator.validate(&tx);
        assert_eq!(
            result.errors,
            vec!["Unsupported transaction type.".to_string()]
        );
    }

    #[test]
    fn test_missing_type_rejected() {
        let validator = TransactionValidator::new();
        let tx: Transaction = serde_json::from_value(json!({
            "transactionId": "tx-1",
            "amount": 10.0,
            "currency": "USD",
            "timestamp": "2025-01-08T10:00:00Z"
        }))
        .unwrap();

        let result = validator.validate(&tx);
        assert!(result
            .errors
            .contains(&"Unsupported transaction type.".to_string()));
    }

    #[test]
    fn test_invalid_ip_literal_rejected() {
        let validator = TransactionValidator::new();
        let mut tx = valid_bank_card();
        tx.ip_address = Some("999.999.999.999".to_string());

        let result = validator.validate(&tx);
        assert!(result
            .errors
            .contains(&"IP address must be a valid IPv4 or IPv6 literal.".to_string()));
    }

    #[test]
    fn test_validate_json_non_object() {
        let validator = TransactionValidator::new();
        let result = validator.validate_json(&json!([1, 2, 3]));
        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec!["Transaction payload must be a JSON object.".to_string()]
        );
        assert_eq!(result.recommendations.len(), 1);
    }

    #[test]
    fn test_validate_json_ill_typed_fields() {
        let validator = TransactionValidator::new();
        let result = validator.validate_json(&json!({"amount": "lots"}));
        assert!(!result.is_valid);
        assert_eq!(
            result.errors,
            vec!["Transaction payload is malformed.".to_string()]
        );
    }

    #[test]
    fn test_custom_rule_set_registration() {
        struct VoucherRuleSet;

        impl rules::TypeRuleSet for VoucherRuleSet {
            fn type_name(&self) -> &'static str {
                "voucher"
            }

            fn validate_details(
                &self,
                details: &serde_json::Value,
                report: &mut ValidationReport,
            ) {
                if details.get("code").and_then(|v| v.as_str()).is_none() {
                    report.reject("Voucher code is required.", "Provide the voucher code.");
                }
            }
        }

        let mut validator = TransactionValidator::new();
        validator.register(Box::new(VoucherRuleSet));

        let tx: Transaction = serde_json::from_value(json!({
            "transactionId": "tx-1",
            "amount": 10.0,
            "currency": "USD",
            "timestamp": "2025-01-08T10:00:00Z",
            "type": "voucher",
            "details": {"code": "SPRING"}
        }))
        .unwrap();

        assert!(validator.validate(&tx).is_valid);
    }
}
