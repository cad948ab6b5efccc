//! Type-specific rule sets.
//!
//! One rule set per transaction type, all implementing [`TypeRuleSet`].
//! Adding a new type means registering a new rule set with the dispatcher;
//! no existing rule set or dispatcher code changes.

use serde::Deserialize;

use super::fields;

/// Accumulator for rule violations and their remediation hints.
///
/// Recommendations are containment-aligned with errors: every failing
/// category contributes at least one recommendation, but callers must not
/// rely on positional pairing.
#[derive(Debug, Default)]
pub struct ValidationReport {
    errors: Vec<String>,
    recommendations: Vec<String>,
}

impl ValidationReport {
    /// Record one violation with its remediation hint.
    pub fn reject(&mut self, error: impl Into<String>, recommendation: impl Into<String>) {
        self.errors.push(error.into());
        self.recommendations.push(recommendation.into());
    }

    /// True when no violations were recorded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Consume the report into `(errors, recommendations)`.
    #[must_use]
    pub fn into_parts(self) -> (Vec<String>, Vec<String>) {
        (self.errors, self.recommendations)
    }
}

/// Validation rules for one transaction type's `details` payload.
pub trait TypeRuleSet: Send + Sync {
    /// Discriminator value this rule set is registered under.
    fn type_name(&self) -> &'static str;

    /// Validate the `details` payload, appending violations to `report`.
    /// All applicable checks run; the rule set never short-circuits.
    fn validate_details(&self, details: &serde_json::Value, report: &mut ValidationReport);
}

/// `details` payload shape for `bank_card` transactions.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct BankCardDetails {
    card_number: Option<String>,
    cvv: Option<String>,
    #[allow(dead_code)]
    bin: Option<String>,
    expiry_date: Option<String>,
    #[allow(dead_code)]
    bank: Option<String>,
}

/// Rule set for card payments: presence plus Luhn, CVV, and expiry checks.
#[derive(Debug, Default)]
pub struct BankCardRuleSet;

impl TypeRuleSet for BankCardRuleSet {
    fn type_name(&self) -> &'static str {
        "bank_card"
    }

    fn validate_details(&self, details: &serde_json::Value, report: &mut ValidationReport) {
        let Ok(details) = serde_json::from_value::<BankCardDetails>(details.clone()) else {
            report.reject(
                "Bank card details are malformed.",
                "Provide bank card details as an object with string fields.",
            );
            return;
        };

        match details.card_number.as_deref() {
            None => report.reject(
                "Card number is required.",
                "Provide the card number in the details payload.",
            ),
            Some(card_number) if !fields::is_luhn_valid(card_number) => report.reject(
                "Card number must be valid (Luhn algorithm).",
                "Verify the card number format.",
            ),
            Some(_) => {}
        }

        match details.cvv.as_deref() {
            None => report.reject(
                "CVV is required.",
                "Provide the card CVV in the details payload.",
            ),
            Some(cvv) if !fields::is_valid_cvv(cvv) => report.reject(
                "CVV must be 3 or 4 digits.",
                "Check the CVV printed on the card.",
            ),
            Some(_) => {}
        }

        match details.expiry_date.as_deref() {
            None => report.reject(
                "Expiry date is required.",
                "Provide the card expiry date in the details payload.",
            ),
            Some(expiry) if !fields::is_valid_expiry(expiry) => report.reject(
                "Expiry date must use MM/YY format.",
                "Use the MM/YY expiry format.",
            ),
            Some(_) => {}
        }
        // bin and bank are free text, deliberately unchecked
    }
}

/// `details` payload shape for `cryptocurrency` transactions.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct CryptocurrencyDetails {
    wallet_address: Option<String>,
    exchange_rate: Option<f64>,
    tx_hash: Option<String>,
}

/// Rule set for on-chain payments: wallet presence, positive exchange rate,
/// and the 64-character hex hash format.
#[derive(Debug, Default)]
pub struct CryptocurrencyRuleSet;

impl TypeRuleSet for CryptocurrencyRuleSet {
    fn type_name(&self) -> &'static str {
        "cryptocurrency"
    }

    fn validate_details(&self, details: &serde_json::Value, report: &mut ValidationReport) {
        let Ok(details) = serde_json::from_value::<CryptocurrencyDetails>(details.clone()) else {
            report.reject(
                "Cryptocurrency details are malformed.",
                "Provide cryptocurrency details as an object.",
            );
            return;
        };

        match details.wallet_address.as_deref() {
            None | Some("") => report.reject(
                "Wallet address is required.",
                "Provide the destination wallet address.",
            ),
            Some(_) => {}
        }

        match details.exchange_rate {
            None => report.reject(
                "Exchange rate is required.",
                "Provide the fiat exchange rate in the details payload.",
            ),
            Some(rate) if !fields::is_positive_number(rate) => report.reject(
                "Exchange rate must be a positive number.",
                "Check the exchange rate feed value.",
            ),
            Some(_) => {}
        }

        match details.tx_hash.as_deref() {
            None => report.reject(
                "Transaction hash is required.",
                "Provide the on-chain transaction hash.",
            ),
            Some(hash) if !fields::is_hex_hash(hash) => report.reject(
                "Hash must be 64-character hexadecimal string.",
                "Verify the transaction hash.",
            ),
            Some(_) => {}
        }
    }
}
