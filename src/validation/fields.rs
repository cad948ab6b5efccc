//! Reusable field validators.
//!
//! Pure predicates with no I/O and no state; each check is independent of
//! the others so the dispatcher can run every applicable check and collect
//! all violations instead of stopping at the first.

use chrono::{DateTime, Utc};

/// ISO 4217 alphabetic codes accepted by the currency check.
pub const SUPPORTED_CURRENCIES: &[&str] = &[
    "AED", "AUD", "BGN", "BRL", "CAD", "CHF", "CNY", "CZK", "DKK", "EUR", "GBP", "HKD", "HUF",
    "IDR", "ILS", "INR", "JPY", "KRW", "KZT", "MXN", "MYR", "NOK", "NZD", "PHP", "PLN", "RON",
    "SAR", "SEK", "SGD", "THB", "TRY", "UAH", "USD", "VND", "ZAR",
];

/// A finite value strictly greater than zero. Used for both the amount
/// check and the exchange-rate check.
#[must_use]
pub fn is_positive_number(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Membership in the supported ISO 4217 alphabetic-code set.
#[must_use]
pub fn is_iso4217_currency(code: &str) -> bool {
    SUPPORTED_CURRENCIES.binary_search(&code).is_ok()
}

/// Parse an ISO-8601 / RFC 3339 timestamp into UTC.
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Luhn mod-10 checksum over a 13-19 digit string (ISO/IEC 7812-1).
///
/// Returns `false` for any input that is not purely 13-19 ASCII digits.
#[must_use]
pub fn is_luhn_valid(card_number: &str) -> bool {
    if card_number.len() < 13
        || card_number.len() > 19
        || !card_number.bytes().all(|b| b.is_ascii_digit())
    {
        return false;
    }

    let mut sum = 0u32;
    for (i, b) in card_number.bytes().rev().enumerate() {
        let mut digit = u32::from(b - b'0');
        if i % 2 == 1 {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        sum += digit;
    }

    sum % 10 == 0
}

/// Exactly 64 case-insensitive hexadecimal characters.
#[must_use]
pub fn is_hex_hash(hash: &str) -> bool {
    hash.len() == 64 && hash.bytes().all(|b| b.is_ascii_hexdigit())
}

/// A 3-4 digit CVV string.
#[must_use]
pub fn is_valid_cvv(cvv: &str) -> bool {
    (cvv.len() == 3 || cvv.len() == 4) && cvv.bytes().all(|b| b.is_ascii_digit())
}

/// An expiry date in `MM/YY` format with a month in 01-12.
#[must_use]
pub fn is_valid_expiry(expiry: &str) -> bool {
    let Some((month, year)) = expiry.split_once('/') else {
        return false;
    };
    if month.len() != 2 || year.len() != 2 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    matches!(month.parse::<u8>(), Ok(m) if (1..=12).contains(&m))
}

/// A parseable IPv4 or IPv6 literal. Intentionally loose: reachability and
/// reputation checks are out of scope.
#[must_use]
pub fn is_ip_literal(address: &str) -> bool {
    address.parse::<std::net::IpAddr>().is_ok()
}
