//! Input formatters bound to form fields.
//!
//! Every function here is pure and idempotent: feeding a formatted value back
//! in yields the same value, so they can run on each keystroke.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Prefix shown in front of currency amounts.
pub const CURRENCY_PREFIX: &str = "$";

const PHONE_DIGITS: usize = 10;
const CURRENCY_SCALE: usize = 2;

/// Upper-case the first character, leave the rest untouched.
pub fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Mask a phone number as `(AAA)BBB-CCCC`, emitting each separator only once
/// the segment it introduces has a digit.
pub fn format_phone(value: &str) -> String {
    let digits: Vec<char> = value
        .chars()
        .filter(char::is_ascii_digit)
        .take(PHONE_DIGITS)
        .collect();

    let mut formatted = String::with_capacity(13);
    for (i, digit) in digits.iter().enumerate() {
        match i {
            0 => formatted.push('('),
            3 => formatted.push(')'),
            6 => formatted.push('-'),
            _ => {}
        }
        formatted.push(*digit);
    }
    formatted
}

/// The numeric part of a currency field: digits with at most one `.` and two
/// decimals, leading zeros collapsed. Everything else is dropped.
pub fn currency_raw(value: &str) -> String {
    let mut integer = String::new();
    let mut decimals = String::new();
    let mut seen_point = false;

    for c in value.chars() {
        match c {
            '0'..='9' if seen_point => {
                if decimals.len() < CURRENCY_SCALE {
                    decimals.push(c);
                }
            }
            '0'..='9' => integer.push(c),
            '.' if !seen_point => seen_point = true,
            _ => {}
        }
    }

    let trimmed = integer.trim_start_matches('0');
    let integer = if trimmed.is_empty() && (!integer.is_empty() || seen_point) {
        "0"
    } else {
        trimmed
    };

    if seen_point {
        format!("{integer}.{decimals}")
    } else {
        integer.to_string()
    }
}

/// Format a currency field while typing: `$` + [`currency_raw`], or empty when
/// nothing numeric was entered.
pub fn format_currency(value: &str) -> String {
    let raw = currency_raw(value);
    if raw.is_empty() {
        raw
    } else {
        format!("{CURRENCY_PREFIX}{raw}")
    }
}

/// Format a currency field once editing is done: exactly two decimals.
pub fn finalize_currency(value: &str) -> String {
    let raw = currency_raw(value);
    if raw.is_empty() {
        return raw;
    }
    let (integer, decimals) = raw.split_once('.').unwrap_or((raw.as_str(), ""));
    format!("{CURRENCY_PREFIX}{integer}.{decimals:0<2}")
}

/// A stored amount as `$<amount>` with two decimals, half-cents rounded away
/// from zero.
pub fn display_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{CURRENCY_PREFIX}{rounded:.2}")
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("Enter an amount.")]
    Empty,
    #[error("Enter a valid amount.")]
    Invalid,
}

/// Strip the prefix and any grouping commas, then parse as a decimal.
pub fn parse_amount(value: &str) -> Result<Decimal, AmountError> {
    let stripped: String = value
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ','))
        .collect();
    if stripped.is_empty() {
        return Err(AmountError::Empty);
    }
    Decimal::from_str(&stripped).map_err(|_| AmountError::Invalid)
}
