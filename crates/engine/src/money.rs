//! Amount parsing and display formatting.
//!
//! Amounts travel through the pipeline as `f64` in their own currency and are only rounded
//! here, when they are turned into text for the user.

use crate::{CurrencyCode, EngineError, ResultEngine};

/// Parses a user-entered amount that must be strictly positive.
///
/// Accepts `.` or `,` as decimal separator and an optional leading `+`.
///
/// Validation rules:
/// - rejects empty/invalid strings
/// - rejects zero and negative amounts
///
/// ```rust
/// use engine::money::parse_amount;
///
/// assert_eq!(parse_amount("10,5").unwrap(), 10.5);
/// assert!(parse_amount("0").is_err());
/// assert!(parse_amount("-3").is_err());
/// ```
pub fn parse_amount(input: &str) -> ResultEngine<f64> {
    let invalid = || EngineError::InvalidAmount("invalid amount".to_string());

    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidAmount("empty amount".to_string()));
    }
    if trimmed.starts_with('-') {
        return Err(EngineError::InvalidAmount(
            "amount must be positive".to_string(),
        ));
    }

    let rest = trimmed.strip_prefix('+').unwrap_or(trimmed).trim();
    let normalized = rest.replace(',', ".");
    let mut parts = normalized.split('.');
    let whole = parts.next().ok_or_else(invalid)?;
    let fraction = parts.next();
    if parts.next().is_some() {
        return Err(invalid());
    }

    let digits_only = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if !digits_only(whole) || !fraction.is_none_or(digits_only) {
        return Err(invalid());
    }
    if whole.is_empty() && fraction.is_none_or(str::is_empty) {
        return Err(invalid());
    }

    let value: f64 = normalized.parse().map_err(|_| invalid())?;
    if !value.is_finite() {
        return Err(EngineError::InvalidAmount("amount too large".to_string()));
    }
    if value <= 0.0 {
        return Err(EngineError::InvalidAmount(
            "amount must be positive".to_string(),
        ));
    }

    Ok(value)
}

/// Formats an amount for display in `currency`, rounded to its minor units.
///
/// Output follows the en-US convention: currency symbol first, `,` thousands separator,
/// `.` decimal separator, leading `-` for negative values. Currencies without a
/// well-known symbol are prefixed by their code.
///
/// ```rust
/// use engine::{CurrencyCode, money::format_amount};
///
/// let usd = CurrencyCode::usd();
/// assert_eq!(format_amount(1234.5, &usd), "$1,234.50");
/// assert_eq!(format_amount(-50.0, &CurrencyCode::try_from("EUR").unwrap()), "-€50.00");
/// assert_eq!(format_amount(1234.6, &CurrencyCode::try_from("JPY").unwrap()), "¥1,235");
/// assert_eq!(format_amount(12.0, &CurrencyCode::try_from("CHF").unwrap()), "CHF 12.00");
/// ```
#[must_use]
pub fn format_amount(amount: f64, currency: &CurrencyCode) -> String {
    if !amount.is_finite() {
        return "n/a".to_string();
    }

    let digits = usize::from(currency.minor_units());
    let rounded = format!("{:.*}", digits, amount.abs());
    let (whole, fraction) = match rounded.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (rounded.as_str(), None),
    };

    let is_zero = rounded.chars().all(|c| c == '0' || c == '.');
    let sign = if amount < 0.0 && !is_zero { "-" } else { "" };

    let mut number = group_thousands(whole);
    if let Some(fraction) = fraction {
        number.push('.');
        number.push_str(fraction);
    }

    match currency.symbol() {
        Some(symbol) => format!("{sign}{symbol}{number}"),
        None => format!("{sign}{} {number}", currency.code()),
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
