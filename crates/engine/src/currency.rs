use std::fmt;

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// ISO 4217 currency code attached to every stored amount.
///
/// Codes are normalized to upper case on construction, so `"eur"` and `"EUR"` compare
/// equal. Records coming from the backend without a currency are treated as USD (see
/// [`CurrencyCode::usd`]).
///
/// ## Minor units
///
/// `minor_units()` returns how many fraction digits are shown when an amount in this
/// currency is formatted. Conversion itself never rounds; rounding happens only at
/// display time.
///
/// ```rust
/// use engine::CurrencyCode;
///
/// let eur = CurrencyCode::try_from("eur").unwrap();
/// assert_eq!(eur.code(), "EUR");
/// assert_eq!(eur.minor_units(), 2);
/// assert_eq!(CurrencyCode::try_from("JPY").unwrap().minor_units(), 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

/// Base currency of every rate table.
pub const BASE_CURRENCY: &str = "USD";

impl CurrencyCode {
    /// The base currency. Also the default for records without a currency.
    #[must_use]
    pub fn usd() -> Self {
        Self(BASE_CURRENCY.to_string())
    }

    /// Canonical upper-case code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.0
    }

    /// `true` for the rate-table base currency.
    #[must_use]
    pub fn is_base(&self) -> bool {
        self.0 == BASE_CURRENCY
    }

    /// Number of fraction digits used when formatting amounts.
    #[must_use]
    pub fn minor_units(&self) -> u8 {
        match self.0.as_str() {
            "BIF" | "CLP" | "DJF" | "GNF" | "ISK" | "JPY" | "KMF" | "KRW" | "PYG" | "RWF"
            | "UGX" | "VND" | "VUV" | "XAF" | "XOF" | "XPF" => 0,
            "BHD" | "IQD" | "JOD" | "KWD" | "LYD" | "OMR" | "TND" => 3,
            _ => 2,
        }
    }

    /// Display symbol, when the currency has a well-known one.
    #[must_use]
    pub fn symbol(&self) -> Option<&'static str> {
        let symbol = match self.0.as_str() {
            "USD" => "$",
            "EUR" => "€",
            "GBP" => "£",
            "JPY" => "¥",
            "INR" => "₹",
            "KRW" => "₩",
            "CNY" => "CN¥",
            "CAD" => "CA$",
            "AUD" => "A$",
            "BRL" => "R$",
            "MXN" => "MX$",
            _ => return None,
        };
        Some(symbol)
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::usd()
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for CurrencyCode {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(EngineError::InvalidCurrency(format!(
                "expected a three-letter code, got {trimmed:?}"
            )));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<CurrencyCode> for String {
    fn from(value: CurrencyCode) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_normalized_to_upper_case() {
        let code = CurrencyCode::try_from(" gbp ").unwrap();
        assert_eq!(code.code(), "GBP");
        assert_eq!(code, CurrencyCode::try_from("GBP").unwrap());
    }

    #[test]
    fn rejects_malformed_codes() {
        assert!(CurrencyCode::try_from("").is_err());
        assert!(CurrencyCode::try_from("EU").is_err());
        assert!(CurrencyCode::try_from("EURO").is_err());
        assert!(CurrencyCode::try_from("U$D").is_err());
    }

    #[test]
    fn default_is_usd() {
        assert_eq!(CurrencyCode::default().code(), "USD");
        assert!(CurrencyCode::default().is_base());
    }

    #[test]
    fn serde_uses_plain_string() {
        let code: CurrencyCode = serde_json::from_str("\"chf\"").unwrap();
        assert_eq!(code.code(), "CHF");
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"CHF\"");
        assert!(serde_json::from_str::<CurrencyCode>("\"dollars\"").is_err());
    }
}
