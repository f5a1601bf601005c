use std::collections::HashMap;

use crate::CurrencyCode;

/// Exchange rates relative to USD: `1 USD = rate units` of each currency.
///
/// The table is filled once per session from the rate provider. Entries that are not
/// finite and strictly positive are refused, so a lookup can always be used as a
/// divisor.
///
/// Missing currencies fall back to a rate of `1`, i.e. they are treated as if they were
/// already at USD parity. This is a known approximation; callers that need to tell
/// "unknown" apart from "actually 1" use [`RateTable::lookup`] or
/// [`RateTable::is_known`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RateTable {
    rates: HashMap<CurrencyCode, f64>,
}

impl RateTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from raw provider entries.
    ///
    /// Returns the table and the codes that were refused (malformed code or unusable
    /// rate), so the caller can log them.
    pub fn from_entries<I, K>(entries: I) -> (Self, Vec<String>)
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let mut table = Self::new();
        let mut refused = Vec::new();
        for (code, rate) in entries {
            let raw = code.as_ref();
            let accepted = match CurrencyCode::try_from(raw) {
                Ok(code) => table.insert(code, rate),
                Err(_) => false,
            };
            if !accepted {
                refused.push(raw.to_string());
            }
        }
        refused.sort();
        (table, refused)
    }

    /// Inserts a rate. Returns `false` (and leaves the table untouched) when the rate is
    /// not finite and strictly positive.
    pub fn insert(&mut self, code: CurrencyCode, rate: f64) -> bool {
        if !rate.is_finite() || rate <= 0.0 {
            return false;
        }
        self.rates.insert(code, rate);
        true
    }

    /// Rate stored for `code`, if any.
    #[must_use]
    pub fn lookup(&self, code: &CurrencyCode) -> Option<f64> {
        self.rates.get(code).copied()
    }

    /// Rate for `code`, falling back to `1` when the table has no entry.
    #[must_use]
    pub fn rate(&self, code: &CurrencyCode) -> f64 {
        self.lookup(code).unwrap_or(1.0)
    }

    /// `true` when conversions through `code` do not rely on the fallback rate.
    ///
    /// USD is the base of every table and is always known.
    #[must_use]
    pub fn is_known(&self, code: &CurrencyCode) -> bool {
        code.is_base() || self.rates.contains_key(code)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rates.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(value: &str) -> CurrencyCode {
        CurrencyCode::try_from(value).unwrap()
    }

    #[test]
    fn missing_rate_falls_back_to_one() {
        let table = RateTable::new();
        assert_eq!(table.rate(&code("EUR")), 1.0);
        assert_eq!(table.lookup(&code("EUR")), None);
    }

    #[test]
    fn insert_refuses_unusable_rates() {
        let mut table = RateTable::new();
        assert!(!table.insert(code("EUR"), 0.0));
        assert!(!table.insert(code("EUR"), -1.0));
        assert!(!table.insert(code("EUR"), f64::NAN));
        assert!(!table.insert(code("EUR"), f64::INFINITY));
        assert!(table.is_empty());

        assert!(table.insert(code("EUR"), 0.9));
        assert_eq!(table.rate(&code("EUR")), 0.9);
    }

    #[test]
    fn from_entries_reports_refused_codes() {
        let (table, refused) = RateTable::from_entries([
            ("EUR", 0.9),
            ("GBP", 0.8),
            ("XYZW", 2.0),
            ("JPY", 0.0),
        ]);
        assert_eq!(table.len(), 2);
        assert_eq!(refused, vec!["JPY".to_string(), "XYZW".to_string()]);
    }

    #[test]
    fn base_currency_is_always_known() {
        let table = RateTable::new();
        assert!(table.is_known(&CurrencyCode::usd()));
        assert!(!table.is_known(&code("EUR")));
    }
}
