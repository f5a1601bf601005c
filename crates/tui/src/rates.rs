//! Session rate cache.
//!
//! The table is fetched once at startup. A failed refresh keeps whatever table was
//! loaded before (empty on the first attempt), so conversion degrades to 1:1 parity
//! instead of stopping the dashboard.

use api_types::rates::RatesResponse;
use engine::RateTable;

use crate::client::ClientError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RatesStatus {
    Loading,
    Loaded(usize),
    Failed(String),
}

#[derive(Debug)]
pub struct RateCache {
    table: RateTable,
    status: RatesStatus,
}

impl Default for RateCache {
    fn default() -> Self {
        Self {
            table: RateTable::new(),
            status: RatesStatus::Loading,
        }
    }
}

impl RateCache {
    pub fn table(&self) -> &RateTable {
        &self.table
    }

    pub fn status(&self) -> &RatesStatus {
        &self.status
    }

    /// Applies the outcome of a provider fetch.
    pub fn apply_refresh(&mut self, result: Result<RatesResponse, ClientError>) -> &RatesStatus {
        match result {
            Ok(response) => {
                if let Some(base) = response.base.as_deref()
                    && !base.eq_ignore_ascii_case("USD")
                {
                    tracing::warn!(%base, "rate provider answered with a non-USD base, ignoring");
                    self.status = RatesStatus::Failed(format!("unexpected base {base}"));
                    return &self.status;
                }

                let (table, refused) = RateTable::from_entries(response.rates);
                if !refused.is_empty() {
                    tracing::warn!(?refused, "ignoring unusable exchange rates");
                }
                tracing::info!(count = table.len(), "exchange rates loaded");
                self.status = RatesStatus::Loaded(table.len());
                self.table = table;
            }
            Err(err) => {
                tracing::warn!("failed to load exchange rates: {err}");
                self.status = RatesStatus::Failed(err.to_string());
            }
        }
        &self.status
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use engine::CurrencyCode;

    use super::*;

    fn response(entries: &[(&str, f64)]) -> RatesResponse {
        RatesResponse {
            base: Some("USD".to_string()),
            rates: entries
                .iter()
                .map(|(code, rate)| (code.to_string(), *rate))
                .collect::<HashMap<_, _>>(),
        }
    }

    fn eur() -> CurrencyCode {
        CurrencyCode::try_from("EUR").unwrap()
    }

    #[test]
    fn successful_refresh_replaces_table() {
        let mut cache = RateCache::default();
        assert_eq!(cache.status(), &RatesStatus::Loading);

        let status = cache.apply_refresh(Ok(response(&[("EUR", 0.9), ("BAD", -1.0)])));
        assert_eq!(status, &RatesStatus::Loaded(1));
        assert_eq!(cache.table().lookup(&eur()), Some(0.9));
    }

    #[test]
    fn failed_refresh_keeps_previous_table() {
        let mut cache = RateCache::default();
        cache.apply_refresh(Ok(response(&[("EUR", 0.9)])));

        let err = ClientError::Server("boom".to_string());
        let status = cache.apply_refresh(Err(err));
        assert!(matches!(status, RatesStatus::Failed(_)));
        assert_eq!(cache.table().lookup(&eur()), Some(0.9));
    }

    #[test]
    fn first_failure_leaves_empty_table() {
        let mut cache = RateCache::default();
        cache.apply_refresh(Err(ClientError::NotFound("gone".to_string())));
        assert!(cache.table().is_empty());
        assert_eq!(cache.table().rate(&eur()), 1.0);
    }

    #[test]
    fn non_usd_base_is_refused() {
        let mut cache = RateCache::default();
        let mut foreign = response(&[("USD", 1.1)]);
        foreign.base = Some("EUR".to_string());
        assert!(matches!(
            cache.apply_refresh(Ok(foreign)),
            RatesStatus::Failed(_)
        ));
        assert!(cache.table().is_empty());
    }
}
