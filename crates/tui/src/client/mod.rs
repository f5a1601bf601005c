//! HTTP access to the backend API and to the exchange-rate provider.

mod mapping;

use api_types::{
    budget::{Budget, BudgetSet},
    rates::RatesResponse,
    transaction::{TransactionNew, TransactionQuery, TransactionView},
};
use reqwest::Url;
use serde::Deserialize;
use thiserror::Error;

use crate::error::{AppError, Result};

pub use mapping::{budget_from_wire, transactions_from_views};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("server error: {0}")]
    Server(String),
    #[error("server unreachable: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Turns a non-2xx response into a [`ClientError`] carrying the backend's message.
async fn check(res: reqwest::Response) -> std::result::Result<reqwest::Response, ClientError> {
    if res.status().is_success() {
        return Ok(res);
    }

    let status = res.status();
    let body = res
        .json::<ErrorResponse>()
        .await
        .map(|err| err.error)
        .unwrap_or_else(|_| format!("unexpected status {status}"));

    let err = match status.as_u16() {
        404 => ClientError::NotFound(body),
        400 | 422 => ClientError::Validation(body),
        _ => ClientError::Server(body),
    };
    Err(err)
}

fn parse_url(raw: &str, what: &str) -> Result<Url> {
    Url::parse(raw).map_err(|err| {
        AppError::Config(config::ConfigError::Message(format!(
            "invalid {what}: {err}"
        )))
    })
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    rates_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str, rates_url: &str) -> Result<Self> {
        // `Url::join` drops the last path segment unless the base ends with a slash.
        let base_url = if base_url.ends_with('/') {
            parse_url(base_url, "base_url")?
        } else {
            parse_url(&format!("{base_url}/"), "base_url")?
        };
        let rates_url = parse_url(rates_url, "rates_url")?;
        let http = reqwest::Client::builder()
            .user_agent(concat!("cambio_tui/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url,
            rates_url,
            http,
        })
    }

    fn endpoint(&self, path: &str) -> std::result::Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::Server(format!("invalid base_url: {err}")))
    }

    pub async fn transactions_list(
        &self,
        query: &TransactionQuery,
    ) -> std::result::Result<Vec<TransactionView>, ClientError> {
        let res = self
            .http
            .get(self.endpoint("transactions")?)
            .query(query)
            .send()
            .await?;
        Ok(check(res).await?.json().await?)
    }

    pub async fn transaction_create(
        &self,
        payload: &TransactionNew,
    ) -> std::result::Result<(), ClientError> {
        let res = self
            .http
            .post(self.endpoint("transactions")?)
            .json(payload)
            .send()
            .await?;
        check(res).await?;
        Ok(())
    }

    pub async fn transaction_delete(&self, id: &str) -> std::result::Result<(), ClientError> {
        let mut endpoint = self.endpoint("transactions")?;
        endpoint
            .path_segments_mut()
            .map_err(|()| ClientError::Server("base_url cannot be a base".to_string()))?
            .push(id);

        let res = self.http.delete(endpoint).send().await?;
        check(res).await?;
        Ok(())
    }

    /// `None` while no budget has been set.
    pub async fn budget_get(&self) -> std::result::Result<Option<Budget>, ClientError> {
        let res = self.http.get(self.endpoint("budget")?).send().await?;
        Ok(check(res).await?.json().await?)
    }

    pub async fn budget_set(&self, payload: &BudgetSet) -> std::result::Result<(), ClientError> {
        let res = self
            .http
            .post(self.endpoint("budget")?)
            .json(payload)
            .send()
            .await?;
        check(res).await?;
        Ok(())
    }

    pub async fn rates_fetch(&self) -> std::result::Result<RatesResponse, ClientError> {
        let res = self.http.get(self.rates_url.clone()).send().await?;
        Ok(check(res).await?.json().await?)
    }
}
