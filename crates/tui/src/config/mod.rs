use clap::Parser;
use engine::CurrencyCode;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/tui.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Root of the backend API, e.g. `http://127.0.0.1:5000/api/`.
    pub base_url: String,
    /// Exchange-rate provider returning rates relative to USD.
    pub rates_url: String,
    pub display_currency: String,
    /// Codes offered by the currency selector, in cycling order.
    pub currencies: Vec<String>,
    /// Categories offered by the add form and the category filter.
    pub categories: Vec<String>,
    pub log_file: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000/api/".to_string(),
            rates_url: "https://api.exchangerate-api.com/v4/latest/USD".to_string(),
            display_currency: "USD".to_string(),
            currencies: ["USD", "EUR", "GBP", "JPY", "INR", "CAD", "AUD"]
                .map(String::from)
                .to_vec(),
            categories: [
                "Food",
                "Transport",
                "Entertainment",
                "Utilities",
                "Shopping",
                "Health",
                "Salary",
                "Freelance",
                "Other",
            ]
            .map(String::from)
            .to_vec(),
            log_file: "cambio_tui.log".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Selector currencies, parsed and deduplicated. The display currency is always
    /// part of the list.
    pub fn currency_codes(&self) -> Result<(CurrencyCode, Vec<CurrencyCode>)> {
        let display = CurrencyCode::try_from(self.display_currency.as_str())?;
        let mut codes = Vec::with_capacity(self.currencies.len() + 1);
        for raw in &self.currencies {
            let code = CurrencyCode::try_from(raw.as_str())?;
            if !codes.contains(&code) {
                codes.push(code);
            }
        }
        if !codes.contains(&display) {
            codes.insert(0, display.clone());
        }
        Ok((display, codes))
    }
}

#[derive(Debug, Parser)]
#[command(name = "cambio_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:5000/api/).
    #[arg(long)]
    base_url: Option<String>,
    /// Override the exchange-rate endpoint.
    #[arg(long)]
    rates_url: Option<String>,
    /// Override the initial display currency (ISO 4217 code).
    #[arg(long)]
    currency: Option<String>,
    /// Override the log file path.
    #[arg(long)]
    log_file: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let builder = config::Config::builder()
        .add_source(config::File::with_name(config_path).required(false))
        .add_source(
            config::Environment::with_prefix("CAMBIO_TUI")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("currencies")
                .with_list_parse_key("categories"),
        );
    let mut settings = from_builder(builder)?;

    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(rates_url) = args.rates_url {
        settings.rates_url = rates_url;
    }
    if let Some(currency) = args.currency {
        settings.display_currency = currency;
    }
    if let Some(log_file) = args.log_file {
        settings.log_file = log_file;
    }

    Ok(settings)
}

fn from_builder(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<AppConfig> {
    Ok(builder.build()?.try_deserialize()?)
}
