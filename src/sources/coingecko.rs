use crate::config::Config;
use crate::error::{AppError, Result};
use crate::types::{MarketChart, PricePoint};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Symbol to CoinGecko ID mapping.
pub const SYMBOL_TO_ID: &[(&str, &str)] = &[
    ("btc", "bitcoin"),
    ("eth", "ethereum"),
    ("bnb", "binancecoin"),
    ("sol", "solana"),
    ("xrp", "ripple"),
    ("doge", "dogecoin"),
    ("ada", "cardano"),
    ("avax", "avalanche-2"),
    ("dot", "polkadot"),
    ("link", "chainlink"),
    ("matic", "matic-network"),
    ("shib", "shiba-inu"),
    ("ltc", "litecoin"),
    ("trx", "tron"),
    ("atom", "cosmos"),
    ("uni", "uniswap"),
    ("xlm", "stellar"),
    ("bch", "bitcoin-cash"),
    ("near", "near"),
    ("apt", "aptos"),
];

/// Resolve a ticker symbol or CoinGecko id to a CoinGecko id.
///
/// Known tickers map to their id; anything else is treated as an id.
pub fn resolve_id(crypto: &str) -> String {
    let lower = crypto.trim().to_lowercase();
    SYMBOL_TO_ID
        .iter()
        .find(|(symbol, _)| *symbol == lower)
        .map(|(_, id)| id.to_string())
        .unwrap_or(lower)
}

/// Whether `id` has the shape of a CoinGecko id: lowercase ASCII letters,
/// digits and hyphens.
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

/// CoinGecko market chart response.
///
/// Every field is optional: error bodies share the endpoint.
#[derive(Debug, Deserialize)]
struct CoinGeckoMarketChart {
    prices: Option<Vec<[f64; 2]>>,
    total_volumes: Option<Vec<[f64; 2]>>,
    status: Option<CoinGeckoStatus>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CoinGeckoStatus {
    error_code: Option<u16>,
    error_message: Option<String>,
}

fn to_points(pairs: Vec<[f64; 2]>) -> Vec<PricePoint> {
    pairs
        .into_iter()
        .map(|[time, value]| PricePoint::new(time as i64, value))
        .collect()
}

/// CoinGecko REST client.
#[derive(Clone)]
pub struct CoinGeckoClient {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
    vs_currency: String,
}

impl CoinGeckoClient {
    /// Create a new CoinGecko client.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("crypto-signal/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: Url::parse(&config.coingecko_api_url).map_err(|e| {
                AppError::Internal(format!(
                    "Invalid CoinGecko API URL {}: {}",
                    config.coingecko_api_url, e
                ))
            })?,
            api_key: config.coingecko_api_key.clone(),
            vs_currency: config.vs_currency.clone(),
        })
    }

    /// `{base}/coins/{coin_id}/market_chart` with `coin_id` as a single
    /// percent-encoded path segment.
    fn market_chart_url(&self, coin_id: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                AppError::Internal(format!("CoinGecko API URL cannot be a base: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(["coins", coin_id, "market_chart"]);
        Ok(url)
    }

    /// Fetch price and volume history for `coin_id` over the last `days` days.
    pub async fn market_chart(&self, coin_id: &str, days: u32) -> Result<MarketChart> {
        let url = self.market_chart_url(coin_id)?;

        debug!(coin = %coin_id, days, "Fetching CoinGecko market chart");

        let days_param = days.to_string();
        let mut request = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .query(&[
                ("vs_currency", self.vs_currency.as_str()),
                ("days", days_param.as_str()),
            ]);

        if let Some(ref key) = self.api_key {
            request = request.header("x-cg-pro-api-key", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("CoinGecko request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::ExternalApi(format!("CoinGecko response unreadable: {}", e)))?;

        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!(coin = %coin_id, "CoinGecko rate limit exceeded");
            return Err(AppError::RateLimited(
                "Error 429: API request limit exceeded.".to_string(),
            ));
        }

        if status == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!("Unknown coin: {}", coin_id)));
        }

        if !status.is_success() {
            let preview: String = body.chars().take(200).collect();
            warn!(
                coin = %coin_id,
                status = %status,
                "CoinGecko API returned {}: {}",
                status,
                preview
            );
            return Err(AppError::ExternalApi(format!(
                "CoinGecko API error {}",
                status
            )));
        }

        let chart: CoinGeckoMarketChart = serde_json::from_str(&body).map_err(|e| {
            AppError::ExternalApi(format!("Failed to parse CoinGecko response: {}", e))
        })?;

        // The free tier sometimes reports rate limiting inside the body
        let (rate_limited, upstream_message) = match chart.status {
            Some(upstream) => (upstream.error_code == Some(429), upstream.error_message),
            None => (false, None),
        };

        if rate_limited {
            warn!(coin = %coin_id, message = ?upstream_message, "CoinGecko rate limit exceeded");
            return Err(AppError::RateLimited(match upstream_message {
                Some(m) => format!("Error 429: API request limit exceeded. {}", m),
                None => "Error 429: API request limit exceeded.".to_string(),
            }));
        }

        let prices = match chart.prices {
            Some(prices) => prices,
            None => {
                let detail = chart
                    .error
                    .or(upstream_message)
                    .unwrap_or_else(|| "missing prices".to_string());
                return Err(AppError::ExternalApi(format!(
                    "CoinGecko response without prices: {}",
                    detail
                )));
            }
        };

        let chart = MarketChart {
            prices: to_points(prices),
            volumes: to_points(chart.total_volumes.unwrap_or_default()),
        };

        debug!(coin = %coin_id, days, points = chart.len(), "CoinGecko market chart fetched");

        Ok(chart)
    }
}
