use std::env;

const COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";
const COINGECKO_PRO_API_URL: &str = "https://pro-api.coingecko.com/api/v3";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// CoinGecko REST base URL.
    pub coingecko_api_url: String,
    /// CoinGecko API key (optional, for pro tier).
    pub coingecko_api_key: Option<String>,
    /// Quote currency for price history.
    pub vs_currency: String,
    /// Asset used when a request names none.
    pub default_crypto: String,
    /// Lookback window in days used when a request names none.
    pub default_days: u32,
    /// Largest lookback window a request may ask for.
    pub max_days: u32,
    /// How long fetched market charts stay cached (seconds).
    pub chart_cache_ttl_secs: u64,
    /// Upstream request timeout (seconds).
    pub request_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let coingecko_api_key = env::var("COINGECKO_API_KEY")
            .ok()
            .filter(|k| !k.is_empty());

        // Pro keys only work against the pro host
        let default_url = if coingecko_api_key.is_some() {
            COINGECKO_PRO_API_URL
        } else {
            COINGECKO_API_URL
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(80),
            coingecko_api_url: env::var("COINGECKO_API_URL")
                .unwrap_or_else(|_| default_url.to_string()),
            coingecko_api_key,
            vs_currency: env::var("VS_CURRENCY").unwrap_or_else(|_| "usd".to_string()),
            default_crypto: env::var("DEFAULT_CRYPTO").unwrap_or_else(|_| "bitcoin".to_string()),
            default_days: env::var("DEFAULT_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
            max_days: env::var("MAX_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(365),
            chart_cache_ttl_secs: env::var("CHART_CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }

    /// Configuration pointing at a custom CoinGecko endpoint, defaults elsewhere.
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            coingecko_api_url: api_url.into(),
            ..Self::fallback()
        }
    }

    fn fallback() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 80,
            coingecko_api_url: COINGECKO_API_URL.to_string(),
            coingecko_api_key: None,
            vs_currency: "usd".to_string(),
            default_crypto: "bitcoin".to_string(),
            default_days: 1,
            max_days: 365,
            chart_cache_ttl_secs: 60,
            request_timeout_secs: 10,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
