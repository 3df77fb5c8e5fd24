//! Request-scoped analysis pipeline.
//!
//! Fetches a market chart, derives the indicator snapshot from its prices and
//! scores it. Nothing about a request outlives the returned value except the
//! cached market chart.

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::services::signals::{breakdown, classify, compute_snapshot};
use crate::services::Cache;
use crate::sources::coingecko::{is_valid_id, resolve_id, CoinGeckoClient};
use crate::types::{display_name, ChartSeries, CryptoAnalysis, MarketChart};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Computes buy/sell/hold analyses for assets.
pub struct AnalysisService {
    client: CoinGeckoClient,
    /// Keyed by (coin id, days)
    charts: Cache<(String, u32), MarketChart>,
    default_crypto: String,
    default_days: u32,
    max_days: u32,
}

impl AnalysisService {
    /// Create a new analysis service.
    pub fn new(config: &Config) -> Result<Arc<Self>> {
        Ok(Arc::new(Self {
            client: CoinGeckoClient::new(config)?,
            charts: Cache::new(Duration::from_secs(config.chart_cache_ttl_secs)),
            default_crypto: config.default_crypto.clone(),
            default_days: config.default_days,
            max_days: config.max_days,
        }))
    }

    pub fn default_crypto(&self) -> &str {
        &self.default_crypto
    }

    pub fn default_days(&self) -> u32 {
        self.default_days
    }

    /// Analyse `crypto` (ticker or CoinGecko id) over the last `days` days.
    pub async fn analyze(&self, crypto: &str, days: u32) -> Result<CryptoAnalysis> {
        if days == 0 || days > self.max_days {
            return Err(AppError::BadRequest(format!(
                "days must be between 1 and {}, got {}",
                self.max_days, days
            )));
        }

        let coin_id = resolve_id(crypto);
        if coin_id.is_empty() {
            return Err(AppError::BadRequest("crypto must not be empty".to_string()));
        }
        if !is_valid_id(&coin_id) {
            return Err(AppError::BadRequest(format!(
                "crypto must be a ticker or CoinGecko id (a-z, 0-9, '-'), got {:?}",
                crypto
            )));
        }

        let chart = self.market_chart(&coin_id, days).await?;

        let price = chart.latest_price().ok_or_else(|| {
            AppError::InsufficientData(format!("no price history for {}", coin_id))
        })?;

        let snapshot = compute_snapshot(&chart.closes())?;
        if !snapshot.is_finite() {
            return Err(AppError::InsufficientData(format!(
                "non-finite indicator readings for {}",
                coin_id
            )));
        }

        let parts = breakdown(&snapshot);
        let result = classify(parts.score);

        info!(
            coin = %coin_id,
            days,
            points = chart.len(),
            label = %result.label,
            certainty = result.certainty_percent,
            score = parts.score,
            "Computed recommendation"
        );

        let name = display_name(&coin_id);
        Ok(CryptoAnalysis {
            days,
            indication: result.label.indication().to_string(),
            label: result.label,
            certainty: result.certainty_text(),
            certainty_percent: result.certainty_percent,
            color: result.label.color().to_string(),
            price,
            volume: chart.latest_volume(),
            indicators: snapshot,
            breakdown: parts,
            chart: ChartSeries {
                title: format!("{} Price Over the Last {} Days", name, days),
                name,
                color: result.label.color().to_string(),
                points: chart.prices,
            },
            crypto: coin_id,
            timestamp: chrono::Utc::now().timestamp_millis(),
        })
    }

    async fn market_chart(&self, coin_id: &str, days: u32) -> Result<MarketChart> {
        let cache_key = (coin_id.to_string(), days);

        if let Some(chart) = self.charts.get(&cache_key) {
            debug!(coin = %coin_id, days, "Market chart cache hit");
            return Ok(chart);
        }

        let chart = self.client.market_chart(coin_id, days).await?;
        if chart.is_empty() {
            return Err(AppError::InsufficientData(format!(
                "no price history for {}",
                coin_id
            )));
        }

        let purged = self.charts.purge_expired();
        if purged > 0 {
            debug!(purged, "Dropped stale market charts");
        }
        self.charts.insert(cache_key, chart.clone());
        Ok(chart)
    }
}
