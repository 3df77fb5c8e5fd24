use serde::{Deserialize, Serialize};

use super::{ChartSeries, IndicatorSnapshot, ScoreBreakdown, SignalLabel};

/// Result of analysing one asset over one lookback window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CryptoAnalysis {
    /// CoinGecko asset id.
    pub crypto: String,
    /// Lookback window in days.
    pub days: u32,
    /// Display string, e.g. "BUY 🚀".
    pub indication: String,
    pub label: SignalLabel,
    /// Display string, e.g. "70.0% Certainty".
    pub certainty: String,
    pub certainty_percent: f64,
    /// Line color for the recommendation.
    pub color: String,
    /// Latest price in the quote currency.
    pub price: f64,
    /// Latest 24h volume, if the upstream reported one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    pub indicators: IndicatorSnapshot,
    pub breakdown: ScoreBreakdown,
    pub chart: ChartSeries,
    /// Unix timestamp (milliseconds) when computed.
    pub timestamp: i64,
}
