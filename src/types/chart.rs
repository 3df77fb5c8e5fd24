use serde::{Deserialize, Serialize};

/// A single timestamped value from a market chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Unix timestamp in milliseconds.
    pub time: i64,
    pub value: f64,
}

impl PricePoint {
    pub fn new(time: i64, value: f64) -> Self {
        Self { time, value }
    }
}

/// Time-ordered price and volume history for one asset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketChart {
    pub prices: Vec<PricePoint>,
    pub volumes: Vec<PricePoint>,
}

impl MarketChart {
    /// Price values in time order.
    pub fn closes(&self) -> Vec<f64> {
        self.prices.iter().map(|p| p.value).collect()
    }

    /// Most recent price.
    pub fn latest_price(&self) -> Option<f64> {
        self.prices.last().map(|p| p.value)
    }

    /// Most recent 24h volume.
    pub fn latest_volume(&self) -> Option<f64> {
        self.volumes.last().map(|p| p.value)
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }
}

/// Line series handed to the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    /// Series name, e.g. "Bitcoin".
    pub name: String,
    /// Title describing the lookback window.
    pub title: String,
    /// Line color matching the recommendation.
    pub color: String,
    pub points: Vec<PricePoint>,
}

/// Capitalize the first character of an asset id for display.
pub fn display_name(id: &str) -> String {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
