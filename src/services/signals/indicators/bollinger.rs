//! Bollinger Bands indicator.

use super::Indicator;
use serde::{Deserialize, Serialize};

/// Bollinger Bands indicator.
///
/// Consists of:
/// - Middle band: SMA(20)
/// - Upper band: SMA + 2 * StdDev
/// - Lower band: SMA - 2 * StdDev
pub struct BollingerBands {
    period: usize,
    std_dev_multiplier: f64,
}

/// Latest band values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerReading {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self::new(20, 2.0)
    }
}

impl BollingerBands {
    pub fn new(period: usize, std_dev_multiplier: f64) -> Self {
        Self {
            period,
            std_dev_multiplier,
        }
    }

    /// Calculate population standard deviation.
    fn std_dev(values: &[f64], mean: f64) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        let variance: f64 =
            values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
        variance.sqrt()
    }
}

impl Indicator for BollingerBands {
    type Output = BollingerReading;

    fn name(&self) -> String {
        format!("Bollinger Bands ({})", self.period)
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn calculate(&self, prices: &[f64]) -> Option<BollingerReading> {
        if self.period == 0 || prices.len() < self.period {
            return None;
        }

        let window = &prices[prices.len() - self.period..];

        let middle = window.iter().sum::<f64>() / self.period as f64;
        let std_dev = Self::std_dev(window, middle);

        Some(BollingerReading {
            upper: middle + self.std_dev_multiplier * std_dev,
            middle,
            lower: middle - self.std_dev_multiplier * std_dev,
        })
    }
}
