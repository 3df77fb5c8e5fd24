//! Exponential Moving Average (EMA) indicator.

use super::Indicator;

/// EMA (Exponential Moving Average) indicator.
///
/// Like SMA but gives more weight to recent prices. Seeded with the SMA of
/// the first `period` values.
pub struct Ema {
    period: usize,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

/// EMA of every value from index `period - 1` onward.
///
/// Returns an empty series when there are fewer than `period` values.
pub fn ema_series(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return Vec::new();
    }

    let multiplier = 2.0 / (period as f64 + 1.0);

    // First EMA is SMA
    let sma: f64 = values.iter().take(period).sum::<f64>() / period as f64;

    let mut ema = Vec::with_capacity(values.len() - period + 1);
    let mut current = sma;
    ema.push(current);

    for value in values.iter().skip(period) {
        current = (value - current) * multiplier + current;
        ema.push(current);
    }

    ema
}

impl Indicator for Ema {
    type Output = f64;

    fn name(&self) -> String {
        format!("EMA ({})", self.period)
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn calculate(&self, prices: &[f64]) -> Option<f64> {
        ema_series(prices, self.period).last().copied()
    }
}
