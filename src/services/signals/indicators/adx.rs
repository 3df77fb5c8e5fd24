//! Average Directional Index (ADX) indicator.

use super::Indicator;

/// ADX (Average Directional Index) indicator.
///
/// Measures trend strength (not direction):
/// - Below 20: Weak trend / ranging market
/// - 20-25: Emerging trend
/// - Above 25: Strong trend
///
/// Market charts only carry one price per timestamp, so `calculate` uses that
/// price as high, low and close.
pub struct Adx {
    period: usize,
}

impl Default for Adx {
    fn default() -> Self {
        Self::new(14)
    }
}

impl Adx {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    /// Calculate True Range.
    fn true_range(high: f64, low: f64, prev_close: f64) -> f64 {
        let hl = high - low;
        let hc = (high - prev_close).abs();
        let lc = (low - prev_close).abs();
        hl.max(hc).max(lc)
    }

    /// Calculate smoothed moving average (Wilder's smoothing).
    fn wilders_smooth(values: &[f64], period: usize) -> Vec<f64> {
        if period == 0 || values.len() < period {
            return Vec::new();
        }

        let mut result = Vec::with_capacity(values.len() - period + 1);
        let mut smoothed: f64 = values.iter().take(period).sum::<f64>() / period as f64;
        result.push(smoothed);

        for value in values.iter().skip(period) {
            smoothed = (smoothed * (period - 1) as f64 + value) / period as f64;
            result.push(smoothed);
        }

        result
    }

    /// ADX from separate high, low and close series of equal length.
    pub fn calculate_hlc(&self, highs: &[f64], lows: &[f64], closes: &[f64]) -> Option<f64> {
        let len = closes.len();
        if highs.len() != len || lows.len() != len || len < self.min_periods() {
            return None;
        }

        let mut plus_dm = Vec::with_capacity(len - 1);
        let mut minus_dm = Vec::with_capacity(len - 1);
        let mut tr = Vec::with_capacity(len - 1);

        for i in 1..len {
            let up_move = highs[i] - highs[i - 1];
            let down_move = lows[i - 1] - lows[i];

            plus_dm.push(if up_move > down_move && up_move > 0.0 {
                up_move
            } else {
                0.0
            });
            minus_dm.push(if down_move > up_move && down_move > 0.0 {
                down_move
            } else {
                0.0
            });

            tr.push(Self::true_range(highs[i], lows[i], closes[i - 1]));
        }

        let smoothed_plus_dm = Self::wilders_smooth(&plus_dm, self.period);
        let smoothed_minus_dm = Self::wilders_smooth(&minus_dm, self.period);
        let smoothed_tr = Self::wilders_smooth(&tr, self.period);

        let dx_values: Vec<f64> = smoothed_tr
            .iter()
            .zip(smoothed_plus_dm.iter().zip(smoothed_minus_dm.iter()))
            .map(|(&atr, (&plus, &minus))| {
                if atr == 0.0 {
                    return 0.0;
                }
                let plus_di = (plus / atr) * 100.0;
                let minus_di = (minus / atr) * 100.0;
                let di_sum = plus_di + minus_di;
                if di_sum > 0.0 {
                    ((plus_di - minus_di).abs() / di_sum) * 100.0
                } else {
                    0.0
                }
            })
            .collect();

        Self::wilders_smooth(&dx_values, self.period).last().copied()
    }
}

impl Indicator for Adx {
    type Output = f64;

    fn name(&self) -> String {
        format!("ADX ({})", self.period)
    }

    fn min_periods(&self) -> usize {
        self.period * 2 + 1
    }

    fn calculate(&self, prices: &[f64]) -> Option<f64> {
        self.calculate_hlc(prices, prices, prices)
    }
}
