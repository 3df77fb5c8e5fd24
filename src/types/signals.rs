use serde::{Deserialize, Serialize};

/// Recommendation produced by the signal scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalLabel {
    Buy,
    Sell,
    Hold,
}

impl SignalLabel {
    /// Get the plain label.
    pub fn label(&self) -> &'static str {
        match self {
            SignalLabel::Buy => "BUY",
            SignalLabel::Sell => "SELL",
            SignalLabel::Hold => "HOLD",
        }
    }

    /// Get the display string shown next to the chart.
    pub fn indication(&self) -> &'static str {
        match self {
            SignalLabel::Buy => "BUY 🚀",
            SignalLabel::Sell => "SELL 📉",
            SignalLabel::Hold => "HOLD 🏁",
        }
    }

    /// Get the line color used when rendering this recommendation.
    pub fn color(&self) -> &'static str {
        match self {
            SignalLabel::Buy => "#008000",
            SignalLabel::Sell => "#ff0000",
            SignalLabel::Hold => "#3498db",
        }
    }
}

impl std::fmt::Display for SignalLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Latest indicator readings for one price series.
///
/// Every field must come from the same series at the same latest index.
/// The scorer does not check temporal alignment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSnapshot {
    /// Latest observed price.
    pub price: f64,
    /// Short-period EMA (9).
    pub ema_short: f64,
    /// Long-period EMA (21).
    pub ema_long: f64,
    /// RSI (14), 0-100.
    pub rsi: f64,
    /// MACD line (12/26).
    pub macd: f64,
    /// MACD signal line (9).
    pub macd_signal: f64,
    /// Upper Bollinger band (20, 2σ).
    pub bollinger_upper: f64,
    /// Lower Bollinger band (20, 2σ).
    pub bollinger_lower: f64,
    /// ADX (14), conventionally 0-100.
    pub adx: f64,
}

impl IndicatorSnapshot {
    /// Whether every reading is a finite real number.
    pub fn is_finite(&self) -> bool {
        [
            self.price,
            self.ema_short,
            self.ema_long,
            self.rsi,
            self.macd,
            self.macd_signal,
            self.bollinger_upper,
            self.bollinger_lower,
            self.adx,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// Scorer output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub label: SignalLabel,
    /// Certainty in [0, 100], rounded to one decimal place.
    pub certainty_percent: f64,
}

impl ScoreResult {
    /// Certainty formatted for display, e.g. `"70.0% Certainty"`.
    pub fn certainty_text(&self) -> String {
        format!("{:.1}% Certainty", self.certainty_percent)
    }
}

/// Per-component contributions behind a score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    /// EMA crossover contribution (±0.3).
    pub trend: f64,
    /// RSI contribution (±0.2 or 0).
    pub momentum: f64,
    /// MACD contribution (±0.2).
    pub macd: f64,
    /// Bollinger band contribution (±0.15 or 0).
    pub bollinger: f64,
    /// Sum of the four components, in [-0.85, 0.85].
    pub raw: f64,
    /// ADX trend-strength multiplier (1.0, 0.5 or 0.2).
    pub adx_weight: f64,
    /// `raw * adx_weight`.
    pub score: f64,
}
