//! Weighted buy/sell/hold scoring over the latest indicator readings.
//!
//! Four directional components are summed, then dampened by ADX trend
//! strength:
//!
//! | Component | Bullish | Bearish | Neutral |
//! |---|---|---|---|
//! | EMA(9) vs EMA(21) | `+0.3` short above long | `-0.3` otherwise | - |
//! | RSI(14) | `+0.2` below 30 | `-0.2` above 70 | 30..=70 |
//! | MACD vs signal | `+0.2` MACD above | `-0.2` otherwise | - |
//! | Bollinger(20) | `+0.15` below lower | `-0.15` above upper | inside bands |
//!
//! ADX above 25 keeps the full score, above 20 halves it, anything weaker
//! keeps a fifth. The dampened score is compared against ±0.5 without any
//! further rescaling.

use crate::types::{IndicatorSnapshot, ScoreBreakdown, ScoreResult, SignalLabel};

const TREND_WEIGHT: f64 = 0.3;
const MOMENTUM_WEIGHT: f64 = 0.2;
const MACD_WEIGHT: f64 = 0.2;
const BOLLINGER_WEIGHT: f64 = 0.15;

const RSI_OVERSOLD: f64 = 30.0;
const RSI_OVERBOUGHT: f64 = 70.0;

const ADX_STRONG: f64 = 25.0;
const ADX_TRENDING: f64 = 20.0;

const ACTION_THRESHOLD: f64 = 0.5;

/// Score a snapshot into a label and certainty.
///
/// Total over finite inputs. Non-finite readings are a caller bug; debug
/// builds assert on them.
pub fn score(snapshot: &IndicatorSnapshot) -> ScoreResult {
    classify(breakdown(snapshot).score)
}

/// Compute every component of the score for a snapshot.
pub fn breakdown(snapshot: &IndicatorSnapshot) -> ScoreBreakdown {
    debug_assert!(
        snapshot.is_finite(),
        "indicator snapshot must be finite: {:?}",
        snapshot
    );

    let trend = if snapshot.ema_short > snapshot.ema_long {
        TREND_WEIGHT
    } else {
        -TREND_WEIGHT
    };

    let momentum = if snapshot.rsi < RSI_OVERSOLD {
        MOMENTUM_WEIGHT
    } else if snapshot.rsi > RSI_OVERBOUGHT {
        -MOMENTUM_WEIGHT
    } else {
        0.0
    };

    let macd = if snapshot.macd > snapshot.macd_signal {
        MACD_WEIGHT
    } else {
        -MACD_WEIGHT
    };

    let bollinger = if snapshot.price < snapshot.bollinger_lower {
        BOLLINGER_WEIGHT
    } else if snapshot.price > snapshot.bollinger_upper {
        -BOLLINGER_WEIGHT
    } else {
        0.0
    };

    let raw = trend + momentum + macd + bollinger;
    let adx_weight = adx_weight(snapshot.adx);

    ScoreBreakdown {
        trend,
        momentum,
        macd,
        bollinger,
        raw,
        adx_weight,
        score: raw * adx_weight,
    }
}

/// Trend-strength multiplier for an ADX reading.
pub fn adx_weight(adx: f64) -> f64 {
    if adx > ADX_STRONG {
        1.0
    } else if adx > ADX_TRENDING {
        0.5
    } else {
        0.2
    }
}

/// Map a dampened score to a label and certainty.
pub fn classify(score: f64) -> ScoreResult {
    let (label, certainty) = if score > ACTION_THRESHOLD {
        (SignalLabel::Buy, score)
    } else if score < -ACTION_THRESHOLD {
        (SignalLabel::Sell, score.abs())
    } else {
        (SignalLabel::Hold, 1.0 - score.abs())
    };

    ScoreResult {
        label,
        certainty_percent: round_to_tenth(certainty * 100.0),
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
