//! Technical indicator implementations.

pub mod adx;
pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;

pub use adx::Adx;
pub use bollinger::{BollingerBands, BollingerReading};
pub use ema::Ema;
pub use macd::{Macd, MacdReading};
pub use rsi::Rsi;

use crate::error::{AppError, Result};
use crate::types::IndicatorSnapshot;

/// Short and long EMA periods compared by the trend component.
pub const EMA_SHORT_PERIOD: usize = 9;
pub const EMA_LONG_PERIOD: usize = 21;

/// Trait for implementing technical indicators over a price series.
pub trait Indicator: Send + Sync {
    /// Latest reading produced by this indicator.
    type Output;

    /// Human-readable name.
    fn name(&self) -> String;

    /// Minimum number of prices required for calculation.
    fn min_periods(&self) -> usize;

    /// Calculate the latest reading from time-ordered prices.
    /// Returns None if insufficient data.
    fn calculate(&self, prices: &[f64]) -> Option<Self::Output>;
}

/// Fewest prices for which every snapshot indicator produces a reading.
pub fn required_periods() -> usize {
    [
        Ema::new(EMA_LONG_PERIOD).min_periods(),
        Rsi::default().min_periods(),
        Macd::default().min_periods(),
        BollingerBands::default().min_periods(),
        Adx::default().min_periods(),
    ]
    .into_iter()
    .max()
    .unwrap_or(0)
}

fn reading<I: Indicator>(indicator: &I, prices: &[f64]) -> Result<I::Output> {
    indicator.calculate(prices).ok_or_else(|| {
        AppError::InsufficientData(format!(
            "{} needs {} price points, got {}",
            indicator.name(),
            indicator.min_periods(),
            prices.len()
        ))
    })
}

/// Compute every indicator the scorer needs from one price series.
///
/// All readings are taken at the last index of `prices`.
pub fn compute_snapshot(prices: &[f64]) -> Result<IndicatorSnapshot> {
    let price = *prices
        .last()
        .ok_or_else(|| AppError::InsufficientData("price series is empty".to_string()))?;

    let ema_short = reading(&Ema::new(EMA_SHORT_PERIOD), prices)?;
    let ema_long = reading(&Ema::new(EMA_LONG_PERIOD), prices)?;
    let rsi = reading(&Rsi::default(), prices)?;
    let macd = reading(&Macd::default(), prices)?;
    let bands = reading(&BollingerBands::default(), prices)?;
    let adx = reading(&Adx::default(), prices)?;

    Ok(IndicatorSnapshot {
        price,
        ema_short,
        ema_long,
        rsi,
        macd: macd.macd,
        macd_signal: macd.signal,
        bollinger_upper: bands.upper,
        bollinger_lower: bands.lower,
        adx,
    })
}
