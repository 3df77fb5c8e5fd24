//! Price history and recommendation endpoint.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::debug;

use crate::error::{AppError, Result};
use crate::types::CryptoAnalysis;
use crate::AppState;

/// Query parameters for the crypto data endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct CryptoDataQuery {
    /// CoinGecko id or ticker symbol (e.g. "bitcoin", "btc").
    pub crypto: Option<String>,
    /// Lookback window in days. Kept raw so a malformed value falls back to
    /// the default instead of rejecting the request.
    pub days: Option<String>,
}

impl CryptoDataQuery {
    /// Parsed `days`, or `default` when absent or not an unsigned integer.
    pub fn days_or(&self, default: u32) -> u32 {
        match self.days.as_deref().map(str::trim) {
            None | Some("") => default,
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                debug!(days = %raw, "Ignoring malformed days parameter");
                default
            }),
        }
    }
}

/// Create the crypto data router.
pub fn router() -> Router<AppState> {
    Router::new().route("/crypto-data", get(get_crypto_data))
}

/// Get price history plus a buy/sell/hold recommendation.
async fn get_crypto_data(
    State(state): State<AppState>,
    query: std::result::Result<Query<CryptoDataQuery>, QueryRejection>,
) -> Result<Json<CryptoAnalysis>> {
    let Query(query) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let days = query.days_or(state.analysis.default_days());
    let crypto = query
        .crypto
        .unwrap_or_else(|| state.analysis.default_crypto().to_string());

    let analysis = state.analysis.analyze(&crypto, days).await?;

    Ok(Json(analysis))
}
