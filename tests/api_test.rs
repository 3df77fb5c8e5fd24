/**
 * HTTP API Tests
 *
 * Runs the full router against a mocked CoinGecko:
 * - Recommendation payload for a healthy price history
 * - Ticker resolution and query defaults
 * - Upstream rate limiting and malformed responses
 * - Request validation and chart caching
 */

use axum::http::StatusCode;
use axum_test::TestServer;
use crypto_signal::config::Config;
use crypto_signal::{app, AppState};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const START_MS: i64 = 1_700_000_000_000;
const HOUR_MS: i64 = 3_600_000;
const POINTS: usize = 60;

/// Accelerating uptrend: EMA(9) above EMA(21), MACD above its signal,
/// RSI pinned at 100, last price inside the bands and ADX at 100.
fn rising_price(i: usize) -> f64 {
    100.0 + 0.1 * (i * i) as f64
}

fn volume(i: usize) -> f64 {
    1_000.0 + i as f64
}

fn market_chart_body(points: usize) -> Value {
    let prices: Vec<Value> = (0..points)
        .map(|i| json!([START_MS + i as i64 * HOUR_MS, rising_price(i)]))
        .collect();
    let volumes: Vec<Value> = (0..points)
        .map(|i| json!([START_MS + i as i64 * HOUR_MS, volume(i)]))
        .collect();

    json!({
        "prices": prices,
        "market_caps": [],
        "total_volumes": volumes,
    })
}

async fn test_server(upstream: &MockServer) -> TestServer {
    let config = Config::with_api_url(upstream.uri());
    let state = AppState::new(config).expect("build app state");
    TestServer::new(app(state)).expect("start test server")
}

async fn mock_chart(upstream: &MockServer, coin: &str, days: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/coins/{}/market_chart", coin)))
        .and(query_param("vs_currency", "usd"))
        .and(query_param("days", days))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(upstream)
        .await;
}

#[tokio::test]
async fn test_health_endpoint() {
    let upstream = MockServer::start().await;
    let server = test_server(&upstream).await;

    let response = server.get("/api/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "crypto-signal");
    assert_eq!(body["defaultCrypto"], "bitcoin");
}

#[tokio::test]
async fn test_crypto_data_defaults_to_bitcoin_one_day() {
    let upstream = MockServer::start().await;
    mock_chart(&upstream, "bitcoin", "1", market_chart_body(POINTS)).await;
    let server = test_server(&upstream).await;

    let response = server.get("/crypto-data").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["crypto"], "bitcoin");
    assert_eq!(body["days"], 1);
    assert_eq!(body["label"], "HOLD");
    assert_eq!(body["indication"], "HOLD 🏁");
    assert_eq!(body["certainty"], "70.0% Certainty");
    assert_eq!(body["certaintyPercent"], 70.0);
    assert_eq!(body["color"], "#3498db");
    assert_eq!(body["price"], rising_price(POINTS - 1));
    assert_eq!(body["volume"], volume(POINTS - 1));
}

#[tokio::test]
async fn test_crypto_data_breakdown_matches_readings() {
    let upstream = MockServer::start().await;
    mock_chart(&upstream, "bitcoin", "1", market_chart_body(POINTS)).await;
    let server = test_server(&upstream).await;

    let body: Value = server.get("/crypto-data").await.json();

    let breakdown = &body["breakdown"];
    assert_eq!(breakdown["trend"], 0.3);
    assert_eq!(breakdown["momentum"], -0.2);
    assert_eq!(breakdown["macd"], 0.2);
    assert_eq!(breakdown["bollinger"], 0.0);
    assert_eq!(breakdown["adxWeight"], 1.0);

    let indicators = &body["indicators"];
    assert_eq!(indicators["rsi"], 100.0);
    assert!(indicators["emaShort"].as_f64().unwrap() > indicators["emaLong"].as_f64().unwrap());
    assert!(indicators["adx"].as_f64().unwrap() > 25.0);
}

#[tokio::test]
async fn test_crypto_data_chart_series() {
    let upstream = MockServer::start().await;
    mock_chart(&upstream, "ethereum", "7", market_chart_body(POINTS)).await;
    let server = test_server(&upstream).await;

    let response = server
        .get("/crypto-data")
        .add_query_param("crypto", "ETH")
        .add_query_param("days", "7")
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["crypto"], "ethereum");

    let chart = &body["chart"];
    assert_eq!(chart["name"], "Ethereum");
    assert_eq!(chart["title"], "Ethereum Price Over the Last 7 Days");
    assert_eq!(chart["color"], body["color"]);

    let points = chart["points"].as_array().unwrap();
    assert_eq!(points.len(), POINTS);
    assert_eq!(points[0]["time"], START_MS);
    assert_eq!(points[0]["value"], rising_price(0));
}

#[tokio::test]
async fn test_crypto_data_http_rate_limit() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/coins/bitcoin/market_chart"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&upstream)
        .await;
    let server = test_server(&upstream).await;

    let response = server.get("/crypto-data").await;
    assert_eq!(response.status_code(), StatusCode::TOO_MANY_REQUESTS);

    let body: Value = response.json();
    assert_eq!(body["status"], 429);
    assert!(body["error"].as_str().unwrap().contains("429"));
}

#[tokio::test]
async fn test_crypto_data_rate_limit_in_body() {
    let upstream = MockServer::start().await;
    mock_chart(
        &upstream,
        "bitcoin",
        "1",
        json!({
            "status": {
                "error_code": 429,
                "error_message": "You've exceeded the Rate Limit."
            }
        }),
    )
    .await;
    let server = test_server(&upstream).await;

    let response = server.get("/crypto-data").await;
    assert_eq!(response.status_code(), StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_crypto_data_missing_prices() {
    let upstream = MockServer::start().await;
    mock_chart(&upstream, "bitcoin", "1", json!({ "unexpected": true })).await;
    let server = test_server(&upstream).await;

    let response = server.get("/crypto-data").await;
    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_crypto_data_unknown_coin() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/coins/notacoin/market_chart"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "coin not found" })))
        .mount(&upstream)
        .await;
    let server = test_server(&upstream).await;

    let response = server
        .get("/crypto-data")
        .add_query_param("crypto", "notacoin")
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_crypto_data_short_history() {
    let upstream = MockServer::start().await;
    mock_chart(&upstream, "bitcoin", "1", market_chart_body(10)).await;
    let server = test_server(&upstream).await;

    let response = server.get("/crypto-data").await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_crypto_data_empty_history() {
    let upstream = MockServer::start().await;
    mock_chart(
        &upstream,
        "bitcoin",
        "1",
        json!({ "prices": [], "total_volumes": [] }),
    )
    .await;
    let server = test_server(&upstream).await;

    let response = server.get("/crypto-data").await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_crypto_data_rejects_out_of_range_days() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(market_chart_body(POINTS)))
        .expect(0)
        .mount(&upstream)
        .await;
    let server = test_server(&upstream).await;

    let response = server.get("/crypto-data").add_query_param("days", "0").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = server
        .get("/crypto-data")
        .add_query_param("days", "366")
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_crypto_data_caches_market_chart() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/coins/bitcoin/market_chart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(market_chart_body(POINTS)))
        .expect(1)
        .mount(&upstream)
        .await;
    let server = test_server(&upstream).await;

    let first: Value = server.get("/crypto-data").await.json();
    let second: Value = server
        .get("/crypto-data")
        .add_query_param("crypto", "btc")
        .await
        .json();

    assert_eq!(first["label"], second["label"]);
    assert_eq!(first["certainty"], second["certainty"]);
    assert_eq!(first["price"], second["price"]);
}

#[tokio::test]
async fn test_crypto_data_malformed_days_uses_default() {
    let upstream = MockServer::start().await;
    mock_chart(&upstream, "bitcoin", "1", market_chart_body(POINTS)).await;
    let server = test_server(&upstream).await;

    for raw in ["abc", "-1", "1.5"] {
        let response = server.get("/crypto-data").add_query_param("days", raw).await;
        assert_eq!(response.status_code(), StatusCode::OK, "days={}", raw);

        let body: Value = response.json();
        assert_eq!(body["days"], 1);
    }
}

#[tokio::test]
async fn test_crypto_data_rejects_path_like_crypto() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(market_chart_body(POINTS)))
        .expect(0)
        .mount(&upstream)
        .await;
    let server = test_server(&upstream).await;

    for raw in ["../../../evil?x=", "bitcoin/market_chart", "bit coin"] {
        let response = server.get("/crypto-data").add_query_param("crypto", raw).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "crypto={}", raw);

        let body: Value = response.json();
        assert_eq!(body["status"], 400);
    }
}

#[tokio::test]
async fn test_crypto_data_rejects_blank_crypto() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(market_chart_body(POINTS)))
        .expect(0)
        .mount(&upstream)
        .await;
    let server = test_server(&upstream).await;

    for raw in ["", "   "] {
        let response = server.get("/crypto-data").add_query_param("crypto", raw).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "crypto={:?}", raw);

        let body: Value = response.json();
        assert!(body["error"].as_str().unwrap().contains("empty"));
    }
}

#[tokio::test]
async fn test_crypto_data_overflowing_prices() {
    let upstream = MockServer::start().await;
    let prices: Vec<Value> = (0..POINTS)
        .map(|i| {
            let price = if i % 2 == 0 { 1.0e308 } else { 1.7e308 };
            json!([START_MS + i as i64 * HOUR_MS, price])
        })
        .collect();
    mock_chart(
        &upstream,
        "bitcoin",
        "1",
        json!({ "prices": prices, "total_volumes": [] }),
    )
    .await;
    let server = test_server(&upstream).await;

    // Indicator sums overflow to infinity
    let response = server.get("/crypto-data").await;
    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("non-finite"));
}
