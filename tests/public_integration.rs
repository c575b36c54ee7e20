use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kraken_rest_client::KrakenError;
use kraken_rest_client::error::TransportError;
use kraken_rest_client::rest::KrakenRestClient;
use kraken_rest_client::rest::endpoints::public;
use kraken_rest_client::rest::public::{OhlcRequest, OrderBookRequest, RecentTradesRequest};
use kraken_rest_client::types::OhlcInterval;
use reqwest::StatusCode;
use rust_decimal::Decimal;

fn build_client(server: &MockServer) -> KrakenRestClient {
    KrakenRestClient::builder().base_url(server.uri()).build()
}

#[tokio::test]
async fn test_get_server_time_has_no_query_string() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "error": [],
        "result": {"unixtime": 1700000000, "rfc1123": "Tue, 14 Nov 23 22:13:20 +0000"}
    });

    Mock::given(method("GET"))
        .and(path("/0/public/Time"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let time = client.get_server_time().await.unwrap();
    assert_eq!(time.unixtime, 1_700_000_000);
    assert_eq!(time.datetime().unwrap().unix_timestamp(), 1_700_000_000);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn test_get_ticker_is_unsigned_get() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "error": [],
        "result": {
            "XXBTZUSD": {
                "a": ["30300.10000", "1", "1.000"],
                "b": ["30300.00000", "1", "1.000"],
                "c": ["30303.20000", "0.00067643"],
                "v": ["4083.67001100", "4412.73601799"],
                "p": ["30706.77771", "30689.13205"],
                "t": [34619, 38907],
                "l": ["29868.30000", "29868.30000"],
                "h": ["31631.00000", "31631.00000"],
                "o": "30502.80000"
            }
        }
    });

    Mock::given(method("GET"))
        .and(path("/0/public/Ticker"))
        .and(query_param("pair", "XBTUSD"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let ticker = client.get_ticker("XBTUSD").await.unwrap();
    let xbt = &ticker["XXBTZUSD"];
    assert_eq!(xbt.last_price(), Some("30303.2".parse::<Decimal>().unwrap()));

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].body.is_empty());
    assert!(requests[0].headers.get("API-Key").is_none());
    assert!(requests[0].headers.get("API-Sign").is_none());
}

#[tokio::test]
async fn test_get_ohlc_with_interval() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "error": [],
        "result": {
            "XXBTZUSD": [
                [1688671200, "30306.1", "30306.2", "30305.7", "30305.7", "30306.1", "3.39243896", 23],
                [1688674800, "30305.7", "30309.0", "30200.0", "30250.1", "30260.3", "12.50000000", 140]
            ],
            "last": 1688671200
        }
    });

    Mock::given(method("GET"))
        .and(path("/0/public/OHLC"))
        .and(query_param("pair", "XBTUSD"))
        .and(query_param("interval", "60"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let request = OhlcRequest::new("XBTUSD").interval(OhlcInterval::Hour1);
    let page = client.get_ohlc(&request).await.unwrap();

    assert_eq!(page.last_as_i64(), Some(1_688_671_200));
    let candles = page.pair("XXBTZUSD").unwrap();
    assert_eq!(candles.len(), 2);
    assert_eq!(candles[1].time - candles[0].time, OhlcInterval::Hour1.seconds());
    assert_eq!(candles[1].count, 140);
}

#[tokio::test]
async fn test_get_recent_trades_passes_cursor() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "error": [],
        "result": {
            "XXBTZUSD": [
                ["30243.40000", "0.34507674", 1688669597.8277369, "s", "l", "", 60696397]
            ],
            "last": "1688671969993150842"
        }
    });

    Mock::given(method("GET"))
        .and(path("/0/public/Trades"))
        .and(query_param("pair", "XBTUSD"))
        .and(query_param("since", "1688669000000000000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let request = RecentTradesRequest::new("XBTUSD").since("1688669000000000000");
    let page = client.get_recent_trades(&request).await.unwrap();

    assert_eq!(page.last, "1688671969993150842");
    let trade = &page.pair("XXBTZUSD").unwrap()[0];
    assert!(!trade.is_buy());
    assert_eq!(trade.trade_id, 60_696_397);
}

#[tokio::test]
async fn test_get_order_book() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "error": [],
        "result": {
            "XXBTZUSD": {
                "asks": [["30384.10000", "2.059", 1688671659]],
                "bids": [["30297.00000", "0.115", 1688671656]]
            }
        }
    });

    Mock::given(method("GET"))
        .and(path("/0/public/Depth"))
        .and(query_param("count", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let books = client
        .get_order_book(&OrderBookRequest::new("XBTUSD").count(10))
        .await
        .unwrap();
    let book = &books["XXBTZUSD"];
    assert!(book.best_ask().unwrap().price > book.best_bid().unwrap().price);
}

#[tokio::test]
async fn test_api_error_is_reported() {
    let server = MockServer::start().await;
    let response = serde_json::json!({"error": ["EQuery:Unknown asset pair"]});

    Mock::given(method("GET"))
        .and(path("/0/public/Ticker"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client.get_ticker("NOPE").await.unwrap_err();
    match err {
        KrakenError::Api(api) => {
            assert_eq!(api.code, "EQuery");
            assert_eq!(api.message, "Unknown asset pair");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_http_error_status_is_transport_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/0/public/SystemStatus"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client.get_system_status().await.unwrap_err();
    match err {
        KrakenError::Transport(TransportError::Status { status, body }) => {
            assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
            assert_eq!(body, "upstream unavailable");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_decode_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/0/public/Time"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client.get_server_time().await.unwrap_err();
    assert!(matches!(err, KrakenError::Decode(_)));
}

#[tokio::test]
async fn test_raw_public_query_returns_body_verbatim() {
    let server = MockServer::start().await;
    let body = r#"{"error":[],"result":{"status":"online","timestamp":"2023-07-06T18:52:00Z"}}"#;

    Mock::given(method("GET"))
        .and(path("/0/public/SystemStatus"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let raw = client
        .dispatcher()
        .public_query(public::SYSTEM_STATUS, &())
        .await
        .unwrap();
    assert_eq!(raw, body);
}
