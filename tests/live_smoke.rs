use std::sync::Arc;

use kraken_rest_client::BlockingRestClient;
use kraken_rest_client::auth::EnvCredentials;
use kraken_rest_client::rest::KrakenRestClient;
use kraken_rest_client::rest::private::TradeVolumeRequest;

fn live_tests_enabled() -> bool {
    std::env::var("KRAKEN_LIVE_TESTS").ok().as_deref() == Some("1")
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[tokio::test]
#[ignore]
async fn live_public_smoke() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    if !live_tests_enabled() {
        return Ok(());
    }
    init_tracing();

    let client = KrakenRestClient::new();
    let time = client.get_server_time().await?;
    assert!(time.datetime().is_some());

    let ticker = client.get_ticker("XBTUSD").await?;
    assert!(!ticker.is_empty());

    Ok(())
}

#[tokio::test]
#[ignore]
async fn live_private_smoke() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    if !live_tests_enabled() {
        return Ok(());
    }
    init_tracing();

    let credentials = match EnvCredentials::try_from_env() {
        Some(creds) => creds,
        None => return Ok(()),
    };
    let client = KrakenRestClient::builder()
        .credentials(Arc::new(credentials))
        .build();

    let _balances = client.get_account_balance().await?;
    let volume = client
        .get_trade_volume(Some(&TradeVolumeRequest::default()))
        .await?;
    assert!(!volume.currency.is_empty());

    Ok(())
}

#[test]
#[ignore]
fn live_blocking_smoke() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();
    if !live_tests_enabled() {
        return Ok(());
    }
    init_tracing();

    let client = BlockingRestClient::new(KrakenRestClient::new())?;
    let status = client.run(|client| client.get_system_status())?;
    assert!(!status.status.is_empty());

    Ok(())
}
