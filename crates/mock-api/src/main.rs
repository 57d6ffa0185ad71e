use alertcond_mock_api::config::MockConfig;
use alertcond_mock_api::rest::AppState;
use alertcond_mock_api::store::ConditionStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    alertcond_common::logging::init("info", false);

    let config = MockConfig::from_env();
    let state = AppState::new(ConditionStore::new(), config.api_key.clone());

    let (addr, handle) = alertcond_mock_api::spawn(config.addr, state).await?;
    tracing::info!(base_url = %format!("http://{addr}/v2"), "ready");

    handle.await?;
    Ok(())
}
