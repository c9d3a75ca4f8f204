use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use calbot::config::AppConfig;
use calbot::handlers;
use calbot::services::ai::openai::OpenAiProvider;
use calbot::services::cal::CalComClient;
use calbot::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env().context("failed to load configuration")?;

    let cal = CalComClient::new(&config).context("failed to initialize cal.com client")?;
    let llm = OpenAiProvider::new(&config).context("failed to initialize OpenAI client")?;
    tracing::info!(
        cal_base_url = %config.cal_base_url,
        model = %config.openai_model,
        "external clients initialized"
    );

    let state = Arc::new(AppState {
        config: config.clone(),
        llm: Box::new(llm),
        cal: Box::new(cal),
    });

    let app = handlers::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
