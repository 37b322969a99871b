use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use aura_api::{
    api::{create_router, AppState, Settings},
    config::Config,
    db,
    services::{
        llm::{GeminiClient, GenerativeModel},
        trends::{TrendRecorder, TrendStore},
    },
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("aura_api=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let model: Option<Arc<dyn GenerativeModel>> = match config.api_key() {
        Some(key) => {
            let client = GeminiClient::new(
                key.to_string(),
                config.gemini_model.clone(),
                config.gemini_api_url.clone(),
                Duration::from_secs(config.gemini_timeout_secs),
            )?;
            tracing::info!(
                provider = client.name(),
                model = %config.gemini_model,
                "Generative model configured"
            );
            Some(Arc::new(client))
        }
        None => {
            tracing::warn!("GEMINI_API_KEY not set, answering from offline fallbacks");
            None
        }
    };

    let mut state = AppState::new(model, Settings::from(&config));

    let recorder_handle = if config.trends_enabled {
        let pool = db::create_pool(&config.database_url).await?;
        tracing::info!(database_url = %config.database_url, "Trend database ready");

        let store = TrendStore::new(pool);
        let (recorder, handle) = TrendRecorder::new(store.clone());
        state = state.with_trends(store, recorder);
        Some(handle)
    } else {
        tracing::info!("Trend tracking disabled");
        None
    };

    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "AURA API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = recorder_handle {
        handle.shutdown().await;
    }

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
