mod api;
mod middleware;

use std::sync::Arc;
use std::time::Duration;

use grocywise_core::LocationDirectory;
use grocywise_pipeline::QueryPipeline;
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, search_rate_limit_state, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = grocywise_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let directory = LocationDirectory::from_app_config(&config)?;
    let pipeline = QueryPipeline::from_config(&config)?;

    let state = AppState {
        pipeline: Arc::new(pipeline),
        directory: Arc::new(directory),
        query_timeout: config.request_timeout_secs.map(Duration::from_secs),
    };
    let app = build_app(state, search_rate_limit_state(config.search_rate_limit));

    tracing::info!(
        addr = %config.bind_addr,
        env = %config.env,
        model = %config.gemini_model,
        search_rate_limit = config.search_rate_limit,
        "starting grocywise server"
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
