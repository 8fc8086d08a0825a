//! HTTP服务

use anyhow::{Context, Result};
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::research::executors::ExecutorSelector;
use crate::research::generators::GeneratorRegistry;

pub mod error;
pub mod handlers;

/// 请求间共享的只读状态
#[derive(Clone)]
pub struct AppState {
    pub registry: GeneratorRegistry,
    pub selector: ExecutorSelector,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            registry: GeneratorRegistry::new(),
            selector: ExecutorSelector::from_config(config)?,
        })
    }
}

/// 构建路由
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/research", post(handlers::research))
        .route("/re-research", post(handlers::re_research))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 启动HTTP服务，直到收到Ctrl-C
pub async fn serve(config: &Config) -> Result<()> {
    let state = AppState::new(config)?;
    let address = config.bind_address();

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    tracing::info!("🚀 Report generation service listening on {}", address);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    tracing::info!("✓ server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    }
}
