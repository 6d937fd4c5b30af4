//! HTTP surface: the `/api/bags/new-tokens` proxy route.

pub mod handlers;
pub mod router;
pub mod state;

use std::net::SocketAddr;

use anyhow::Context as _;
use tokio::net::TcpListener;
use tracing::info;

pub use router::{NEW_TOKENS_PATH, create_router};
pub use state::AppState;

use crate::feed::DEFAULT_DAS_URL;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub das_url: String,
    /// Checked per request; a server without a key still starts and answers 500.
    pub api_key: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            das_url: DEFAULT_DAS_URL.to_owned(),
            api_key: None,
        }
    }
}

/// Serve until the listener fails or `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let app = create_router(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("server error")
}

/// Bind `config.bind_addr` and serve until CTRL+C.
pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    if config.api_key.as_deref().is_none_or(str::is_empty) {
        tracing::warn!("HELIUS_API_KEY is not set; new-tokens requests will fail with 500");
    }

    let state = AppState::new(&config);
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;

    info!("Listening on http://{}", config.bind_addr);

    serve(listener, state, shutdown_signal()).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install CTRL+C signal handler");
        std::future::pending::<()>().await;
    }
    info!("Shutting down gracefully...");
}
