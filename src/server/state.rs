//! Shared application state.

use std::sync::Arc;

use super::ServerConfig;
use crate::feed::DasClient;

/// Immutable state shared across handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    inner: Arc<InnerState>,
}

#[derive(Debug)]
struct InnerState {
    das: DasClient,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Self {
        Self::with_client(DasClient::new(
            config.das_url.clone(),
            config.api_key.clone(),
        ))
    }

    pub fn with_client(das: DasClient) -> Self {
        Self {
            inner: Arc::new(InnerState { das }),
        }
    }

    pub fn das(&self) -> &DasClient {
        &self.inner.das
    }
}
