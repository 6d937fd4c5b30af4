use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use super::state::AppState;
use crate::feed::{FeedError, FeedToken};

#[derive(serde::Serialize)]
struct TokensBody {
    tokens: Vec<FeedToken>,
}

impl IntoResponse for FeedError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_body())).into_response()
    }
}

/// `GET /api/bags/new-tokens` → `{"tokens": [...]}`.
pub async fn new_tokens(State(state): State<AppState>) -> Result<Response, FeedError> {
    match state.das().new_tokens().await {
        Ok(tokens) => {
            tracing::info!(count = tokens.len(), "served new tokens");
            Ok((StatusCode::OK, Json(TokensBody { tokens })).into_response())
        }
        Err(err) => {
            log_failure(&err);
            Err(err)
        }
    }
}

fn log_failure(err: &FeedError) {
    match err {
        FeedError::MissingApiKey => error!("Missing HELIUS_API_KEY"),
        FeedError::UpstreamHttp { status, body } => {
            error!(status, body = %body, "Helius DAS HTTP error");
        }
        FeedError::UpstreamRpc(details) => error!(details = %details, "Helius DAS JSON-RPC error"),
        FeedError::Unexpected(msg) => error!(error = %msg, "unexpected error in new-tokens"),
    }
}
