use serde_json::Value;

/// Why a feed request failed. Every variant is terminal for the request; nothing is retried.
#[derive(thiserror::Error, Debug)]
pub enum FeedError {
    #[error("Missing HELIUS_API_KEY env var")]
    MissingApiKey,

    #[error("Helius HTTP {status}")]
    UpstreamHttp { status: u16, body: String },

    #[error("Helius DAS error")]
    UpstreamRpc(Value),

    #[error("Unexpected server error")]
    Unexpected(String),
}

impl FeedError {
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::Unexpected(msg.into())
    }

    /// HTTP status returned to our caller.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingApiKey | Self::Unexpected(_) => 500,
            Self::UpstreamHttp { .. } | Self::UpstreamRpc(_) => 502,
        }
    }

    /// JSON error body: `{"error": ..., "details"?: ...}`.
    pub fn to_body(&self) -> Value {
        let mut body = serde_json::Map::new();
        body.insert("error".to_owned(), Value::String(self.to_string()));
        match self {
            Self::MissingApiKey => {}
            Self::UpstreamHttp { body: text, .. } => {
                body.insert("details".to_owned(), Value::String(text.clone()));
            }
            Self::UpstreamRpc(err) => {
                body.insert("details".to_owned(), err.clone());
            }
            Self::Unexpected(msg) => {
                body.insert("details".to_owned(), Value::String(msg.clone()));
            }
        }
        Value::Object(body)
    }
}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        Self::Unexpected(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_key_body_has_no_details() {
        let err = FeedError::MissingApiKey;
        assert_eq!(err.status_code(), 500);
        assert_eq!(
            err.to_body(),
            json!({"error": "Missing HELIUS_API_KEY env var"})
        );
    }

    #[test]
    fn upstream_failures_are_bad_gateway() {
        let http = FeedError::UpstreamHttp {
            status: 503,
            body: "down for maintenance".to_owned(),
        };
        assert_eq!(http.status_code(), 502);
        assert_eq!(
            http.to_body(),
            json!({"error": "Helius HTTP 503", "details": "down for maintenance"})
        );

        let rpc = FeedError::UpstreamRpc(json!({"code": -32602, "message": "bad params"}));
        assert_eq!(rpc.status_code(), 502);
        assert_eq!(rpc.to_body()["details"]["code"], -32602);
    }

    #[test]
    fn unexpected_carries_message() {
        let err = FeedError::unexpected("socket closed");
        assert_eq!(err.status_code(), 500);
        assert_eq!(
            err.to_body(),
            json!({"error": "Unexpected server error", "details": "socket closed"})
        );
    }
}
