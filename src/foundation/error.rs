pub type TokenArcResult<T> = Result<T, TokenArcError>;

#[derive(thiserror::Error, Debug)]
pub enum TokenArcError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("encode error: {0}")]
    Encode(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TokenArcError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for TokenArcError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            TokenArcError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(TokenArcError::render("x").to_string().contains("render error:"));
        assert!(TokenArcError::encode("x").to_string().contains("encode error:"));
        assert!(
            TokenArcError::serde("x")
                .to_string()
                .contains("serialization error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = TokenArcError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn json_errors_map_to_serde() {
        let err: TokenArcError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, TokenArcError::Serde(_)));
    }
}
