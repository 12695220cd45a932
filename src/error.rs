use thiserror::Error;

pub type Result<T> = std::result::Result<T, RendererError>;

#[derive(Debug, Error)]
pub enum RendererError {
    /// The full response document could not be encoded.
    #[error("{0}")]
    Encoding(#[source] serde_json::Error),

    /// The minimal fallback document could not be encoded either.
    #[error("{0}")]
    SecondaryEncoding(#[source] serde_json::Error),

    #[error("Invalid setting {key}: {value:?}")]
    InvalidSetting { key: String, value: String },
}

impl RendererError {
    pub fn invalid_setting(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidSetting {
            key: key.into(),
            value: value.into(),
        }
    }
}
