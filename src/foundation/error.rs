/// Convenience result type used across Snowball.
pub type SnowballResult<T> = Result<T, SnowballError>;

/// Top-level error taxonomy used by the rendering core.
#[derive(thiserror::Error, Debug)]
pub enum SnowballError {
    /// Caller-supplied data disagrees with itself (pixel buffer length vs dimensions, unknown
    /// surface handle, invalid settings).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Input is not a recognized image format.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Image data is structurally malformed or uses a feature the decoder does not implement.
    #[error("decode error: {0}")]
    Decode(String),

    /// Draw-session protocol violation.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// Errors when serializing or deserializing settings.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SnowballError {
    /// Build a [`SnowballError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`SnowballError::UnsupportedFormat`] value.
    pub fn unsupported_format(msg: impl Into<String>) -> Self {
        Self::UnsupportedFormat(msg.into())
    }

    /// Build a [`SnowballError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`SnowballError::InvalidOperation`] value.
    pub fn invalid_operation(msg: impl Into<String>) -> Self {
        Self::InvalidOperation(msg.into())
    }

    /// Build a [`SnowballError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
