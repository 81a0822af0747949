/// Convenience result type used across pathfx.
pub type PathFxResult<T> = Result<T, PathFxError>;

/// Top-level error taxonomy used by effect construction, filtering and configuration.
#[derive(thiserror::Error, Debug)]
pub enum PathFxError {
    /// Effect parameters (or an effect description) were rejected.
    #[error("validation error: {0}")]
    Validation(String),

    /// An effect could not produce a result for the given path and style.
    #[error("filter error: {0}")]
    Filter(String),

    /// Errors when serializing or deserializing effect descriptions.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PathFxError {
    /// Build a [`PathFxError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PathFxError::Filter`] value.
    pub fn filter(msg: impl Into<String>) -> Self {
        Self::Filter(msg.into())
    }

    /// Build a [`PathFxError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
