/// Convenience result type used across Mixdeck.
pub type MixdeckResult<T> = Result<T, MixdeckError>;

/// Top-level error taxonomy used by the switching core.
///
/// Missing scene/transition handles are deliberately *not* errors: per the
/// failure contract they resolve as silent no-ops. Errors are reserved for
/// construction and deserialization paths where the caller handed us
/// malformed data.
#[derive(thiserror::Error, Debug)]
pub enum MixdeckError {
    /// Invalid user-provided data (unknown transition kind, bad duration).
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid operation against the scene graph provider.
    #[error("graph error: {0}")]
    Graph(String),

    /// Errors when serializing or deserializing presets.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MixdeckError {
    /// Build a [`MixdeckError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MixdeckError::Graph`] value.
    pub fn graph(msg: impl Into<String>) -> Self {
        Self::Graph(msg.into())
    }

    /// Build a [`MixdeckError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
