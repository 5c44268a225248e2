/// Convenience result type used across scrollweave.
pub type ScrollweaveResult<T> = Result<T, ScrollweaveError>;

/// Top-level error taxonomy used by construction-time APIs.
///
/// Runtime paths (missing elements, detached roots, late pointer events) never produce
/// errors; they degrade to no-ops.
#[derive(thiserror::Error, Debug)]
pub enum ScrollweaveError {
    /// Invalid user-provided or configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while validating animation specs or timelines.
    #[error("animation error: {0}")]
    Animation(String),

    /// Malformed trigger points or replay policies.
    #[error("trigger error: {0}")]
    Trigger(String),

    /// Invalid stage or page configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrollweaveError {
    /// Build a [`ScrollweaveError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ScrollweaveError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`ScrollweaveError::Trigger`] value.
    pub fn trigger(msg: impl Into<String>) -> Self {
        Self::Trigger(msg.into())
    }

    /// Build a [`ScrollweaveError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`ScrollweaveError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for ScrollweaveError {
    fn from(value: serde_json::Error) -> Self {
        Self::serde(value.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
