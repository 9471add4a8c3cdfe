/// Convenience result type used across slidepress.
pub type SlideResult<T> = Result<T, SlideError>;

/// Top-level error taxonomy used by model, rendering and export APIs.
#[derive(thiserror::Error, Debug)]
pub enum SlideError {
    /// A background image (or another external resource) could not be loaded or decoded.
    #[error("resource unavailable: {0}")]
    ResourceUnavailable(String),

    /// An operation was requested while a required dependency or state was absent.
    #[error("precondition failed: {0}")]
    PreconditionFailed(String),

    /// Invalid user-provided or persisted data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing editor documents.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SlideError {
    /// Build a [`SlideError::ResourceUnavailable`] value.
    pub fn resource_unavailable(msg: impl Into<String>) -> Self {
        Self::ResourceUnavailable(msg.into())
    }

    /// Build a [`SlideError::PreconditionFailed`] value.
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::PreconditionFailed(msg.into())
    }

    /// Build a [`SlideError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SlideError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// `true` for failures caused by an unloadable resource.
    pub fn is_resource_unavailable(&self) -> bool {
        matches!(self, Self::ResourceUnavailable(_))
    }
}

impl From<serde_json::Error> for SlideError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
