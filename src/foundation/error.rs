/// Convenience result type used across blitcheck.
pub type BlitResult<T> = Result<T, BlitError>;

/// Top-level error taxonomy used by harness APIs.
///
/// Checkpoint mismatches are not errors; they are recorded in the run report.
#[derive(thiserror::Error, Debug)]
pub enum BlitError {
    /// Invalid user-provided configuration (rule names, depths, arguments).
    #[error("configuration error: {0}")]
    Config(String),

    /// A surface or rectangle that violates the packed-buffer invariants.
    #[error("geometry error: {0}")]
    Geometry(String),

    /// Errors when serializing run reports.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BlitError {
    /// Build a [`BlitError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`BlitError::Geometry`] value.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    /// Build a [`BlitError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
