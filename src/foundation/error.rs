use std::path::PathBuf;

/// Convenience result type used across pitchcard.
pub type PitchcardResult<T> = Result<T, PitchcardError>;

/// Top-level error taxonomy used by pipeline APIs.
///
/// Field-level anomalies in the raw payload are never reported through this type; the
/// normalizer absorbs them with documented defaults.
#[derive(thiserror::Error, Debug)]
pub enum PitchcardError {
    /// Payload retrieval or transport failure.
    #[error("source error: {0}")]
    Source(String),

    /// A required structural invariant of the payload does not hold.
    #[error("schema error: {0}")]
    Schema(String),

    /// An optional facility (rendering or publishing backend) is not available.
    #[error("missing capability: {0}")]
    CapabilityMissing(String),

    /// The rendering backend failed while drawing or encoding.
    #[error("render error: {0}")]
    Render(String),

    /// Directory creation or file write failure.
    #[error("io error at '{}': {source}", path.display())]
    Io {
        /// Path the failing operation targeted.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// Credential or upload failure in a publisher.
    #[error("publish error: {0}")]
    Publish(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PitchcardError {
    /// Build a [`PitchcardError::Source`] value.
    pub fn source(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }

    /// Build a [`PitchcardError::Schema`] value.
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    /// Build a [`PitchcardError::CapabilityMissing`] value.
    pub fn capability(msg: impl Into<String>) -> Self {
        Self::CapabilityMissing(msg.into())
    }

    /// Build a [`PitchcardError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`PitchcardError::Io`] value for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Build a [`PitchcardError::Publish`] value.
    pub fn publish(msg: impl Into<String>) -> Self {
        Self::Publish(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
