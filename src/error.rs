use std::fmt;
use std::path::PathBuf;

/// Errors that abort a build run
///
/// Entities that cannot be exposed are not errors; they are reported as
/// [`SkippedEntity`](crate::generator::SkippedEntity) records instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The target OpenAPI document could not be read, is not valid JSON,
    /// decodes to an empty value, or is not a JSON object
    ///
    /// Nothing is written when this happens.
    UnreadableSpecDocument {
        /// Location of the target document
        path: PathBuf,
        /// What went wrong while loading it
        reason: String,
    },
    /// An XML schema file could not be parsed
    SchemaParse {
        /// The schema file, when parsing from disk
        path: Option<PathBuf>,
        /// Parser message
        message: String,
    },
    /// The build configuration file is missing or malformed
    InvalidConfig {
        /// The configuration file
        path: PathBuf,
        /// Parser or lookup message
        message: String,
    },
}

impl BuildError {
    pub(crate) fn unreadable_spec(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        BuildError::UnreadableSpecDocument {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::UnreadableSpecDocument { path, reason } => {
                write!(
                    f,
                    "Could not load existing {} to update ({}) - perhaps the JSON is invalid?",
                    path.display(),
                    reason
                )
            }
            BuildError::SchemaParse {
                path: Some(path),
                message,
            } => write!(f, "Failed to parse schema {}: {}", path.display(), message),
            BuildError::SchemaParse {
                path: None,
                message,
            } => write!(f, "Failed to parse schema: {}", message),
            BuildError::InvalidConfig { path, message } => {
                write!(f, "Invalid build config {}: {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for BuildError {}
