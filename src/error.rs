//! Storage error type shared by every file store and the storage manager.

use thiserror::Error;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// What the storage manager was doing when a store call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Loading,
    Saving,
    Deleting,
    Appending,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loading => write!(f, "loading"),
            Self::Saving => write!(f, "saving"),
            Self::Deleting => write!(f, "deleting"),
            Self::Appending => write!(f, "appending"),
        }
    }
}

/// Errors raised by file stores and the storage manager.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The configured bucket is not visible to the credentials in use.
    #[error("Bucket {bucket} not found")]
    BucketNotFound { bucket: String },

    /// A store call failed. `message` is the backend's text, unchanged.
    #[error("{message}")]
    Backend { message: String, not_found: bool },

    /// A store call failed while handling a typed record.
    #[error("Error {action} {type_name} {id}: {message}")]
    Operation {
        action: Action,
        type_name: String,
        id: String,
        message: String,
        not_found: bool,
    },

    /// JSON encoding or decoding failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend settings in the config section are missing or malformed.
    #[error("Invalid storage settings: {0}")]
    InvalidSettings(String),

    /// No backend is registered under the configured class name.
    #[error("Unknown storage manager class: {0}")]
    UnknownBackend(String),
}

impl StorageError {
    /// Backend failure with a verbatim message.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
            not_found: false,
        }
    }

    /// Backend failure reporting a missing key or file.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
            not_found: true,
        }
    }

    /// Whether the underlying store reported a missing key.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Backend { not_found, .. } | Self::Operation { not_found, .. } => *not_found,
            _ => false,
        }
    }

    /// Wrap this error with the record being handled.
    pub fn during(self, action: Action, type_name: &str, id: &str) -> Self {
        let not_found = self.is_not_found();
        let message = match self {
            Self::Backend { message, .. } => message,
            other => other.to_string(),
        };
        Self::Operation {
            action,
            type_name: type_name.to_string(),
            id: id.to_string(),
            message,
            not_found,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_keeps_backend_message_verbatim() {
        let err = StorageError::not_found("The specified key does not exist.")
            .during(Action::Loading, "BotStatus", "bot-1");

        assert_eq!(
            err.to_string(),
            "Error loading BotStatus bot-1: The specified key does not exist."
        );
        assert!(err.is_not_found());
    }

    #[test]
    fn test_bucket_not_found_is_not_a_missing_key() {
        let err = StorageError::BucketNotFound {
            bucket: "missing".into(),
        };
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "Bucket missing not found");
    }
}
