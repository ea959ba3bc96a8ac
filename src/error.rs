//! Error types for the ArgoCD reconcile step
//!
//! Hook errors stay opaque: the applier returns whatever the failing hook
//! produced, and the reconcile step wraps it with the kind and name of the
//! object that was being reconciled while keeping it reachable through
//! [`std::error::Error::source`].

use thiserror::Error;

use crate::hooks::HookError;

/// Default context value when no specific context is available
pub const UNKNOWN_CONTEXT: &str = "unknown";

/// Main error type for reconcile operations
#[derive(Debug, Error)]
pub enum Error {
    /// Kubernetes API error
    #[error("kubernetes error: {source}")]
    Kube {
        /// The underlying kube-rs error
        #[from]
        source: kube::Error,
    },

    /// A reconciler hook rejected a generated object
    #[error("reconciler hook failed for {kind}/{name}: {source}")]
    Hook {
        /// Kind of the object being reconciled
        kind: String,
        /// Name of the object being reconciled
        name: String,
        /// The error returned by the hook, unmodified
        source: HookError,
    },

    /// A generated object is in a state the reconcile step refuses to apply
    #[error("validation error for {object}: {message}")]
    Validation {
        /// `Kind/name` of the offending object
        object: String,
        /// Description of what's invalid
        message: String,
    },

    /// Serialization/deserialization error
    #[error("serialization error: {message}")]
    Serialization {
        /// Description of what failed
        message: String,
        /// The resource kind being serialized (if known)
        kind: Option<String>,
    },

    /// Internal/operational error
    #[error("internal error [{context}]: {message}")]
    Internal {
        /// Description of what failed
        message: String,
        /// Context where the error occurred (e.g., "reconcile", "manifest")
        context: String,
    },
}

impl Error {
    /// Create a hook error for the given object
    pub fn hook(kind: impl Into<String>, name: impl Into<String>, source: HookError) -> Self {
        Self::Hook {
            kind: kind.into(),
            name: name.into(),
            source,
        }
    }

    /// Create a validation error for the given object
    pub fn validation_for(object: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Validation {
            object: object.into(),
            message: msg.into(),
        }
    }

    /// Create a serialization error with the given message
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization {
            message: msg.into(),
            kind: None,
        }
    }

    /// Create a serialization error for a specific resource kind
    pub fn serialization_for_kind(kind: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Serialization {
            message: msg.into(),
            kind: Some(kind.into()),
        }
    }

    /// Create an internal error with the given message
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal {
            message: msg.into(),
            context: UNKNOWN_CONTEXT.to_string(),
        }
    }

    /// Create an internal error with context
    pub fn internal_with_context(context: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Internal {
            message: msg.into(),
            context: context.into(),
        }
    }

    /// The hook's own error, if this error came from a reconciler hook
    pub fn hook_source(&self) -> Option<&HookError> {
        match self {
            Self::Hook { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Whether retrying the whole reconciliation might succeed.
    ///
    /// Hook failures, validation and serialization errors are deterministic for a given
    /// owner spec, so requeueing without a spec change won't help.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Kube { .. } | Self::Internal { .. } => true,
            Self::Hook { .. } | Self::Validation { .. } | Self::Serialization { .. } => false,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}
