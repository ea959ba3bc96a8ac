//! ArgoCD reconciler hooks
//!
//! Lets code embedding the ArgoCD operator customize the Kubernetes objects
//! the operator generates, without forking its reconcile logic.
//!
//! # Modules
//!
//! - [`hooks`] - Hook registry, fail-fast applier and the candidate dispatch contract
//! - [`controller`] - Reconcile step that runs hooks before server-side apply
//! - [`crd`] - The ArgoCD custom resource passed to hooks as owner context
//! - [`config`] - Reconcile step configuration
//! - [`telemetry`] - Logging initialization
//! - [`error`] - Error types for the reconcile step

#![deny(missing_docs)]

pub mod config;
pub mod controller;
pub mod crd;
pub mod error;
pub mod hooks;
pub mod telemetry;

pub use error::Error;

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;
