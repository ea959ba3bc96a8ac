//! Custom Resource Definitions
//!
//! The ArgoCD resource is the owner of every object the operator generates
//! and the context handed to reconciler hooks.

mod argocd;
mod types;

pub use argocd::{ArgoCD, ArgoCDSpec, ArgoCDStatus};
pub use types::{ArgoCDPhase, ComponentSpec, ServerSpec};
