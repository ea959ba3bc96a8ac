//! ArgoCD Custom Resource Definition
//!
//! The owning resource for everything the operator generates. Hooks receive
//! it as read-only context so their mutations can depend on the instance's
//! spec and status.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::types::{ArgoCDPhase, ComponentSpec, ServerSpec};

/// Specification for an ArgoCD instance
#[derive(CustomResource, Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "argoproj.io",
    version = "v1alpha1",
    kind = "ArgoCD",
    plural = "argocds",
    shortname = "argocd",
    status = "ArgoCDStatus",
    namespaced,
    printcolumn = r#"{"name":"Phase","type":"string","jsonPath":".status.phase"}"#,
    printcolumn = r#"{"name":"Version","type":"string","jsonPath":".spec.version"}"#,
    printcolumn = r#"{"name":"Age","type":"date","jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct ArgoCDSpec {
    /// Argo CD version tag for all components
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Container image for all components, without tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// API server settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerSpec>,

    /// Repo server settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<ComponentSpec>,

    /// Application controller settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller: Option<ComponentSpec>,
}

impl ArgoCDSpec {
    /// Desired API server replicas, if overridden
    pub fn server_replicas(&self) -> Option<i32> {
        self.server.as_ref().and_then(|s| s.replicas)
    }
}

/// Status for an ArgoCD instance
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ArgoCDStatus {
    /// Current phase
    #[serde(default)]
    pub phase: ArgoCDPhase,

    /// Human-readable message about the current state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
