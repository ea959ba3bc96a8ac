//! Supporting types for the ArgoCD CRD

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Replica and image overrides shared by the ArgoCD components
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSpec {
    /// Desired number of replicas; the operator default is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,

    /// Container image override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Argo CD API server configuration
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServerSpec {
    /// Desired number of replicas; the operator default is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,

    /// Container image override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Serve the API without TLS (TLS terminated upstream)
    #[serde(default)]
    pub insecure: bool,
}

/// Lifecycle phase of an ArgoCD instance
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub enum ArgoCDPhase {
    /// Resources are being created
    #[default]
    Pending,
    /// All components are available
    Available,
    /// Reconciliation failed, see status message
    Failed,
}

impl std::fmt::Display for ArgoCDPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Available => write!(f, "Available"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}
