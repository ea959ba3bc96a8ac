//! Hook-aware reconcile step for generated objects
//!
//! Every object the reconcile loop generates for an ArgoCD instance goes
//! through [`reconcile_object`]: stamp the owner reference, run the reconciler
//! hooks, then persist with server-side apply. A hook error aborts the step
//! before anything is written to the cluster.

use std::sync::Arc;

use async_trait::async_trait;
use kube::api::{Api, DynamicObject, Patch, PatchParams};
use kube::discovery::ApiResource;
use kube::{Client, Resource};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

#[cfg(test)]
use mockall::automock;

use crate::config::ReconcileConfig;
use crate::crd::ArgoCD;
use crate::hooks::{Candidate, SharedHookRegistry};
use crate::Error;

/// A generated object serialized for server-side apply
#[derive(Clone, Debug)]
pub struct ObjectManifest {
    /// Full JSON body including apiVersion and kind
    pub value: serde_json::Value,
    /// Resource name
    pub name: String,
    /// Namespace, `None` for cluster-scoped objects
    pub namespace: Option<String>,
    /// API resource definition
    pub api_resource: ApiResource,
}

impl ObjectManifest {
    /// Serialize a typed object.
    ///
    /// Fails if the object has no `metadata.name`.
    pub fn from_object<T>(object: &T) -> Result<Self, Error>
    where
        T: Resource<DynamicType = ()> + Serialize,
    {
        let api_resource = ApiResource::erase::<T>(&());
        let meta = object.meta();
        let name = meta.name.clone().ok_or_else(|| {
            Error::internal_with_context(
                "manifest",
                format!("{} has no metadata.name", api_resource.kind),
            )
        })?;
        let namespace = meta.namespace.clone();

        let mut value = serde_json::to_value(object).map_err(|e| {
            Error::serialization_for_kind(&api_resource.kind, e.to_string())
        })?;
        // Server-side apply rejects bodies without type metadata.
        if let Some(body) = value.as_object_mut() {
            body.entry("apiVersion")
                .or_insert_with(|| api_resource.api_version.clone().into());
            body.entry("kind")
                .or_insert_with(|| api_resource.kind.clone().into());
        }

        Ok(Self {
            value,
            name,
            namespace,
            api_resource,
        })
    }
}

/// Trait abstracting persistence of generated objects
///
/// This trait allows mocking the Kubernetes client in tests while using
/// the real client in production.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ObjectClient: Send + Sync {
    /// Create or update the object with server-side apply
    async fn apply(&self, manifest: &ObjectManifest) -> Result<(), Error>;
}

/// Real Kubernetes client implementation
pub struct KubeObjectClient {
    client: Client,
    params: PatchParams,
}

impl KubeObjectClient {
    /// Create a new KubeObjectClient wrapping the given kube Client
    pub fn new(client: Client, config: &ReconcileConfig) -> Self {
        let mut params = PatchParams::apply(&config.field_manager);
        if config.force_apply {
            params = params.force();
        }
        Self { client, params }
    }
}

#[async_trait]
impl ObjectClient for KubeObjectClient {
    async fn apply(&self, manifest: &ObjectManifest) -> Result<(), Error> {
        let api: Api<DynamicObject> = match &manifest.namespace {
            Some(ns) => Api::namespaced_with(self.client.clone(), ns, &manifest.api_resource),
            None => Api::all_with(self.client.clone(), &manifest.api_resource),
        };

        api.patch(&manifest.name, &self.params, &Patch::Apply(&manifest.value))
            .await?;

        debug!(
            kind = %manifest.api_resource.kind,
            name = %manifest.name,
            namespace = manifest.namespace.as_deref().unwrap_or_default(),
            "applied object"
        );
        Ok(())
    }
}

/// Shared state for reconciling objects owned by `K`
pub struct Context<K = ArgoCD> {
    /// Hooks applied to every generated object
    pub hooks: SharedHookRegistry<K>,
    /// Persists hook-mutated objects
    pub client: Arc<dyn ObjectClient>,
    /// Reconcile settings
    pub config: ReconcileConfig,
}

impl<K> Context<K> {
    /// Create a new context
    pub fn new(
        hooks: SharedHookRegistry<K>,
        client: Arc<dyn ObjectClient>,
        config: ReconcileConfig,
    ) -> Self {
        Self {
            hooks,
            client,
            config,
        }
    }
}

/// Run reconciler hooks against a generated object and persist the result.
///
/// On a hook error the object is not applied and the error is returned as
/// [`Error::Hook`] with the hook's own error as its source. Returns the object
/// as persisted.
#[instrument(
    skip_all,
    fields(kind = %object.object_kind(), name = object.object_name().unwrap_or_default())
)]
pub async fn reconcile_object<K, T>(
    ctx: &Context<K>,
    owner: &K,
    mut object: T,
) -> Result<T, Error>
where
    K: Resource<DynamicType = ()> + 'static,
    T: Resource<DynamicType = ()> + Serialize + 'static,
{
    if ctx.config.set_owner_reference {
        set_controller_reference(owner, &mut object)?;
    }

    if let Err(source) = ctx.hooks.apply(owner, &mut object) {
        let kind = object.object_kind().into_owned();
        let name = object.object_name().unwrap_or_default().to_string();
        warn!(error = %source, "reconciler hooks rejected object, not persisting");
        return Err(Error::hook(kind, name, source));
    }

    let manifest = ObjectManifest::from_object(&object)?;
    ctx.client.apply(&manifest).await?;

    info!("reconciled object");
    Ok(object)
}

/// Make `owner` the controller owner of `object`.
///
/// Replaces an existing reference to the same owner uid. Does nothing if the
/// owner has no name or uid yet. Fails with [`Error::Validation`] if another
/// owner already controls the object: the API server accepts only one
/// controller reference.
pub fn set_controller_reference<K, T>(owner: &K, object: &mut T) -> Result<(), Error>
where
    K: Resource<DynamicType = ()>,
    T: Resource<DynamicType = ()>,
{
    let Some(owner_ref) = owner.controller_owner_ref(&()) else {
        debug!("owner has no uid, skipping owner reference");
        return Ok(());
    };

    let meta = object.meta();
    if let Some(other) = meta
        .owner_references
        .iter()
        .flatten()
        .find(|r| r.controller == Some(true) && r.uid != owner_ref.uid)
    {
        return Err(Error::validation_for(
            format!(
                "{}/{}",
                T::kind(&()),
                meta.name.as_deref().unwrap_or_default()
            ),
            format!("already owned by controller {}/{}", other.kind, other.name),
        ));
    }

    let refs = object
        .meta_mut()
        .owner_references
        .get_or_insert_with(Vec::new);
    refs.retain(|r| r.uid != owner_ref.uid);
    refs.push(owner_ref);
    Ok(())
}
