//! Reconciler hooks
//!
//! Hooks let code embedding the operator customize the objects it generates
//! (Deployments, ClusterRoles, RoleBindings, ...) before they are persisted,
//! without forking the reconcile logic.
//!
//! - [`HookRegistry`] holds hooks in registration order
//! - [`HookRegistry::apply`] runs them against one object, stopping at the
//!   first error
//! - [`Candidate`] is the type-erased object each hook receives; hooks
//!   downcast it to the types they handle and ignore the rest
//!
//! ```
//! use argocd_hooks::crd::{ArgoCD, ArgoCDSpec};
//! use argocd_hooks::hooks::{typed_hook, HookRegistry};
//! use k8s_openapi::api::apps::v1::Deployment;
//!
//! let registry: HookRegistry = HookRegistry::new();
//! registry.register(typed_hook("ha-replicas", |_: &ArgoCD, deploy: &mut Deployment| {
//!     deploy.spec.get_or_insert_with(Default::default).replicas = Some(3);
//!     Ok(())
//! }));
//!
//! let owner = ArgoCD::new("argocd", ArgoCDSpec::default());
//! let mut deploy = Deployment::default();
//! registry.apply(&owner, &mut deploy).unwrap();
//! assert_eq!(deploy.spec.unwrap().replicas, Some(3));
//! ```

mod applier;
mod candidate;
mod hook;
mod registry;

pub use applier::apply_reconciler_hooks;
pub use candidate::Candidate;
pub use hook::{hook_fn, typed_hook, FnHook, HookError, HookResult, ReconcilerHook, TypedHook};
pub use registry::{HookRegistry, HookRegistryGuard, HookSet, SharedHookRegistry};
