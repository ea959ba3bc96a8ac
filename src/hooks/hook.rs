//! Reconciler hook trait and constructors

use std::fmt;
use std::marker::PhantomData;

use crate::crd::ArgoCD;
use crate::hooks::candidate::Candidate;

/// Error returned by a hook.
///
/// Hooks define their own error types; the applier hands the boxed value back
/// to the caller untouched so it can be downcast or logged as-is.
pub type HookError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result of a single hook invocation
pub type HookResult = Result<(), HookError>;

/// A customization applied to generated objects before they are persisted.
///
/// `K` is the owning custom resource passed as read-only context.
///
/// Implementations must treat object types they don't recognize as a no-op:
/// return `Ok(())` and leave the object untouched.
pub trait ReconcilerHook<K = ArgoCD>: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Inspect or mutate `object`, conditioned on `owner`
    fn apply(&self, owner: &K, object: &mut dyn Candidate) -> HookResult;
}

/// Hook backed by a closure over the type-erased candidate.
///
/// Created with [`hook_fn`].
pub struct FnHook<F> {
    name: String,
    f: F,
}

impl<K, F> ReconcilerHook<K> for FnHook<F>
where
    F: Fn(&K, &mut dyn Candidate) -> HookResult + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, owner: &K, object: &mut dyn Candidate) -> HookResult {
        (self.f)(owner, object)
    }
}

impl<F> fmt::Debug for FnHook<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHook").field("name", &self.name).finish()
    }
}

/// Wrap a closure as a named hook.
///
/// The closure sees every candidate and does its own type dispatch.
pub fn hook_fn<K, F>(name: impl Into<String>, f: F) -> FnHook<F>
where
    F: Fn(&K, &mut dyn Candidate) -> HookResult + Send + Sync,
{
    FnHook {
        name: name.into(),
        f,
    }
}

/// Hook that only runs for candidates of type `T`.
///
/// Created with [`typed_hook`]. Any other object type passes through
/// unmodified.
pub struct TypedHook<T, F> {
    name: String,
    f: F,
    _object: PhantomData<fn(&mut T)>,
}

impl<K, T, F> ReconcilerHook<K> for TypedHook<T, F>
where
    T: Candidate,
    F: Fn(&K, &mut T) -> HookResult + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, owner: &K, object: &mut dyn Candidate) -> HookResult {
        match object.downcast_mut::<T>() {
            Some(object) => (self.f)(owner, object),
            None => Ok(()),
        }
    }
}

impl<T, F> fmt::Debug for TypedHook<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedHook")
            .field("name", &self.name)
            .field("object", &std::any::type_name::<T>())
            .finish()
    }
}

/// Wrap a closure that only handles objects of type `T`.
///
/// ```
/// use argocd_hooks::crd::ArgoCD;
/// use argocd_hooks::hooks::typed_hook;
/// use k8s_openapi::api::apps::v1::Deployment;
///
/// let hook = typed_hook("three-replicas", |_: &ArgoCD, deploy: &mut Deployment| {
///     deploy.spec.get_or_insert_with(Default::default).replicas = Some(3);
///     Ok(())
/// });
/// # let _ = hook;
/// ```
pub fn typed_hook<T, K, F>(name: impl Into<String>, f: F) -> TypedHook<T, F>
where
    T: Candidate,
    F: Fn(&K, &mut T) -> HookResult + Send + Sync,
{
    TypedHook {
        name: name.into(),
        f,
        _object: PhantomData,
    }
}
