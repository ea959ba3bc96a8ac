//! Ordered hook registry
//!
//! The registry owns the sequence of hooks applied to every generated object.
//! Registration order is execution order; hooks are never merged, deduplicated
//! or reordered.
//!
//! The sequence is copy-on-write: registering builds a new sequence and swaps
//! it in, while readers clone an `Arc` to the sequence they started with. An
//! application that is already running keeps iterating its own snapshot no
//! matter what is registered concurrently.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::crd::ArgoCD;
use crate::hooks::hook::ReconcilerHook;

/// Immutable snapshot of the registered hooks, in execution order
pub struct HookSet<K = ArgoCD> {
    hooks: Arc<[Arc<dyn ReconcilerHook<K>>]>,
}

impl<K> HookSet<K> {
    /// An empty set
    pub fn empty() -> Self {
        Self {
            hooks: Arc::from(Vec::new()),
        }
    }

    /// Number of hooks in the set
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Returns true if the set holds no hooks
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Iterate hooks in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn ReconcilerHook<K>>> {
        self.hooks.iter()
    }

    /// Hook names in registration order
    pub fn names(&self) -> Vec<String> {
        self.hooks.iter().map(|h| h.name().to_string()).collect()
    }
}

impl<K> Clone for HookSet<K> {
    fn clone(&self) -> Self {
        Self {
            hooks: Arc::clone(&self.hooks),
        }
    }
}

impl<K> Default for HookSet<K> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<K> fmt::Debug for HookSet<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Registry of reconciler hooks for owning resources of type `K`.
///
/// Construct one at controller start-up, register hooks during setup, then
/// share it with the reconcile loop as a [`SharedHookRegistry`].
pub struct HookRegistry<K = ArgoCD> {
    hooks: RwLock<HookSet<K>>,
}

impl<K: 'static> HookRegistry<K> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            hooks: RwLock::new(HookSet::empty()),
        }
    }

    /// Append a hook to the end of the sequence
    pub fn register<H>(&self, hook: H)
    where
        H: ReconcilerHook<K> + 'static,
    {
        self.register_all([Arc::new(hook) as Arc<dyn ReconcilerHook<K>>]);
    }

    /// Append hooks in iteration order
    ///
    /// Registering an empty iterator leaves the registry untouched.
    pub fn register_all<I>(&self, hooks: I)
    where
        I: IntoIterator<Item = Arc<dyn ReconcilerHook<K>>>,
    {
        let added: Vec<Arc<dyn ReconcilerHook<K>>> = hooks.into_iter().collect();
        if added.is_empty() {
            return;
        }

        let mut current = self.hooks.write();
        let start = current.len();
        for (offset, hook) in added.iter().enumerate() {
            debug!(
                hook = hook.name(),
                position = start + offset,
                "registered reconciler hook"
            );
        }

        let next: Vec<Arc<dyn ReconcilerHook<K>>> =
            current.iter().cloned().chain(added).collect();
        *current = HookSet {
            hooks: Arc::from(next),
        };
    }

    /// Snapshot of the current sequence
    ///
    /// Reflects every registration made before the call; later registrations
    /// never change a snapshot already taken.
    pub fn current_hooks(&self) -> HookSet<K> {
        self.hooks.read().clone()
    }

    /// Number of registered hooks
    pub fn len(&self) -> usize {
        self.hooks.read().len()
    }

    /// Returns true if no hooks are registered
    pub fn is_empty(&self) -> bool {
        self.hooks.read().is_empty()
    }

    /// Registered hook names in execution order
    pub fn names(&self) -> Vec<String> {
        self.hooks.read().names()
    }

    /// Replace the sequence with an empty one
    pub fn reset(&self) {
        self.restore(HookSet::empty());
    }

    /// Replace the sequence with a previously captured snapshot
    ///
    /// This is a full replacement: hooks registered after the snapshot was
    /// taken are dropped.
    pub fn restore(&self, snapshot: HookSet<K>) {
        debug!(hooks = snapshot.len(), "restored reconciler hooks");
        *self.hooks.write() = snapshot;
    }

    /// Capture the current sequence and restore it when the guard drops.
    ///
    /// Intended for tests that register hooks against a shared registry:
    ///
    /// ```
    /// use argocd_hooks::crd::ArgoCD;
    /// use argocd_hooks::hooks::{hook_fn, Candidate, HookRegistry};
    ///
    /// let registry: HookRegistry<ArgoCD> = HookRegistry::new();
    /// {
    ///     let _guard = registry.scoped();
    ///     registry.register(hook_fn("noop", |_: &ArgoCD, _: &mut dyn Candidate| Ok(())));
    ///     assert_eq!(registry.len(), 1);
    /// }
    /// assert!(registry.is_empty());
    /// ```
    pub fn scoped(&self) -> HookRegistryGuard<'_, K> {
        HookRegistryGuard {
            registry: self,
            snapshot: Some(self.current_hooks()),
        }
    }
}

impl<K: 'static> Default for HookRegistry<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> fmt::Debug for HookRegistry<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookRegistry")
            .field("hooks", &*self.hooks.read())
            .finish()
    }
}

/// Restores a registry to a captured snapshot on drop.
///
/// Returned by [`HookRegistry::scoped`].
#[must_use = "the registry is restored as soon as the guard is dropped"]
pub struct HookRegistryGuard<'a, K: 'static = ArgoCD> {
    registry: &'a HookRegistry<K>,
    snapshot: Option<HookSet<K>>,
}

impl<K: 'static> Drop for HookRegistryGuard<'_, K> {
    fn drop(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            self.registry.restore(snapshot);
        }
    }
}

/// Registry shared between setup code and the reconcile loop
pub type SharedHookRegistry<K = ArgoCD> = Arc<HookRegistry<K>>;
