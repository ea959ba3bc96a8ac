//! Ordered, fail-fast hook application
//!
//! Hooks run one after another against the same object. The first error stops
//! the pass and is returned exactly as the hook produced it. Mutations made by
//! hooks that already ran are not rolled back; callers discard the object on
//! error.

use tracing::{trace, warn};

use crate::hooks::candidate::Candidate;
use crate::hooks::hook::HookResult;
use crate::hooks::registry::{HookRegistry, HookSet};

/// Apply every hook in `hooks`, in order, to `object`.
///
/// Returns the first hook error unmodified; later hooks do not run.
pub fn apply_reconciler_hooks<K>(
    hooks: &HookSet<K>,
    owner: &K,
    object: &mut dyn Candidate,
) -> HookResult {
    for (position, hook) in hooks.iter().enumerate() {
        trace!(
            hook = hook.name(),
            position,
            kind = %object.object_kind(),
            "applying reconciler hook"
        );

        if let Err(err) = hook.apply(owner, object) {
            warn!(
                hook = hook.name(),
                position,
                remaining = hooks.len() - position - 1,
                kind = %object.object_kind(),
                name = object.object_name().unwrap_or_default(),
                error = %err,
                "reconciler hook failed, skipping remaining hooks"
            );
            return Err(err);
        }
    }

    Ok(())
}

impl<K: 'static> HookRegistry<K> {
    /// Apply the registered hooks to `object` with `owner` as context.
    ///
    /// Takes one snapshot of the registry up front, so hooks registered while
    /// the pass is running are not picked up until the next call.
    pub fn apply(&self, owner: &K, object: &mut dyn Candidate) -> HookResult {
        let hooks = self.current_hooks();
        apply_reconciler_hooks(&hooks, owner, object)
    }
}
