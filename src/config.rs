//! Reconcile step configuration

use std::env;

/// Environment variable overriding the server-side apply field manager
pub const FIELD_MANAGER_ENV: &str = "ARGOCD_HOOKS_FIELD_MANAGER";

/// Environment variable toggling forced server-side apply (`true`/`false`)
pub const FORCE_APPLY_ENV: &str = "ARGOCD_HOOKS_FORCE_APPLY";

/// Default field manager for server-side apply
pub const DEFAULT_FIELD_MANAGER: &str = "argocd-operator";

/// Settings for persisting hook-mutated objects
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReconcileConfig {
    /// Field manager recorded by server-side apply
    pub field_manager: String,
    /// Take ownership of conflicting fields on apply
    pub force_apply: bool,
    /// Stamp the owning ArgoCD as controller owner of generated objects
    pub set_owner_reference: bool,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            field_manager: DEFAULT_FIELD_MANAGER.to_string(),
            force_apply: true,
            set_owner_reference: true,
        }
    }
}

impl ReconcileConfig {
    /// Defaults overridden by `ARGOCD_HOOKS_*` environment variables.
    ///
    /// Unparseable boolean values fall back to the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(manager) = lookup(FIELD_MANAGER_ENV).filter(|m| !m.trim().is_empty()) {
            config.field_manager = manager;
        }
        if let Some(force) = lookup(FORCE_APPLY_ENV).and_then(|v| v.trim().parse().ok()) {
            config.force_apply = force;
        }
        config
    }

    /// Set the field manager and return self for chaining
    pub fn field_manager(mut self, manager: impl Into<String>) -> Self {
        self.field_manager = manager.into();
        self
    }

    /// Set forced apply and return self for chaining
    pub fn force_apply(mut self, force: bool) -> Self {
        self.force_apply = force;
        self
    }

    /// Set owner reference stamping and return self for chaining
    pub fn set_owner_reference(mut self, enabled: bool) -> Self {
        self.set_owner_reference = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = ReconcileConfig::default();
        assert_eq!(config.field_manager, "argocd-operator");
        assert!(config.force_apply);
        assert!(config.set_owner_reference);
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = ReconcileConfig::from_lookup(lookup(&[
            (FIELD_MANAGER_ENV, "platform-team"),
            (FORCE_APPLY_ENV, "false"),
        ]));

        assert_eq!(config.field_manager, "platform-team");
        assert!(!config.force_apply);
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let config = ReconcileConfig::from_lookup(lookup(&[
            (FIELD_MANAGER_ENV, "  "),
            (FORCE_APPLY_ENV, "yes please"),
        ]));

        assert_eq!(config, ReconcileConfig::default());
    }

    #[test]
    fn builder_chains() {
        let config = ReconcileConfig::default()
            .field_manager("tests")
            .force_apply(false)
            .set_owner_reference(false);

        assert_eq!(config.field_manager, "tests");
        assert!(!config.force_apply);
        assert!(!config.set_owner_reference);
    }
}
