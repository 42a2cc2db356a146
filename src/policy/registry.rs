//! Name-keyed admission-policy registry.
//!
//! A registry is an explicitly shared object (wrap it in `Arc` to span
//! threads or subsystems), not process-global state — tests can run any
//! number of independent registries side by side.
//!
//! ## Semantics
//!
//! - `register` appends; duplicate names are accepted.
//! - `lookup` scans in registration order and returns the **first** match,
//!   so a duplicate name never shadows an earlier registration.
//! - `unregister` removes the first entry whose policy matches by object
//!   identity (`Arc::ptr_eq`), regardless of name. Queues bound to the
//!   policy keep their own clone and are unaffected.
//!
//! ## Locking
//!
//! Lookups happen on every queue bind and may race each other freely;
//! mutation is rare (policy load/unload). A `parking_lot::RwLock` gives
//! exactly that discipline: shared readers, exclusive writers.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::traits::AdmissionPolicy;

/// A resolved (name, policy) pair handed out by [`PolicyRegistry::lookup`].
///
/// This is a clone of the registry entry, not a handle into it: the
/// registry can drop the entry afterwards without invalidating the binding.
#[derive(Clone)]
pub struct PolicyBinding {
    name: String,
    policy: Arc<dyn AdmissionPolicy>,
}

impl PolicyBinding {
    /// The name the policy was registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The policy object.
    pub fn policy(&self) -> &Arc<dyn AdmissionPolicy> {
        &self.policy
    }
}

struct Registered {
    name: String,
    policy: Arc<dyn AdmissionPolicy>,
}

/// Shared, name-keyed set of admission policies.
#[derive(Default)]
pub struct PolicyRegistry {
    entries: RwLock<Vec<Registered>>,
}

impl PolicyRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Registers `policy` under `name`.
    ///
    /// Names are not required to be unique; lookups resolve to the first
    /// registration of a name.
    pub fn register(&self, name: impl Into<String>, policy: Arc<dyn AdmissionPolicy>) {
        let mut entries = self.entries.write();
        entries.push(Registered {
            name: name.into(),
            policy,
        });
    }

    /// Resolves `name` to its first-registered policy, if any.
    pub fn lookup(&self, name: &str) -> Option<PolicyBinding> {
        let entries = self.entries.read();
        entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| PolicyBinding {
                name: entry.name.clone(),
                policy: entry.policy.clone(),
            })
    }

    /// Removes the first entry whose policy is `policy` (object identity).
    ///
    /// Returns `true` if an entry was removed. Queues already bound to the
    /// policy are not notified and keep working; they own a clone.
    pub fn unregister(&self, policy: &Arc<dyn AdmissionPolicy>) -> bool {
        let mut entries = self.entries.write();
        match entries
            .iter()
            .position(|entry| Arc::ptr_eq(&entry.policy, policy))
        {
            Some(index) => {
                entries.remove(index);
                true
            },
            None => false,
        }
    }

    /// Returns the number of registered entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
