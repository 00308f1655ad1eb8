//! Singleton-per-kind capability registry
//!
//! Capabilities are optional service objects (printing, filtering, ...)
//! attached to the controller. At most one instance per kind may be live
//! at a time, so a consumer asking for "the X capability" always gets
//! exactly one answer.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Identifies a capability role.
///
/// Kinds are explicit tags, not runtime types; two instances registered
/// under the same kind compete for the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CapabilityKind(&'static str);

impl CapabilityKind {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A pluggable service object attached to the controller.
pub trait Capability {
    /// The role this instance fills.
    ///
    /// Inference is nominal: an instance names its own kind, so a type
    /// that could serve several roles still registers unambiguously.
    fn kind(&self) -> CapabilityKind;
}

/// Maps a capability kind to at most one live instance.
#[derive(Default)]
pub struct CapabilityRegistry {
    entries: HashMap<CapabilityKind, Rc<dyn Capability>>,
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `capability` under `kind`.
    ///
    /// Returns true only if the kind was vacant; an occupied kind rejects
    /// the new instance without mutating the registry. This keeps
    /// unrelated subsystems from silently replacing each other's services.
    pub fn add(&mut self, kind: CapabilityKind, capability: Rc<dyn Capability>) -> bool {
        match self.entries.entry(kind) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(capability);
                true
            }
        }
    }

    /// Register `capability` under the kind it names for itself
    pub fn add_instance(&mut self, capability: Rc<dyn Capability>) -> bool {
        let kind = capability.kind();
        self.add(kind, capability)
    }

    /// Look up the live instance for `kind`
    pub fn get(&self, kind: CapabilityKind) -> Option<Rc<dyn Capability>> {
        self.entries.get(&kind).cloned()
    }

    /// Remove and return the instance registered under `kind`
    pub fn remove(&mut self, kind: CapabilityKind) -> Option<Rc<dyn Capability>> {
        self.entries.remove(&kind)
    }

    /// Remove `capability` only if it is the registered instance for its kind
    ///
    /// Identity is pointer identity, not value equality. Returns whether a
    /// removal occurred.
    pub fn remove_instance(&mut self, capability: &Rc<dyn Capability>) -> bool {
        let kind = capability.kind();
        match self.entries.get(&kind) {
            Some(existing) if Rc::ptr_eq(existing, capability) => {
                self.entries.remove(&kind);
                true
            }
            _ => false,
        }
    }
}
