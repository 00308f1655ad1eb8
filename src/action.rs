//! String-keyed action registry
//!
//! Actions are the invocable command objects behind menus, shortcuts and
//! the command palette. Re-binding a key is a supported, common case, so
//! `add` overwrites silently and the last registration wins.

use std::collections::HashMap;
use std::rc::Rc;

use crate::controller::Controller;

/// An invocable editor command.
///
/// Receives the controller explicitly; there is no ambient application
/// global to reach for.
pub trait Action {
    fn invoke(&self, app: &mut Controller);
}

/// Maps an action key to its command object.
#[derive(Default)]
pub struct ActionRegistry {
    entries: HashMap<String, Rc<dyn Action>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `action` under `key`, discarding any previous binding
    pub fn add(&mut self, key: impl Into<String>, action: Rc<dyn Action>) {
        self.entries.insert(key.into(), action);
    }

    /// Look up the action bound to `key`
    pub fn get(&self, key: &str) -> Option<Rc<dyn Action>> {
        self.entries.get(key).cloned()
    }

    /// Remove and return the action bound to `key`
    pub fn remove(&mut self, key: &str) -> Option<Rc<dyn Action>> {
        self.entries.remove(key)
    }
}

/// Built-in action that drives the application quit sequence.
///
/// Registered under `"quit"` by the controller constructor.
pub struct QuitAction;

impl Action for QuitAction {
    fn invoke(&self, app: &mut Controller) {
        app.quit();
    }
}
