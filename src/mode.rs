//! Mode handler contract
//!
//! A mode is an editing or navigation personality operating over the same
//! document model; exactly one is active at a time. Variants are supplied
//! by the shell and registered with the controller by name.

use std::cell::RefCell;
use std::rc::Rc;

use crate::controller::Controller;
use crate::view::DocumentRef;

/// Shared handle to a registered mode handler.
///
/// The controller's mode registry owns the canonical entry; the active
/// slot holds a second handle to the same cell. Single-threaded by design,
/// hence `Rc`/`RefCell` rather than any locking.
pub type ModeRef = Rc<RefCell<dyn ModeHandler>>;

/// A pluggable editing/navigation personality.
///
/// Lifecycle hooks run synchronously on the event thread and receive the
/// controller so a mode can register its own actions and capabilities as
/// it comes up. Hooks must not re-enter mode selection.
pub trait ModeHandler {
    /// Unique mode name; doubles as the registry key
    fn name(&self) -> &str;

    /// Called after this handler becomes the active mode
    fn startup(&mut self, app: &mut Controller);

    /// Called when this handler stops being the active mode
    ///
    /// Invoked exactly once per activation; must not fail for a cleanly
    /// running handler.
    fn shutdown(&mut self, app: &mut Controller);

    /// Restart hint for `document`, persisted across sessions on quit
    fn restorable_state(&self, _document: &DocumentRef) -> Option<String> {
        None
    }
}
