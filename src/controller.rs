//! The application controller - the process-wide coordination point
//!
//! Owns the mode handler registry, the capability and action registries,
//! and the collaborator slots (view, help, print, filter, attributes).
//! External callers (menus, shortcuts, commands) talk to the controller;
//! the controller delegates to the active mode handler or the view layer.
//!
//! Everything here runs on the single UI event thread; no locking is
//! performed and none is required.

use std::collections::HashMap;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;

use crate::action::{Action, ActionRegistry, QuitAction};
use crate::capability::{Capability, CapabilityKind, CapabilityRegistry};
use crate::mode::ModeRef;
use crate::resources::ResourceProvider;
use crate::services::{AttributeService, FilterService, HelpService, PrintService};
use crate::view::{DocumentRef, MessageSeverity, ViewAnchor, ViewCoordinator, ViewNodeId};

/// Property under which the restart hint is persisted on quit
pub const PROP_REOPEN_ON_START: &str = "reopen_on_start";

/// Resource key for the default error-dialog text
const UNDEFINED_ERROR_KEY: &str = "undefined_error";

/// One-time-initialization flag: at most one live controller per process.
static CONTROLLER_ALIVE: AtomicBool = AtomicBool::new(false);

/// Mode selection failed because no handler is registered under the name.
///
/// Recoverable; the controller state is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no mode named `{0}` is registered")]
pub struct ModeNotFound(pub String);

/// The central mediator between mode handlers, registries and the view layer.
///
/// Constructed exactly once at startup with the resource provider;
/// collaborators are wired in afterwards, each at most once. Lives until
/// [`quit`](Controller::quit) drives orderly teardown.
pub struct Controller {
    resources: Box<dyn ResourceProvider>,
    actions: ActionRegistry,
    capabilities: CapabilityRegistry,
    /// Canonical owner of every registered mode handler, keyed by mode name
    modes: HashMap<String, ModeRef>,
    /// Second handle to whichever registered handler is currently active
    active: Option<ModeRef>,
    view: Option<Box<dyn ViewCoordinator>>,
    help: Option<Box<dyn HelpService>>,
    print: Option<Box<dyn PrintService>>,
    filter: Option<Box<dyn FilterService>>,
    attributes: Option<Box<dyn AttributeService>>,
    /// Latched once the view approves a quit; makes re-entry a no-op
    quitting: bool,
}

impl Controller {
    /// Create the process-wide controller.
    ///
    /// Registers the built-in `"quit"` action and runs the resource
    /// provider's one-time `init()`.
    ///
    /// # Panics
    ///
    /// Panics if another controller is alive in this process. A second
    /// construction is a wiring bug, not a recoverable condition.
    pub fn new(resources: Box<dyn ResourceProvider>) -> Self {
        if CONTROLLER_ALIVE.swap(true, Ordering::SeqCst) {
            panic!("a Controller already exists in this process; construct it exactly once at startup");
        }

        let mut controller = Self {
            resources,
            actions: ActionRegistry::new(),
            capabilities: CapabilityRegistry::new(),
            modes: HashMap::new(),
            active: None,
            view: None,
            help: None,
            print: None,
            filter: None,
            attributes: None,
            quitting: false,
        };
        controller.add_action("quit", Rc::new(QuitAction));
        controller.resources.init();
        controller
    }

    // =========================================================================
    // Mode lifecycle
    // =========================================================================

    /// Register a mode handler under its own name.
    ///
    /// Re-registering a name overwrites the previous handler (hot-reload
    /// support). Re-registering the name of the currently active mode
    /// leaves the old instance active until the next selection.
    pub fn register_mode(&mut self, handler: ModeRef) {
        let name = handler.borrow().name().to_string();
        if self.modes.insert(name.clone(), handler).is_some() {
            tracing::debug!("Mode handler `{}` re-registered", name);
        }
    }

    /// Switch to the mode registered under `name`.
    ///
    /// Unknown names fail with [`ModeNotFound`] and change nothing.
    /// Selecting the already-active mode is a no-op that reports success.
    /// Otherwise the switch runs shutdown → view notification → swap →
    /// startup, and finally asks the view layer to present the new mode's
    /// view; the return value is the view layer's answer (false when no
    /// view is attached yet).
    pub fn select_mode(&mut self, name: &str) -> Result<bool, ModeNotFound> {
        let handler = self
            .modes
            .get(name)
            .cloned()
            .ok_or_else(|| ModeNotFound(name.to_string()))?;
        if self.is_active(&handler) {
            return Ok(true);
        }
        self.activate_mode(handler);
        Ok(self
            .view
            .as_deref()
            .map_or(false, |view| view.change_to_mode(name)))
    }

    /// Switch to `handler` directly - the identity-based primitive behind
    /// [`select_mode`](Controller::select_mode).
    ///
    /// A no-op when `handler` is already the active one. Ordering
    /// guarantee: the outgoing handler's `shutdown` completes before the
    /// view is notified, and the incoming handler's `startup` runs only
    /// after the active slot has been swapped. At no point are two
    /// handlers both considered active.
    pub fn activate_mode(&mut self, handler: ModeRef) {
        if self.is_active(&handler) {
            return;
        }

        let old = self.active.take();
        if let Some(old) = &old {
            old.borrow_mut().shutdown(self);
        }
        if let Some(view) = self.view.as_deref() {
            view.notify_mode_transition(old.as_ref(), &handler);
        }
        tracing::debug!("Mode `{}` activated", handler.borrow().name());
        self.active = Some(handler.clone());
        handler.borrow_mut().startup(self);
    }

    fn is_active(&self, handler: &ModeRef) -> bool {
        self.active
            .as_ref()
            .map_or(false, |active| Rc::ptr_eq(active, handler))
    }

    /// The currently active mode handler, if any
    pub fn active_mode(&self) -> Option<ModeRef> {
        self.active.clone()
    }

    /// Name of the currently active mode, if any
    pub fn active_mode_name(&self) -> Option<String> {
        self.active.as_ref().map(|m| m.borrow().name().to_string())
    }

    /// The handler registered under `name`, if any
    pub fn mode_handler(&self, name: &str) -> Option<ModeRef> {
        self.modes.get(name).cloned()
    }

    /// Names of all registered modes, in no particular order
    pub fn mode_names(&self) -> impl Iterator<Item = &str> {
        self.modes.keys().map(String::as_str)
    }

    // =========================================================================
    // Quit sequence
    // =========================================================================

    /// Drive the application quit sequence.
    ///
    /// Computes the restart hint from the active mode and the current
    /// document, asks the view for permission (a veto returns immediately
    /// with no side effects), persists the hint only after approval, shuts
    /// down the active mode, and hands process termination to the view
    /// layer. Safe against being invoked twice.
    pub fn quit(&mut self) {
        if self.quitting {
            return;
        }
        let restore = self.restart_hint();
        {
            let Some(view) = self.view.as_deref() else {
                tracing::warn!("Quit requested before a view coordinator was attached");
                return;
            };
            if !view.confirm_quit() {
                return;
            }
        }
        self.quitting = true;
        if let Some(hint) = restore {
            self.resources.set_property(PROP_REOPEN_ON_START, &hint);
        }
        if let Some(mode) = self.active.take() {
            mode.borrow_mut().shutdown(self);
        }
        if let Some(view) = self.view.as_deref() {
            view.terminate();
        }
    }

    /// Restart hint for the current document, if every link in the chain
    /// (active mode, view, document, state provider) is present
    fn restart_hint(&self) -> Option<String> {
        let mode = self.active.as_ref()?;
        let document = self.view.as_deref()?.current_document()?;
        mode.borrow().restorable_state(&document)
    }

    // =========================================================================
    // Capability registry forwarding
    // =========================================================================

    /// Register a capability under an explicit kind; false if occupied
    pub fn add_capability(&mut self, kind: CapabilityKind, capability: Rc<dyn Capability>) -> bool {
        self.capabilities.add(kind, capability)
    }

    /// Register a capability under the kind it names for itself
    pub fn add_capability_instance(&mut self, capability: Rc<dyn Capability>) -> bool {
        self.capabilities.add_instance(capability)
    }

    /// The live capability for `kind`, if registered
    pub fn capability(&self, kind: CapabilityKind) -> Option<Rc<dyn Capability>> {
        self.capabilities.get(kind)
    }

    /// Remove and return the capability registered under `kind`
    pub fn remove_capability(&mut self, kind: CapabilityKind) -> Option<Rc<dyn Capability>> {
        self.capabilities.remove(kind)
    }

    /// Remove `capability` only if it is the registered instance for its kind
    pub fn remove_capability_instance(&mut self, capability: &Rc<dyn Capability>) -> bool {
        self.capabilities.remove_instance(capability)
    }

    // =========================================================================
    // Action registry forwarding
    // =========================================================================

    /// Bind `action` under `key`, discarding any previous binding
    pub fn add_action(&mut self, key: impl Into<String>, action: Rc<dyn Action>) {
        self.actions.add(key, action);
    }

    /// The action bound to `key`, if any
    pub fn action(&self, key: &str) -> Option<Rc<dyn Action>> {
        self.actions.get(key)
    }

    /// Remove and return the action bound to `key`
    pub fn remove_action(&mut self, key: &str) -> Option<Rc<dyn Action>> {
        self.actions.remove(key)
    }

    /// Look up and invoke the action bound to `key`; false if unbound
    pub fn run_action(&mut self, key: &str) -> bool {
        let Some(action) = self.actions.get(key) else {
            tracing::debug!("No action bound to `{}`", key);
            return false;
        };
        action.invoke(self);
        true
    }

    // =========================================================================
    // View delegation
    // =========================================================================

    /// The currently presented document; None when no view is attached or
    /// no document is open
    pub fn current_document(&self) -> Option<DocumentRef> {
        self.view.as_deref()?.current_document()
    }

    /// Root of the currently presented view, if any
    pub fn current_view_root(&self) -> Option<ViewNodeId> {
        self.view.as_deref()?.current_view_root()
    }

    /// Close the currently presented document; `force` skips save prompts
    pub fn close_document(&self, force: bool) {
        if let Some(view) = self.view.as_deref() {
            view.close_document(force);
        }
    }

    // =========================================================================
    // Dialog presentation
    // =========================================================================

    /// Present an error dialog anchored at the view's content area.
    ///
    /// An absent or empty payload is replaced by the `undefined_error`
    /// resource string, falling back to a literal default when the
    /// resource itself is missing.
    pub fn error_message(&self, message: Option<&str>) {
        let text = match message {
            Some(m) if !m.is_empty() => m.to_string(),
            _ => self
                .resources
                .text(UNDEFINED_ERROR_KEY)
                .unwrap_or_else(|| "Undefined error".to_string()),
        };
        self.present(&text, MessageSeverity::Error, self.default_anchor());
    }

    /// Present an error dialog at an explicit anchor
    pub fn error_message_at(&self, message: &str, anchor: ViewAnchor) {
        self.present(message, MessageSeverity::Error, Some(anchor));
    }

    /// Present an information dialog anchored at the view's content area
    pub fn information_message(&self, message: &str) {
        self.present(message, MessageSeverity::Information, self.default_anchor());
    }

    /// Present an information dialog at an explicit anchor
    pub fn information_message_at(&self, message: &str, anchor: ViewAnchor) {
        self.present(message, MessageSeverity::Information, Some(anchor));
    }

    fn default_anchor(&self) -> Option<ViewAnchor> {
        self.view.as_deref().and_then(|view| view.content_anchor())
    }

    fn present(&self, text: &str, severity: MessageSeverity, anchor: Option<ViewAnchor>) {
        match self.view.as_deref() {
            Some(view) => view.present_message(text, severity, anchor),
            None => tracing::warn!("No view attached; dropping message: {}", text),
        }
    }

    // =========================================================================
    // Resources
    // =========================================================================

    /// Resolve a UI string through the resource provider
    pub fn text(&self, key: &str) -> Option<String> {
        self.resources.text(key)
    }

    /// Read a persisted property
    pub fn property(&self, key: &str) -> Option<String> {
        self.resources.property(key)
    }

    /// Write a persisted property
    pub fn set_property(&mut self, key: &str, value: &str) {
        self.resources.set_property(key, value);
    }

    /// The resource provider itself
    pub fn resources(&self) -> &dyn ResourceProvider {
        &*self.resources
    }

    // =========================================================================
    // Collaborator wiring (each slot is set at most once)
    // =========================================================================

    pub fn set_view(&mut self, view: Box<dyn ViewCoordinator>) {
        assert!(
            self.view.is_none(),
            "view coordinator may only be set once"
        );
        self.view = Some(view);
    }

    pub fn view(&self) -> Option<&dyn ViewCoordinator> {
        self.view.as_deref()
    }

    pub fn set_help_service(&mut self, help: Box<dyn HelpService>) {
        assert!(self.help.is_none(), "help service may only be set once");
        self.help = Some(help);
    }

    pub fn help_service(&self) -> Option<&dyn HelpService> {
        self.help.as_deref()
    }

    pub fn set_print_service(&mut self, print: Box<dyn PrintService>) {
        assert!(self.print.is_none(), "print service may only be set once");
        self.print = Some(print);
    }

    pub fn print_service(&self) -> Option<&dyn PrintService> {
        self.print.as_deref()
    }

    pub fn set_filter_service(&mut self, filter: Box<dyn FilterService>) {
        assert!(self.filter.is_none(), "filter service may only be set once");
        self.filter = Some(filter);
    }

    pub fn filter_service(&self) -> Option<&dyn FilterService> {
        self.filter.as_deref()
    }

    pub fn set_attribute_service(&mut self, attributes: Box<dyn AttributeService>) {
        assert!(
            self.attributes.is_none(),
            "attribute service may only be set once"
        );
        self.attributes = Some(attributes);
    }

    pub fn attribute_service(&self) -> Option<&dyn AttributeService> {
        self.attributes.as_deref()
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        CONTROLLER_ALIVE.store(false, Ordering::SeqCst);
    }
}
