//! View layer contract
//!
//! The coordination core never renders anything itself; everything the
//! user sees goes through this interface, implemented by the windowing
//! shell. The core only assumes these calls complete synchronously.

use crate::mode::ModeRef;

/// Identifies an open document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(pub u64);

/// Identifies the root widget of the presented document view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewNodeId(pub u64);

/// Opaque handle to a widget a dialog can be anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewAnchor(pub u64);

/// Minimal description of an open document as the coordination core sees it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    pub id: DocumentId,
    /// Display title (file name, or an untitled placeholder)
    pub title: String,
    /// Where the document can be reopened from, when it has a backing location
    pub location: Option<String>,
}

/// How a presented message should be styled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageSeverity {
    Information,
    Error,
}

/// The windowing shell, as seen from the coordination core.
pub trait ViewCoordinator {
    /// Widget that dialogs without an explicit anchor attach to
    fn content_anchor(&self) -> Option<ViewAnchor>;

    /// Present a message dialog
    fn present_message(&self, text: &str, severity: MessageSeverity, anchor: Option<ViewAnchor>);

    /// Ask whether the application may quit (e.g. unsaved changes veto)
    fn confirm_quit(&self) -> bool;

    /// Final process termination; does not return in a real shell
    fn terminate(&self);

    /// A mode transition is underway: the old handler has shut down, the
    /// new one has not started yet. The shell swaps presented UI state here.
    fn notify_mode_transition(&self, old: Option<&ModeRef>, new: &ModeRef);

    /// The currently presented document, if any is open
    fn current_document(&self) -> Option<DocumentRef>;

    /// Root of the currently presented view, if any
    fn current_view_root(&self) -> Option<ViewNodeId>;

    /// Complete a mode switch by presenting the named mode's view
    fn change_to_mode(&self, name: &str) -> bool;

    /// Close the currently presented document; `force` skips save prompts
    fn close_document(&self, force: bool);
}
