//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use folio::controller::Controller;
use folio::mode::{ModeHandler, ModeRef};
use folio::view::{
    DocumentId, DocumentRef, MessageSeverity, ViewAnchor, ViewCoordinator, ViewNodeId,
};

/// Shared, inspectable log of calls the controller made
pub type CallLog = Rc<RefCell<Vec<String>>>;

pub fn call_log() -> CallLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// Everything the controller did against the view layer, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    ModeTransition {
        old: Option<String>,
        new: String,
    },
    ChangeToMode(String),
    Message {
        text: String,
        severity: MessageSeverity,
        anchor: Option<ViewAnchor>,
    },
    ConfirmQuit,
    Terminate,
    CloseDocument {
        force: bool,
    },
}

pub type EventLog = Rc<RefCell<Vec<ViewEvent>>>;

pub fn event_log() -> EventLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// View coordinator fake that records every call
pub struct RecordingView {
    pub events: EventLog,
    pub allow_quit: bool,
    pub document: Option<DocumentRef>,
}

impl RecordingView {
    pub fn new(events: &EventLog) -> Self {
        Self {
            events: events.clone(),
            allow_quit: true,
            document: None,
        }
    }

    pub fn with_document(events: &EventLog, document: DocumentRef) -> Self {
        Self {
            events: events.clone(),
            allow_quit: true,
            document: Some(document),
        }
    }

    pub fn vetoing(events: &EventLog, document: Option<DocumentRef>) -> Self {
        Self {
            events: events.clone(),
            allow_quit: false,
            document,
        }
    }
}

impl ViewCoordinator for RecordingView {
    fn content_anchor(&self) -> Option<ViewAnchor> {
        Some(ViewAnchor(1))
    }

    fn present_message(&self, text: &str, severity: MessageSeverity, anchor: Option<ViewAnchor>) {
        self.events.borrow_mut().push(ViewEvent::Message {
            text: text.to_string(),
            severity,
            anchor,
        });
    }

    fn confirm_quit(&self) -> bool {
        self.events.borrow_mut().push(ViewEvent::ConfirmQuit);
        self.allow_quit
    }

    fn terminate(&self) {
        self.events.borrow_mut().push(ViewEvent::Terminate);
    }

    fn notify_mode_transition(&self, old: Option<&ModeRef>, new: &ModeRef) {
        self.events.borrow_mut().push(ViewEvent::ModeTransition {
            old: old.map(|m| m.borrow().name().to_string()),
            new: new.borrow().name().to_string(),
        });
    }

    fn current_document(&self) -> Option<DocumentRef> {
        self.document.clone()
    }

    fn current_view_root(&self) -> Option<ViewNodeId> {
        self.document.as_ref().map(|_| ViewNodeId(7))
    }

    fn change_to_mode(&self, name: &str) -> bool {
        self.events
            .borrow_mut()
            .push(ViewEvent::ChangeToMode(name.to_string()));
        true
    }

    fn close_document(&self, force: bool) {
        self.events
            .borrow_mut()
            .push(ViewEvent::CloseDocument { force });
    }
}

/// Mode handler fake that records its lifecycle hooks into a shared log
pub struct CountingMode {
    name: String,
    calls: CallLog,
    restore: Option<String>,
}

impl CountingMode {
    pub fn new(name: &str, calls: &CallLog) -> Self {
        Self {
            name: name.to_string(),
            calls: calls.clone(),
            restore: None,
        }
    }

    pub fn with_restore(name: &str, calls: &CallLog, restore: &str) -> Self {
        Self {
            name: name.to_string(),
            calls: calls.clone(),
            restore: Some(restore.to_string()),
        }
    }
}

impl ModeHandler for CountingMode {
    fn name(&self) -> &str {
        &self.name
    }

    fn startup(&mut self, _app: &mut Controller) {
        self.calls
            .borrow_mut()
            .push(format!("{}.startup", self.name));
    }

    fn shutdown(&mut self, _app: &mut Controller) {
        self.calls
            .borrow_mut()
            .push(format!("{}.shutdown", self.name));
    }

    fn restorable_state(&self, _document: &DocumentRef) -> Option<String> {
        self.restore.clone()
    }
}

/// Wrap a mode handler into the shared handle the controller expects
pub fn mode_ref(handler: CountingMode) -> ModeRef {
    Rc::new(RefCell::new(handler))
}

/// A document as the view layer would report it
pub fn open_document(location: &str) -> DocumentRef {
    DocumentRef {
        id: DocumentId(1),
        title: "notes.txt".to_string(),
        location: Some(location.to_string()),
    }
}
