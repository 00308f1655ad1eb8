//! folio - coordination core for a desktop document editor
//!
//! This crate provides the central mediator between user-facing view state
//! and pluggable mode handlers, together with the capability and action
//! registries and a reusable tag-keyed multimap. Rendering, document
//! storage and dialogs stay behind the collaborator traits in [`view`],
//! [`services`] and [`resources`]; the core is pure coordination and
//! bookkeeping on a single UI thread.

pub mod action;
pub mod capability;
pub mod config_paths;
pub mod controller;
pub mod mode;
pub mod resources;
pub mod services;
pub mod tag_map;
pub mod tracing;
pub mod view;

// Re-export commonly used types
pub use action::{Action, ActionRegistry};
pub use capability::{Capability, CapabilityKind, CapabilityRegistry};
pub use controller::{Controller, ModeNotFound, PROP_REOPEN_ON_START};
pub use mode::{ModeHandler, ModeRef};
pub use resources::{FileResources, MemoryResources, ResourceError, ResourceProvider};
pub use tag_map::TagMap;
pub use view::{
    DocumentId, DocumentRef, MessageSeverity, ViewAnchor, ViewCoordinator, ViewNodeId,
};
