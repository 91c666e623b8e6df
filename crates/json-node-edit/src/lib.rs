//! json-node-edit — in-place editing of one node of a JSON graph view.
//!
//! A graph view shows a JSON document as nodes. Selecting a node opens a modal
//! with the node's rows; saving writes the typed text back at the node's path
//! and tells every other open view about the new document.
//!
//! - [`field_shape`]: what the modal showed for a node
//! - [`node_edit`]: merge / rename / replace at a path
//! - [`sync_channel`]: synchronous broadcast of the new document
//! - [`editor`]: the store + edit + broadcast boundary and reference views
//! - [`json_cli`]: logic behind the `json-node-edit` binary

pub mod field_shape;
pub mod node_edit;
pub mod sync_channel;
pub mod editor;
pub mod json_cli;

pub use editor::{DocumentStore, EditorSession, MemoryStore, NodeSelection, SaveOutcome, SelectionKind};
pub use field_shape::{FieldRow, FieldShape, FieldType};
pub use node_edit::{apply_edit, apply_edit_with, EditError, EditOptions, EditStrategy};
pub use sync_channel::{PublishReport, SubscriberError, Subscription, SyncChannel};
