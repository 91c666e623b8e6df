//! Path-addressed node edits.
//!
//! Takes the current document text, the path of the edited graph node, the
//! [`FieldShape`](crate::field_shape::FieldShape) the modal showed for it and
//! the raw text the user typed, and produces the new document text.
//!
//! # Strategies
//!
//! - `merge`: the node showed keyed rows and old and new values are objects;
//!   new keys overwrite, the rest are kept.
//! - `rename`: the node was a single keyed field and the user typed a
//!   single-entry object with a different key.
//! - `replace`: anything else overwrites the target.
//!
//! The decision ([`decide_strategy`]) is separate from the write
//! ([`edit_value`]) so each can be tested alone.

pub mod types;
pub mod strategy;
pub mod apply;

pub use types::{ContainerKind, EditError, EditFacts, EditOptions, EditOutcome, EditStrategy};
pub use strategy::decide_strategy;
pub use apply::{
    apply_edit, apply_edit_with, edit_document, edit_value, format_document, parse_document,
    parse_input,
};
