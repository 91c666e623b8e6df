//! Core types for node edits.

use json_node_path::{PathError, PathStep};
use serde_json::Value;
use thiserror::Error;

use crate::field_shape::FieldShape;

// ── Error ─────────────────────────────────────────────────────────────────

/// Why an edit was rejected. The document is never modified when one of
/// these is returned.
#[derive(Debug, Error)]
pub enum EditError {
    /// Input is not JSON and the node is not a scalar leaf.
    #[error("INVALID_JSON_INPUT: {0}")]
    InvalidJsonInput(#[source] serde_json::Error),
    #[error("UNRESOLVED_PATH: {0}")]
    UnresolvedPath(#[from] PathError),
    #[error("SERIALIZATION_FAULT: {0}")]
    SerializationFault(String),
    /// The stored document itself does not parse.
    #[error("MALFORMED_DOCUMENT: {0}")]
    MalformedDocument(#[source] serde_json::Error),
}

// ── Strategy ──────────────────────────────────────────────────────────────

/// How an edit is written into the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditStrategy {
    /// Overlay the new object's keys onto the existing object.
    Merge,
    /// Drop field `from` from the containing object and put the single new
    /// pair `to` in its place.
    Rename { from: String, to: String },
    /// Overwrite the target.
    Replace,
}

impl EditStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditStrategy::Merge => "merge",
            EditStrategy::Rename { .. } => "rename",
            EditStrategy::Replace => "replace",
        }
    }
}

/// What holds the edit target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Root,
    Object,
    Array,
}

impl ContainerKind {
    /// Kind of a parent value; scalars have none.
    pub fn of(parent: &Value) -> Option<Self> {
        match parent {
            Value::Object(_) => Some(ContainerKind::Object),
            Value::Array(_) => Some(ContainerKind::Array),
            _ => None,
        }
    }
}

/// Typed inputs of the strategy decision.
#[derive(Debug, Clone, Copy)]
pub struct EditFacts<'a> {
    pub shape: &'a FieldShape,
    /// Current value at the target, `None` when the final key is absent.
    pub existing: Option<&'a Value>,
    pub new_value: &'a Value,
    pub container: ContainerKind,
    /// Last path step, `None` for the root.
    pub final_key: Option<&'a PathStep>,
}

// ── Options ───────────────────────────────────────────────────────────────

/// Options for [`apply_edit_with`](super::apply_edit_with).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOptions {
    /// Spaces per indentation level of the produced document.
    pub indent: usize,
    /// Accept unparseable input on a scalar leaf as a literal string.
    pub literal_fallback: bool,
}

impl Default for EditOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            literal_fallback: true,
        }
    }
}

/// Result of a successful edit.
#[derive(Debug, Clone, PartialEq)]
pub struct EditOutcome {
    pub document: String,
    pub strategy: EditStrategy,
}
