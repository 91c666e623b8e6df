//! `json-cli` — logic behind the `json-node-edit` binary.
//!
//! The binary reads a document, selects the node at a JSON Pointer the way the
//! graph view would, and either prints the modal text for it or applies an
//! edit and prints the new document.

use clap::ValueEnum;
use json_node_path::{parse_json_pointer, PathError};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::editor::NodeSelection;
use crate::field_shape::FieldShape;
use crate::node_edit::{apply_edit_with, parse_document, EditError, EditOptions};

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("invalid pointer: {0}")]
    Pointer(#[from] PathError),
    #[error("{0}")]
    Edit(#[from] EditError),
}

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "json_node_edit=warn";

/// Filter for the binary's logs: `rust_log` when set and valid, otherwise
/// [`DEFAULT_LOG_FILTER`].
pub fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// How the selected node is presented to the edit engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum NodeShape {
    /// Derived from the value: objects are keyed rows, the rest a leaf.
    #[default]
    Node,
    /// Always a scalar leaf (enables the literal-string fallback).
    Scalar,
    /// A single keyed row named after the last pointer step. The modal shows
    /// the field's value; a one-key object with another key renames it.
    Field,
}

/// Resolve `pointer` in `document` to a selection of the given shape.
pub fn select(document: &str, pointer: &str, shape: NodeShape) -> Result<NodeSelection, CliError> {
    let path = parse_json_pointer(pointer)?;
    let selection = match shape {
        NodeShape::Node => NodeSelection::select(document, path)?,
        NodeShape::Field => NodeSelection::select_field(document, path)?,
        NodeShape::Scalar => {
            let mut selection = NodeSelection::select(document, path)?;
            selection.shape = FieldShape::scalar(selection.shape.edit_value());
            selection
        }
    };
    Ok(selection)
}

/// Text the node modal would show for `pointer`.
pub fn show_node(document: &str, pointer: &str, shape: NodeShape) -> Result<String, CliError> {
    Ok(select(document, pointer, shape)?.edit_text())
}

/// Apply `input` to the node at `pointer` and return the new document.
pub fn edit_node(
    document: &str,
    pointer: &str,
    input: &str,
    shape: NodeShape,
    options: &EditOptions,
) -> Result<String, CliError> {
    parse_document(document)?;
    let selection = select(document, pointer, shape)?;
    tracing::debug!(pointer, shape = ?shape, rows = selection.shape.len(), "selected node");
    Ok(apply_edit_with(document, &selection.path, &selection.shape, input, options)?)
}
