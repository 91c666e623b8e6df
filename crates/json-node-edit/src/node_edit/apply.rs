//! Node edit apply logic.

use json_node_path::{find_parent_mut, format_json_pointer, step, step_mut, PathError, PathStep};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

use super::strategy::decide_strategy;
use super::types::{ContainerKind, EditError, EditFacts, EditOptions, EditOutcome, EditStrategy};
use crate::field_shape::FieldShape;

// ── Parsing and formatting ────────────────────────────────────────────────

/// Parse stored document text. Blank text reads as `{}`.
pub fn parse_document(document: &str) -> Result<Value, EditError> {
    if document.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_str(document).map_err(EditError::MalformedDocument)
}

/// Parse what the user typed.
///
/// Unparseable text on a scalar leaf becomes a string value when
/// `options.literal_fallback` is set.
pub fn parse_input(input: &str, shape: &FieldShape, options: &EditOptions) -> Result<Value, EditError> {
    match serde_json::from_str(input) {
        Ok(value) => Ok(value),
        Err(_) if options.literal_fallback && shape.is_scalar_leaf() => {
            Ok(Value::String(input.to_string()))
        }
        Err(err) => Err(EditError::InvalidJsonInput(err)),
    }
}

/// Pretty-print a document with `options.indent` spaces per level.
pub fn format_document(value: &Value, options: &EditOptions) -> Result<String, EditError> {
    let indent = vec![b' '; options.indent];
    let mut buf = Vec::with_capacity(128);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(&indent));
    value
        .serialize(&mut ser)
        .map_err(|e| EditError::SerializationFault(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| EditError::SerializationFault(e.to_string()))
}

// ── Writers ───────────────────────────────────────────────────────────────

fn merge_into(target: &mut Value, incoming: Value) {
    match (target, incoming) {
        (Value::Object(existing), Value::Object(incoming)) => {
            for (k, v) in incoming {
                existing.insert(k, v);
            }
        }
        (target, incoming) => *target = incoming,
    }
}

/// Rebuild `map` with `from` swapped for `to: value` at the same position.
/// A sibling already named `to` is dropped.
fn rename_field(map: &mut Map<String, Value>, from: &str, to: String, value: Value) {
    let old = std::mem::take(map);
    let mut pending = Some((to.clone(), value));
    for (k, v) in old {
        if k == from {
            if let Some((key, value)) = pending.take() {
                map.insert(key, value);
            }
        } else if k != to {
            map.insert(k, v);
        }
    }
    if let Some((key, value)) = pending {
        map.insert(key, value);
    }
}

fn write_field(parent: &mut Value, key: &PathStep, value: Value, depth: usize) -> Result<(), EditError> {
    match parent {
        Value::Object(map) => {
            map.insert(key.to_key(), value);
            Ok(())
        }
        Value::Array(arr) => {
            let idx = key.as_index().ok_or(PathError::Unresolved { depth })?;
            if idx < arr.len() {
                arr[idx] = value;
            } else if idx == arr.len() {
                arr.push(value);
            } else {
                return Err(PathError::Unresolved { depth }.into());
            }
            Ok(())
        }
        _ => Err(PathError::Unresolved { depth }.into()),
    }
}

// ── Main apply function ───────────────────────────────────────────────────

/// Write `new_value` into `root` at `path` (in-place mutation).
///
/// All checks run before the first write, so on error `root` is unchanged.
pub fn edit_value(
    root: &mut Value,
    path: &[PathStep],
    shape: &FieldShape,
    new_value: Value,
) -> Result<EditStrategy, EditError> {
    if path.is_empty() {
        let strategy = decide_strategy(&EditFacts {
            shape,
            existing: Some(&*root),
            new_value: &new_value,
            container: ContainerKind::Root,
            final_key: None,
        });
        match strategy {
            EditStrategy::Merge => merge_into(root, new_value),
            _ => *root = new_value,
        }
        return Ok(strategy);
    }

    let depth = path.len() - 1;
    let (parent, last) = find_parent_mut(root, path)?;
    let container = ContainerKind::of(parent).ok_or(PathError::Unresolved { depth })?;
    let strategy = decide_strategy(&EditFacts {
        shape,
        existing: step(parent, last),
        new_value: &new_value,
        container,
        final_key: Some(last),
    });

    match &strategy {
        EditStrategy::Merge => match step_mut(parent, last) {
            Some(target) => merge_into(target, new_value),
            None => write_field(parent, last, new_value, depth)?,
        },
        EditStrategy::Rename { from, to } => match (parent, new_value) {
            (Value::Object(map), Value::Object(pair)) => {
                let value = pair.into_iter().next().map(|(_, v)| v).unwrap_or(Value::Null);
                rename_field(map, from, to.clone(), value);
            }
            (parent, new_value) => write_field(parent, last, new_value, depth)?,
        },
        EditStrategy::Replace => write_field(parent, last, new_value, depth)?,
    }
    Ok(strategy)
}

/// Apply an edit and report the strategy used.
pub fn edit_document(
    document: &str,
    path: &[PathStep],
    shape: &FieldShape,
    input: &str,
    options: &EditOptions,
) -> Result<EditOutcome, EditError> {
    let mut root = parse_document(document)?;
    let new_value = parse_input(input, shape, options)?;
    let strategy = edit_value(&mut root, path, shape, new_value)?;
    tracing::debug!(
        pointer = %format_json_pointer(path),
        strategy = strategy.as_str(),
        "applied node edit"
    );
    let document = format_document(&root, options)?;
    Ok(EditOutcome { document, strategy })
}

/// Apply an edit with explicit options and return the new document text.
pub fn apply_edit_with(
    document: &str,
    path: &[PathStep],
    shape: &FieldShape,
    input: &str,
    options: &EditOptions,
) -> Result<String, EditError> {
    edit_document(document, path, shape, input, options).map(|outcome| outcome.document)
}

/// Apply an edit with default options.
///
/// # Example
///
/// ```
/// use json_node_edit::field_shape::FieldShape;
/// use json_node_edit::node_edit::apply_edit;
/// use json_node_path::PathStep;
/// use serde_json::json;
///
/// let out = apply_edit(r#"{"a":{"x":1}}"#, &[PathStep::from("a")], &FieldShape::scalar(json!({"x": 1})), "42").unwrap();
/// assert_eq!(serde_json::from_str::<serde_json::Value>(&out).unwrap(), json!({"a": 42}));
/// ```
pub fn apply_edit(document: &str, path: &[PathStep], shape: &FieldShape, input: &str) -> Result<String, EditError> {
    apply_edit_with(document, path, shape, input, &EditOptions::default())
}

// ── Tests ─────────────────────────────────────────────────────────────────
