use serde_json::Value;

use crate::types::PathStep;
use crate::PathError;

/// Apply one step to a container value.
///
/// Arrays accept any step that reads as an index; objects accept any step
/// and look it up by its key form. Scalars resolve nothing.
pub fn step<'a>(val: &'a Value, path_step: &PathStep) -> Option<&'a Value> {
    match val {
        Value::Array(arr) => arr.get(path_step.as_index()?),
        Value::Object(map) => match path_step {
            PathStep::Key(key) => map.get(key.as_str()),
            PathStep::Index(idx) => map.get(idx.to_string().as_str()),
        },
        _ => None,
    }
}

/// Mutable counterpart of [`step`].
pub fn step_mut<'a>(val: &'a mut Value, path_step: &PathStep) -> Option<&'a mut Value> {
    match val {
        Value::Array(arr) => {
            let idx = path_step.as_index()?;
            arr.get_mut(idx)
        }
        Value::Object(map) => match path_step {
            PathStep::Key(key) => map.get_mut(key.as_str()),
            PathStep::Index(idx) => map.get_mut(idx.to_string().as_str()),
        },
        _ => None,
    }
}

/// Get a value from a JSON document by path.
///
/// Returns `None` if any step does not resolve.
pub fn get<'a>(val: &'a Value, path: &[PathStep]) -> Option<&'a Value> {
    let mut current = val;
    for path_step in path {
        current = step(current, path_step)?;
    }
    Some(current)
}

/// Like [`get`], but reports which step failed.
///
/// # Errors
///
/// [`PathError::Unresolved`] with the zero-based depth of the first step that
/// could not be applied.
pub fn try_get<'a>(val: &'a Value, path: &[PathStep]) -> Result<&'a Value, PathError> {
    let mut current = val;
    for (depth, path_step) in path.iter().enumerate() {
        current = step(current, path_step).ok_or(PathError::Unresolved { depth })?;
    }
    Ok(current)
}

/// Walk all but the last step and return the parent container with the final
/// step.
///
/// The returned parent is always an object or an array. The final step itself
/// is not checked against the parent; callers decide whether a missing final
/// key means insert or fail.
///
/// # Errors
///
/// - [`PathError::NoParent`] for the root path
/// - [`PathError::Unresolved`] when an intermediate step is missing or the
///   parent is a scalar
///
/// # Example
///
/// ```
/// use json_node_path::{find_parent_mut, PathStep};
/// use serde_json::json;
///
/// let mut doc = json!({"a": {"x": 1}});
/// let path = vec![PathStep::from("a"), PathStep::from("x")];
/// let (parent, key) = find_parent_mut(&mut doc, &path).unwrap();
/// assert!(parent.is_object());
/// assert_eq!(key, &PathStep::from("x"));
/// ```
pub fn find_parent_mut<'a, 'p>(
    doc: &'a mut Value,
    path: &'p [PathStep],
) -> Result<(&'a mut Value, &'p PathStep), PathError> {
    let (last, init) = path.split_last().ok_or(PathError::NoParent)?;
    let mut current = doc;
    for (depth, path_step) in init.iter().enumerate() {
        current = step_mut(current, path_step).ok_or(PathError::Unresolved { depth })?;
    }
    if !(current.is_object() || current.is_array()) {
        return Err(PathError::Unresolved { depth: init.len() });
    }
    Ok((current, last))
}
