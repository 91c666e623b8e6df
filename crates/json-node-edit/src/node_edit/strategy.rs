//! Merge / rename / replace selection.
//!
//! Precedence: merge, then rename, then replace. The decision only reads
//! facts; writing happens in `apply`.

use serde_json::Value;

use super::types::{ContainerKind, EditFacts, EditStrategy};

/// Choose how to write `facts.new_value`.
///
/// - Merge: the node showed keyed rows and both the current target and the
///   new value are objects.
/// - Rename: the node showed exactly one keyed row, the new value is an
///   object with one key, that key differs from the row's key, and the field
///   lives in an object.
/// - Replace: everything else, including a multi-key object typed into a
///   single-field node.
pub fn decide_strategy(facts: &EditFacts<'_>) -> EditStrategy {
    if is_merge(facts) {
        return EditStrategy::Merge;
    }
    if let Some(strategy) = rename(facts) {
        return strategy;
    }
    EditStrategy::Replace
}

fn is_merge(facts: &EditFacts<'_>) -> bool {
    facts.shape.has_keyed_rows()
        && matches!(facts.existing, Some(Value::Object(_)))
        && facts.new_value.is_object()
}

fn rename(facts: &EditFacts<'_>) -> Option<EditStrategy> {
    if facts.container != ContainerKind::Object {
        return None;
    }
    let row_key = facts.shape.single_keyed_row()?.key.as_deref()?;
    let new_map = facts.new_value.as_object()?;
    if new_map.len() != 1 {
        return None;
    }
    let (to, _) = new_map.iter().next()?;
    if to == row_key {
        return None;
    }
    let from = facts.final_key?.to_key();
    Some(EditStrategy::Rename {
        from,
        to: to.clone(),
    })
}
