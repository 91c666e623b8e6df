//! What the node modal displayed for one graph node.
//!
//! A graph node is shown as rows. A scalar leaf is a single row without a key;
//! an object node is one keyed row per field. The edit engine reads the shape
//! to infer intent: literal-string fallback only for scalar leaves, merge only
//! for keyed rows, rename only for a single keyed row.

use serde_json::{Map, Value};

/// Display type of a row value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Null,
    Array,
    Object,
}

impl FieldType {
    pub fn of(val: &Value) -> Self {
        match val {
            Value::String(_) => FieldType::String,
            Value::Number(_) => FieldType::Number,
            Value::Bool(_) => FieldType::Boolean,
            Value::Null => FieldType::Null,
            Value::Array(_) => FieldType::Array,
            Value::Object(_) => FieldType::Object,
        }
    }
}

/// One displayed row: optional key, the value, and its type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRow {
    pub key: Option<String>,
    pub value: Value,
    pub field_type: FieldType,
}

impl FieldRow {
    pub fn keyed(key: impl Into<String>, value: Value) -> Self {
        let field_type = FieldType::of(&value);
        Self {
            key: Some(key.into()),
            value,
            field_type,
        }
    }

    pub fn unkeyed(value: Value) -> Self {
        let field_type = FieldType::of(&value);
        Self {
            key: None,
            value,
            field_type,
        }
    }
}

/// Ordered rows shown for a node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldShape {
    rows: Vec<FieldRow>,
}

impl FieldShape {
    pub fn new(rows: Vec<FieldRow>) -> Self {
        Self { rows }
    }

    /// Shape of a scalar leaf: one unkeyed row.
    pub fn scalar(value: Value) -> Self {
        Self::new(vec![FieldRow::unkeyed(value)])
    }

    /// Shape of an object node, one keyed row per field.
    pub fn fields<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self::new(
            fields
                .into_iter()
                .map(|(key, value)| FieldRow::keyed(key, value))
                .collect(),
        )
    }

    /// Shape the graph shows for `value`.
    ///
    /// Objects produce keyed rows in map order; anything else is a single
    /// unkeyed row.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self::fields(map.iter().map(|(k, v)| (k.as_str(), v.clone()))),
            other => Self::scalar(other.clone()),
        }
    }

    pub fn rows(&self) -> &[FieldRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Exactly one row and it has no key.
    pub fn is_scalar_leaf(&self) -> bool {
        matches!(self.rows.as_slice(), [row] if row.key.is_none())
    }

    pub fn keyed_count(&self) -> usize {
        self.rows.iter().filter(|row| row.key.is_some()).count()
    }

    pub fn has_keyed_rows(&self) -> bool {
        self.rows.iter().any(|row| row.key.is_some())
    }

    /// The row if the shape is exactly one keyed row.
    pub fn single_keyed_row(&self) -> Option<&FieldRow> {
        match self.rows.as_slice() {
            [row] if row.key.is_some() => Some(row),
            _ => None,
        }
    }

    /// Value the modal pre-fills for editing.
    ///
    /// A scalar leaf shows its value; keyed rows are folded back into an
    /// object. Unkeyed rows in a mixed shape are not shown.
    pub fn edit_value(&self) -> Value {
        if let [row] = self.rows.as_slice() {
            if row.key.is_none() {
                return row.value.clone();
            }
        }
        let mut map = Map::new();
        for row in &self.rows {
            if let Some(key) = &row.key {
                map.insert(key.clone(), row.value.clone());
            }
        }
        Value::Object(map)
    }

    /// Pretty-printed [`edit_value`](Self::edit_value).
    pub fn edit_text(&self) -> String {
        serde_json::to_string_pretty(&self.edit_value()).unwrap_or_default()
    }
}
