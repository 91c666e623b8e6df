//! Type definitions for node paths.

/// A step in a node path.
///
/// Either an object key or an array index. The graph's own traversal produces
/// paths with both kinds; pointer strings only carry text, so
/// [`parse_json_pointer`](crate::parse_json_pointer) turns canonical integers
/// into [`PathStep::Index`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathStep {
    Key(String),
    Index(usize),
}

/// A node path. Empty means the document root.
pub type Path = Vec<PathStep>;

impl PathStep {
    /// Index this step addresses when applied to an array.
    ///
    /// A `Key` step counts only when it is a canonical non-negative integer
    /// (see [`is_valid_index`](crate::is_valid_index)).
    pub fn as_index(&self) -> Option<usize> {
        match self {
            PathStep::Index(idx) => Some(*idx),
            PathStep::Key(key) => {
                if crate::is_valid_index(key) {
                    key.parse().ok()
                } else {
                    None
                }
            }
        }
    }

    /// Key this step addresses when applied to an object.
    pub fn to_key(&self) -> String {
        match self {
            PathStep::Key(key) => key.clone(),
            PathStep::Index(idx) => idx.to_string(),
        }
    }
}

impl From<&str> for PathStep {
    fn from(key: &str) -> Self {
        PathStep::Key(key.to_string())
    }
}
