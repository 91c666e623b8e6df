//! Typed node paths for JSON documents.
//!
//! A node path is the address of one graph node inside a document: an ordered
//! list of object keys and array indices. Paths convert to and from
//! [JSON Pointer (RFC 6901)](https://tools.ietf.org/html/rfc6901) strings and
//! drive checked traversal, where every step verifies that it is applied to a
//! container.
//!
//! # Example
//!
//! ```
//! use json_node_path::{format_json_pointer, get, parse_json_pointer, PathStep};
//!
//! let path = parse_json_pointer("/foo/0").unwrap();
//! assert_eq!(path, vec![PathStep::from("foo"), PathStep::Index(0)]);
//! assert_eq!(format_json_pointer(&path), "/foo/0");
//!
//! let doc = serde_json::json!({"foo": [42]});
//! assert_eq!(get(&doc, &path), Some(&serde_json::json!(42)));
//! ```

use thiserror::Error;

pub mod types;
pub use types::{Path, PathStep};

pub mod validate;
pub use validate::{validate_json_pointer, validate_path};

mod get;
pub use get::{find_parent_mut, get, step, step_mut, try_get};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("POINTER_INVALID")]
    PointerInvalid,
    #[error("POINTER_TOO_LONG")]
    PointerTooLong,
    #[error("PATH_TOO_LONG")]
    PathTooLong,
    #[error("UNRESOLVED at step {depth}")]
    Unresolved { depth: usize },
    #[error("NO_PARENT")]
    NoParent,
}

/// Unescapes a JSON Pointer path component.
///
/// Per RFC 6901, `~1` is replaced with `/` and `~0` is replaced with `~`.
///
/// # Example
///
/// ```
/// use json_node_path::unescape_component;
///
/// assert_eq!(unescape_component("a~0b"), "a~b");
/// assert_eq!(unescape_component("c~1d"), "c/d");
/// ```
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    // ~1 before ~0, so "~01" stays "~1"
    component.replace("~1", "/").replace("~0", "~")
}

/// Escapes a JSON Pointer path component.
///
/// # Example
///
/// ```
/// use json_node_path::escape_component;
///
/// assert_eq!(escape_component("a~b"), "a~0b");
/// assert_eq!(escape_component("c/d"), "c~1d");
/// ```
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    component.replace('~', "~0").replace('/', "~1")
}

/// Parse a JSON Pointer string into a path.
///
/// Canonical non-negative integers become [`PathStep::Index`], everything else
/// becomes [`PathStep::Key`]. Traversal treats the two leniently, so a numeric
/// object key such as `/items/0` on `{"items": {"0": ..}}` still resolves.
///
/// # Errors
///
/// See [`validate_json_pointer`].
///
/// # Example
///
/// ```
/// use json_node_path::{parse_json_pointer, PathStep};
///
/// assert_eq!(parse_json_pointer("").unwrap(), Vec::<PathStep>::new());
/// assert_eq!(parse_json_pointer("/").unwrap(), vec![PathStep::from("")]);
/// assert_eq!(
///     parse_json_pointer("/a~1b/01/1").unwrap(),
///     vec![PathStep::from("a/b"), PathStep::from("01"), PathStep::Index(1)]
/// );
/// ```
pub fn parse_json_pointer(pointer: &str) -> Result<Path, PathError> {
    validate_json_pointer(pointer)?;
    if pointer.is_empty() {
        return Ok(Vec::new());
    }
    let path: Path = pointer[1..]
        .split('/')
        .map(|component| {
            let key = unescape_component(component);
            if is_valid_index(&key) {
                if let Ok(idx) = key.parse() {
                    return PathStep::Index(idx);
                }
            }
            PathStep::Key(key)
        })
        .collect();
    validate_path(&path)?;
    Ok(path)
}

/// Format a path into a JSON Pointer string.
///
/// Returns an empty string for the root path.
pub fn format_json_pointer(path: &[PathStep]) -> String {
    let mut out = String::new();
    for path_step in path {
        out.push('/');
        match path_step {
            PathStep::Key(key) => out.push_str(&escape_component(key)),
            PathStep::Index(idx) => out.push_str(&idx.to_string()),
        }
    }
    out
}

/// Check if a string represents a valid non-negative integer array index.
///
/// Leading zeros are rejected, as RFC 6901 requires.
///
/// # Example
///
/// ```
/// use json_node_path::is_valid_index;
///
/// assert!(is_valid_index("0"));
/// assert!(is_valid_index("123"));
/// assert!(!is_valid_index("-1"));
/// assert!(!is_valid_index("01"));
/// ```
pub fn is_valid_index(index: &str) -> bool {
    if index.is_empty() {
        return false;
    }
    let bytes = index.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|&b| b.is_ascii_digit())
}
