use json_node_edit::editor::NodeSelection;
use json_node_edit::field_shape::FieldShape;
use json_node_edit::node_edit::{apply_edit, edit_document, EditError, EditOptions, EditStrategy};
use json_node_path::{parse_json_pointer, PathError, PathStep};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

fn path(pointer: &str) -> Vec<PathStep> {
    parse_json_pointer(pointer).unwrap()
}

fn parsed(text: &str) -> Value {
    serde_json::from_str(text).unwrap()
}

/// Select the node the way the graph does and save `input` into it.
fn save(document: &str, pointer: &str, input: &str) -> Result<String, EditError> {
    let selection = NodeSelection::select(document, path(pointer))?;
    apply_edit(document, &selection.path, &selection.shape, input)
}

#[test]
fn editing_a_nested_scalar() {
    let doc = r#"{"user":{"name":"ann","age":30},"tags":["a","b"]}"#;
    let out = save(doc, "/user/age", "31").unwrap();
    assert_eq!(
        parsed(&out),
        json!({"user": {"name": "ann", "age": 31}, "tags": ["a", "b"]})
    );
}

#[test]
fn typed_word_on_string_field_is_stored_as_string() {
    let doc = r#"{"user":{"name":"ann"}}"#;
    let out = save(doc, "/user/name", "bob").unwrap();
    assert_eq!(parsed(&out), json!({"user": {"name": "bob"}}));
}

#[test]
fn object_node_edit_merges_into_existing_fields() {
    let doc = r#"{"user":{"name":"ann","age":30}}"#;
    let out = save(doc, "/user", r#"{"age":31,"admin":true}"#).unwrap();
    let value = parsed(&out);
    assert_eq!(value, json!({"user": {"name": "ann", "age": 31, "admin": true}}));
    let keys: Vec<&String> = value["user"].as_object().unwrap().keys().collect();
    assert_eq!(keys, ["name", "age", "admin"]);
}

#[test]
fn single_field_row_renamed_in_place() {
    let doc = r#"{"cfg":{"first":1,"old":2,"last":3}}"#;
    let shape = FieldShape::fields([("old", json!(2))]);
    let out = edit_document(doc, &path("/cfg/old"), &shape, r#"{"new":2}"#, &EditOptions::default()).unwrap();
    assert_eq!(
        out.strategy,
        EditStrategy::Rename {
            from: "old".into(),
            to: "new".into()
        }
    );
    let value = parsed(&out.document);
    let keys: Vec<&String> = value["cfg"].as_object().unwrap().keys().collect();
    assert_eq!(keys, ["first", "new", "last"]);
}

#[test]
fn multi_key_object_into_single_field_replaces() {
    let doc = r#"{"cfg":{"old":2}}"#;
    let shape = FieldShape::fields([("old", json!(2))]);
    let out = edit_document(doc, &path("/cfg/old"), &shape, r#"{"a":1,"b":2}"#, &EditOptions::default()).unwrap();
    assert_eq!(out.strategy, EditStrategy::Replace);
    assert_eq!(parsed(&out.document), json!({"cfg": {"old": {"a": 1, "b": 2}}}));
}

#[test]
fn root_edit_with_derived_shape() {
    let out = save(r#"{"a":1}"#, "", r#"{"b":2}"#).unwrap();
    assert_eq!(parsed(&out), json!({"a": 1, "b": 2}));
    let out = save("[1,2]", "", "[3]").unwrap();
    assert_eq!(parsed(&out), json!([3]));
}

#[test]
fn array_elements_by_pointer() {
    let doc = r#"{"xs":[{"id":1},{"id":2}]}"#;
    let out = save(doc, "/xs/1", r#"{"name":"two"}"#).unwrap();
    assert_eq!(parsed(&out), json!({"xs": [{"id": 1}, {"id": 2, "name": "two"}]}));
}

#[test]
fn escaped_pointer_keys() {
    let doc = r#"{"a/b":{"c~d":1}}"#;
    let out = save(doc, "/a~1b/c~0d", "2").unwrap();
    assert_eq!(parsed(&out), json!({"a/b": {"c~d": 2}}));
}

#[test]
fn missing_node_is_reported_with_depth() {
    let err = save(r#"{"a":{}}"#, "/a/b/c", "1").unwrap_err();
    assert!(matches!(err, EditError::UnresolvedPath(PathError::Unresolved { depth: 1 })));
}

#[test]
fn stale_selection_fails_without_partial_write() {
    let doc = r#"{"a":1}"#;
    let shape = FieldShape::scalar(json!(1));
    let err = apply_edit(doc, &path("/gone/x"), &shape, "2").unwrap_err();
    assert!(matches!(err, EditError::UnresolvedPath(_)));
}

#[test]
fn invalid_input_on_object_node() {
    let err = save(r#"{"a":{"x":1}}"#, "/a", "{x:").unwrap_err();
    assert!(matches!(err, EditError::InvalidJsonInput(_)));
}

#[test]
fn output_parses_and_uses_two_space_indent() {
    let out = save(r#"{"a":{"b":1}}"#, "/a/b", "2").unwrap();
    assert_eq!(out, "{\n  \"a\": {\n    \"b\": 2\n  }\n}");
}

fn key() -> impl Strategy<Value = String> {
    "[a-z]{1,6}"
}

proptest! {
    #[test]
    fn replace_is_idempotent(k in key(), v in any::<i64>(), other in any::<i64>()) {
        let doc = json!({"keep": other, k.clone(): 0}).to_string();
        let p = vec![PathStep::Key(k)];
        let shape = FieldShape::scalar(json!(0));
        let once = apply_edit(&doc, &p, &shape, &v.to_string()).unwrap();
        let twice = apply_edit(&once, &p, &shape, &v.to_string()).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn merge_keeps_untouched_fields(
        existing in prop::collection::btree_map(key(), any::<i32>(), 1..6),
        incoming in prop::collection::btree_map(key(), any::<i32>(), 1..6),
    ) {
        let node: Map<String, Value> = existing.iter().map(|(k, v)| (k.clone(), json!(v))).collect();
        let doc = json!({"node": node}).to_string();
        let selection = NodeSelection::select(&doc, path("/node")).unwrap();
        let input = serde_json::to_string(&incoming).unwrap();
        let out = apply_edit(&doc, &selection.path, &selection.shape, &input).unwrap();
        let merged = parsed(&out);
        for (k, v) in &existing {
            let expected = incoming.get(k).unwrap_or(v);
            prop_assert_eq!(&merged["node"][k.as_str()], &json!(expected));
        }
        for (k, v) in &incoming {
            prop_assert_eq!(&merged["node"][k.as_str()], &json!(v));
        }
    }
}
