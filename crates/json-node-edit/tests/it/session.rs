use std::cell::RefCell;
use std::rc::Rc;

use json_node_edit::editor::{DocumentStore, EditorSession, GraphView, MemoryStore, NodeSelection, TextEditorView};
use json_node_edit::field_shape::FieldShape;
use json_node_edit::node_edit::{EditError, EditStrategy};
use json_node_edit::sync_channel::{PublishReport, SubscriberError, SyncChannel};
use json_node_path::PathStep;
use serde_json::json;

/// Store whose text is visible to subscribers while a publish is running.
#[derive(Clone, Default)]
struct SharedStore(Rc<RefCell<String>>);

impl DocumentStore for SharedStore {
    fn document(&self) -> String {
        self.0.borrow().clone()
    }

    fn set_document(&mut self, document: String) {
        *self.0.borrow_mut() = document;
    }
}

fn key(k: &str) -> PathStep {
    PathStep::from(k)
}

fn delivered(delivered: usize, failed: usize) -> Option<PublishReport> {
    Some(PublishReport {
        delivered,
        failed,
        superseded: false,
    })
}

#[test]
fn save_updates_every_mounted_view() {
    let channel = SyncChannel::new();
    let text = TextEditorView::new(r#"{"a":1}"#);
    let graph = GraphView::new();
    let _text_sub = text.mount(&channel);
    let _graph_sub = graph.mount(&channel);

    let mut session = EditorSession::new(MemoryStore::new(r#"{"a":1}"#)).with_channel(channel);
    let selection = session.select(vec![key("a")]).unwrap();
    let out = session.save(&selection, "2").unwrap();

    assert_eq!(out.report, delivered(2, 0));
    assert_eq!(text.text(), out.document);
    assert_eq!(text.set_count(), 1);
    assert_eq!(graph.value(), Some(json!({"a": 2})));
}

#[test]
fn store_is_written_before_broadcast() {
    let store = SharedStore::default();
    let observed = Rc::new(RefCell::new(Vec::new()));
    let channel = SyncChannel::new();
    let reader = store.clone();
    let seen = Rc::clone(&observed);
    let _sub = channel.subscribe(move |document| {
        seen.borrow_mut().push(reader.document() == document);
        Ok(())
    });

    let mut session = EditorSession::new(store).with_channel(channel);
    session.load(r#"{"n":0}"#).unwrap();
    let selection = session.select(vec![key("n")]).unwrap();
    session.save(&selection, "1").unwrap();
    assert_eq!(*observed.borrow(), vec![true, true]);
}

#[test]
fn failed_save_neither_writes_nor_publishes() {
    let channel = SyncChannel::new();
    let calls = Rc::new(RefCell::new(0));
    let counted = Rc::clone(&calls);
    let _sub = channel.subscribe(move |_| {
        *counted.borrow_mut() += 1;
        Ok(())
    });
    let original = r#"{"a":{"x":1}}"#;
    let mut session = EditorSession::new(MemoryStore::new(original)).with_channel(channel);

    let selection = session.select(vec![key("a")]).unwrap();
    let err = session.save(&selection, "{not json").unwrap_err();
    assert!(matches!(err, EditError::InvalidJsonInput(_)));

    let stale = NodeSelection::new(vec![key("b"), key("c")], FieldShape::scalar(json!(0)));
    assert!(matches!(session.save(&stale, "1"), Err(EditError::UnresolvedPath(_))));

    assert_eq!(session.document(), original);
    assert_eq!(*calls.borrow(), 0);
}

#[test]
fn originating_view_does_not_reset() {
    let channel = SyncChannel::new();
    let text = TextEditorView::new("");
    let _sub = text.mount(&channel);
    let mut session = EditorSession::new(MemoryStore::default()).with_channel(channel);

    session.load(r#"{"a":1}"#).unwrap();
    assert_eq!(text.set_count(), 1);
    // the text editor saves its own buffer back: nothing changes for it
    session.load(text.text()).unwrap();
    assert_eq!(text.set_count(), 1);
}

#[test]
fn graph_view_ignores_reformatting() {
    let channel = SyncChannel::new();
    let graph = GraphView::new();
    let _sub = graph.mount(&channel);
    let mut session = EditorSession::new(MemoryStore::default()).with_channel(channel);

    session.load(r#"{"a":[1,2]}"#).unwrap();
    session.load("{\n  \"a\": [1, 2]\n}").unwrap();
    assert_eq!(graph.render_count(), 1);
}

#[test]
fn failing_subscriber_does_not_block_others() {
    let channel = SyncChannel::new();
    let _bad = channel.subscribe(|_| Err(SubscriberError::Rejected("read-only view".into())));
    let text = TextEditorView::new("");
    let _text = text.mount(&channel);
    let mut session = EditorSession::new(MemoryStore::new(r#"{"a":{"x":1}}"#)).with_channel(channel);

    let selection = session.select(vec![key("a")]).unwrap();
    let out = session.save(&selection, r#"{"y":2}"#).unwrap();
    assert_eq!(out.strategy, EditStrategy::Merge);
    assert_eq!(out.report, delivered(1, 1));
    assert_eq!(session.document(), out.document);
    assert_eq!(text.text(), out.document);
}

#[test]
fn unmounted_view_stops_following() {
    let channel = SyncChannel::new();
    let text = TextEditorView::new("");
    let sub = text.mount(&channel);
    let mut session = EditorSession::new(MemoryStore::default()).with_channel(channel.clone());

    session.load("[1]").unwrap();
    sub.unsubscribe();
    assert_eq!(channel.subscriber_count(), 0);
    session.load("[2]").unwrap();
    assert_eq!(text.text(), "[1]");
}

#[test]
fn field_rename_through_session() {
    let mut session = EditorSession::new(MemoryStore::new(r#"{"cfg":{"a":1,"old":2}}"#));
    let document = session.document();
    let selection = NodeSelection::select_field(&document, vec![key("cfg"), key("old")]).unwrap();
    assert_eq!(selection.edit_text(), "2");
    let out = session.save(&selection, r#"{"new":2}"#).unwrap();
    assert_eq!(
        out.strategy,
        EditStrategy::Rename {
            from: "old".into(),
            to: "new".into()
        }
    );
    let value: serde_json::Value = serde_json::from_str(&session.document()).unwrap();
    assert_eq!(value, json!({"cfg": {"a": 1, "new": 2}}));
}

#[test]
fn view_after_republishing_subscriber_holds_latest() {
    let channel = SyncChannel::new();
    let handle = channel.clone();
    let _normalize = channel.subscribe(move |document| {
        if document == "v1" {
            handle.publish("v2");
        }
        Ok(())
    });
    let text = TextEditorView::new("");
    let _text = text.mount(&channel);

    channel.publish("v1");
    assert_eq!(text.text(), "v2");
    assert_eq!(text.set_count(), 1);
}
