//! Views that follow the document through a [`SyncChannel`].
//!
//! Both views skip a broadcast that matches what they already show, so a view
//! that caused an edit does not reset its own buffer.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;

use crate::node_edit::parse_document;
use crate::sync_channel::{SubscriberError, Subscription, SyncChannel};

#[derive(Debug, Default)]
struct TextState {
    buffer: String,
    sets: usize,
}

/// Text editor pane: compares documents as text.
#[derive(Debug, Clone, Default)]
pub struct TextEditorView {
    state: Rc<RefCell<TextState>>,
}

impl TextEditorView {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            state: Rc::new(RefCell::new(TextState {
                buffer: text.into(),
                sets: 0,
            })),
        }
    }

    /// Subscribe this view to `channel`. Keep the subscription alive for as
    /// long as the view is mounted.
    pub fn mount(&self, channel: &SyncChannel) -> Subscription {
        let view = self.clone();
        channel.subscribe(move |document| {
            view.reconcile(document);
            Ok(())
        })
    }

    /// Take `document` unless the buffer already holds it. Returns whether the
    /// buffer was re-set.
    pub fn reconcile(&self, document: &str) -> bool {
        let mut state = self.state.borrow_mut();
        if state.buffer == document {
            return false;
        }
        state.buffer = document.to_string();
        state.sets += 1;
        true
    }

    /// Local typing; not broadcast.
    pub fn type_text(&self, text: impl Into<String>) {
        self.state.borrow_mut().buffer = text.into();
    }

    pub fn text(&self) -> String {
        self.state.borrow().buffer.clone()
    }

    /// How many broadcasts actually changed the buffer.
    pub fn set_count(&self) -> usize {
        self.state.borrow().sets
    }
}

#[derive(Debug, Default)]
struct GraphState {
    value: Option<Value>,
    renders: usize,
}

/// Graph pane: compares parsed values, so formatting-only changes do not
/// re-render.
#[derive(Debug, Clone, Default)]
pub struct GraphView {
    state: Rc<RefCell<GraphState>>,
}

impl GraphView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mount(&self, channel: &SyncChannel) -> Subscription {
        let view = self.clone();
        channel.subscribe(move |document| view.reconcile(document).map(|_| ()))
    }

    /// Parse and take `document` unless it equals the shown value.
    ///
    /// # Errors
    ///
    /// [`SubscriberError::Rejected`] if the text is not JSON; the shown value
    /// is kept.
    pub fn reconcile(&self, document: &str) -> Result<bool, SubscriberError> {
        let value = parse_document(document).map_err(|e| SubscriberError::Rejected(e.to_string()))?;
        let mut state = self.state.borrow_mut();
        if state.value.as_ref() == Some(&value) {
            return Ok(false);
        }
        state.value = Some(value);
        state.renders += 1;
        Ok(true)
    }

    pub fn value(&self) -> Option<Value> {
        self.state.borrow().value.clone()
    }

    pub fn render_count(&self) -> usize {
        self.state.borrow().renders
    }
}
