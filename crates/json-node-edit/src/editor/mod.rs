//! Editor session: the authoritative document, the node edit entry point and
//! the change broadcast, wired together.
//!
//! [`EditorSession::save`] is the only way a node edit reaches the store. It
//! either updates the store and then publishes the new document, or returns an
//! error and does neither.

pub mod view;

use json_node_path::{try_get, Path, PathError};

use crate::field_shape::FieldShape;
use crate::node_edit::{edit_document, parse_document, EditError, EditOptions, EditStrategy};
use crate::sync_channel::{PublishReport, SyncChannel};

pub use view::{GraphView, TextEditorView};

/// Holder of the authoritative document text.
pub trait DocumentStore {
    fn document(&self) -> String;
    fn set_document(&mut self, document: String);
}

/// In-memory [`DocumentStore`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    document: String,
}

impl MemoryStore {
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            document: document.into(),
        }
    }
}

impl DocumentStore for MemoryStore {
    fn document(&self) -> String {
        self.document.clone()
    }

    fn set_document(&mut self, document: String) {
        self.document = document;
    }
}

/// What was clicked in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionKind {
    /// A whole node; the modal shows the node's rows.
    #[default]
    Node,
    /// One field row of its parent; the modal shows the field's value and a
    /// one-key object typed in renames it.
    Field,
}

/// The selected graph node: where it is and what the modal showed for it.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSelection {
    pub path: Path,
    pub shape: FieldShape,
    pub kind: SelectionKind,
}

impl NodeSelection {
    pub fn new(path: Path, shape: FieldShape) -> Self {
        Self {
            path,
            shape,
            kind: SelectionKind::Node,
        }
    }

    /// Select the node at `path`, deriving its shape from the current value.
    pub fn select(document: &str, path: Path) -> Result<Self, EditError> {
        let root = parse_document(document)?;
        let shape = FieldShape::of(try_get(&root, &path)?);
        Ok(Self::new(path, shape))
    }

    /// Select one field row: the value at `path` shown as a single keyed row
    /// named after the last step.
    pub fn select_field(document: &str, path: Path) -> Result<Self, EditError> {
        let root = parse_document(document)?;
        let (last, _) = path.split_last().ok_or(PathError::NoParent)?;
        let value = try_get(&root, &path)?.clone();
        let shape = FieldShape::fields([(last.to_key(), value)]);
        Ok(Self {
            path,
            shape,
            kind: SelectionKind::Field,
        })
    }

    /// Text the modal pre-fills. Saving it unchanged leaves the document as is.
    pub fn edit_text(&self) -> String {
        match (self.kind, self.shape.single_keyed_row()) {
            (SelectionKind::Field, Some(row)) => {
                serde_json::to_string_pretty(&row.value).unwrap_or_default()
            }
            _ => self.shape.edit_text(),
        }
    }
}

/// Result of a successful [`EditorSession::save`].
#[derive(Debug, Clone, PartialEq)]
pub struct SaveOutcome {
    pub document: String,
    pub strategy: EditStrategy,
    /// `None` when no channel is attached.
    pub report: Option<PublishReport>,
}

/// Store, edit options and an optional broadcast channel.
#[derive(Debug)]
pub struct EditorSession<S: DocumentStore = MemoryStore> {
    store: S,
    options: EditOptions,
    channel: Option<SyncChannel>,
}

impl<S: DocumentStore> EditorSession<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            options: EditOptions::default(),
            channel: None,
        }
    }

    pub fn with_channel(mut self, channel: SyncChannel) -> Self {
        self.channel = Some(channel);
        self
    }

    pub fn with_options(mut self, options: EditOptions) -> Self {
        self.options = options;
        self
    }

    pub fn channel(&self) -> Option<&SyncChannel> {
        self.channel.as_ref()
    }

    pub fn options(&self) -> &EditOptions {
        &self.options
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn document(&self) -> String {
        self.store.document()
    }

    /// Select a node of the current document.
    pub fn select(&self, path: Path) -> Result<NodeSelection, EditError> {
        NodeSelection::select(&self.store.document(), path)
    }

    /// Replace the whole document, e.g. from the text editor, and broadcast it.
    ///
    /// The text is stored as given; it only has to parse.
    pub fn load(&mut self, document: impl Into<String>) -> Result<Option<PublishReport>, EditError> {
        let document = document.into();
        parse_document(&document)?;
        self.store.set_document(document.clone());
        tracing::info!(bytes = document.len(), "loaded document");
        Ok(self.broadcast(&document))
    }

    /// Apply `input` to the selected node.
    ///
    /// On success the store is written before the broadcast goes out. On error
    /// the store is untouched and nothing is published.
    pub fn save(&mut self, selection: &NodeSelection, input: &str) -> Result<SaveOutcome, EditError> {
        let current = self.store.document();
        let outcome = match edit_document(&current, &selection.path, &selection.shape, input, &self.options) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::info!(error = %err, "node edit rejected");
                return Err(err);
            }
        };
        self.store.set_document(outcome.document.clone());
        tracing::info!(strategy = outcome.strategy.as_str(), "saved node edit");
        let report = self.broadcast(&outcome.document);
        Ok(SaveOutcome {
            document: outcome.document,
            strategy: outcome.strategy,
            report,
        })
    }

    fn broadcast(&self, document: &str) -> Option<PublishReport> {
        self.channel.as_ref().map(|channel| channel.publish(document))
    }
}
