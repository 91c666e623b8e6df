//! Document change broadcast between editor views.
//!
//! A [`SyncChannel`] delivers the latest document text to every subscribed
//! view, synchronously and in registration order. It carries state, not
//! events: a view that already holds the published text is expected to do
//! nothing.
//!
//! Each delivery is isolated. A subscriber that returns an error or panics is
//! logged and counted, and delivery continues with the next one.
//!
//! A publish issued while another one is still delivering supersedes it: the
//! older publish stops, so no subscriber sees an older document after a newer
//! one.
//!
//! The channel is single-threaded (`Rc`/`RefCell`) and is passed explicitly to
//! whoever needs it; there is no global instance.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::{Rc, Weak};

use thiserror::Error;

/// Name used when none is given.
pub const DEFAULT_CHANNEL_NAME: &str = "document-changed";

pub type SubscriberId = u64;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriberError {
    #[error("REJECTED: {0}")]
    Rejected(String),
    #[error("PANICKED: {0}")]
    Panicked(String),
    /// Reached again by a publish issued from its own callback.
    #[error("REENTRANT")]
    Reentrant,
}

type Callback = Rc<RefCell<dyn FnMut(&str) -> Result<(), SubscriberError>>>;

#[derive(Clone)]
struct Entry {
    id: SubscriberId,
    /// Cleared by the subscription guard, even when the list is borrowed.
    active: Rc<Cell<bool>>,
    callback: Callback,
}

struct Inner {
    name: String,
    next_id: SubscriberId,
    /// Bumped by every publish.
    generation: u64,
    subscribers: Vec<Entry>,
}

impl Inner {
    fn contains(&self, id: SubscriberId) -> bool {
        self.subscribers
            .iter()
            .any(|entry| entry.id == id && entry.active.get())
    }

    fn remove(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|entry| entry.id != id);
        self.subscribers.len() != before
    }

    /// Drop entries whose guard went away while the list was borrowed.
    fn prune(&mut self) {
        self.subscribers.retain(|entry| entry.active.get());
    }
}

/// Outcome of one [`SyncChannel::publish`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishReport {
    pub delivered: usize,
    pub failed: usize,
    /// A newer publish started during delivery and the rest was skipped.
    pub superseded: bool,
}

/// Broadcast handle. Clones share the same subscriber list.
#[derive(Clone)]
pub struct SyncChannel {
    inner: Rc<RefCell<Inner>>,
}

impl Default for SyncChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SyncChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("SyncChannel")
            .field("name", &inner.name)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

impl SyncChannel {
    pub fn new() -> Self {
        Self::named(DEFAULT_CHANNEL_NAME)
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                name: name.into(),
                next_id: 0,
                generation: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    pub fn name(&self) -> String {
        self.inner.borrow().name.clone()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner
            .borrow()
            .subscribers
            .iter()
            .filter(|entry| entry.active.get())
            .count()
    }

    /// Register a subscriber. It stays registered until the returned
    /// [`Subscription`] is dropped or unsubscribed.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&str) -> Result<(), SubscriberError> + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        inner.prune();
        let id = inner.next_id;
        inner.next_id += 1;
        let active = Rc::new(Cell::new(true));
        inner.subscribers.push(Entry {
            id,
            active: Rc::clone(&active),
            callback: Rc::new(RefCell::new(callback)),
        });
        tracing::debug!(channel = %inner.name, subscriber = id, "subscribed");
        Subscription {
            id,
            active,
            channel: Rc::downgrade(&self.inner),
        }
    }

    /// Deliver `document` to every current subscriber, in registration order.
    ///
    /// Subscribers added during delivery first see the next publish; a
    /// subscriber removed during delivery is not called. If a callback
    /// publishes again, the remaining subscribers only get the newer document.
    pub fn publish(&self, document: &str) -> PublishReport {
        let (name, generation, snapshot) = {
            let mut inner = self.inner.borrow_mut();
            inner.prune();
            inner.generation += 1;
            (inner.name.clone(), inner.generation, inner.subscribers.clone())
        };
        let mut report = PublishReport::default();
        for Entry { id, callback, .. } in snapshot {
            let inner = self.inner.borrow();
            if inner.generation != generation {
                report.superseded = true;
                break;
            }
            if !inner.contains(id) {
                continue;
            }
            drop(inner);
            match deliver(&callback, document) {
                Ok(()) => report.delivered += 1,
                Err(err) => {
                    tracing::warn!(channel = %name, subscriber = id, error = %err, "delivery failed");
                    report.failed += 1;
                }
            }
        }
        tracing::debug!(
            channel = %name,
            delivered = report.delivered,
            failed = report.failed,
            superseded = report.superseded,
            bytes = document.len(),
            "published document"
        );
        report
    }
}

fn deliver(callback: &Callback, document: &str) -> Result<(), SubscriberError> {
    let mut callback = callback
        .try_borrow_mut()
        .map_err(|_| SubscriberError::Reentrant)?;
    match catch_unwind(AssertUnwindSafe(|| (*callback)(document))) {
        Ok(result) => result,
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(SubscriberError::Panicked(message))
        }
    }
}

/// Registration guard returned by [`SyncChannel::subscribe`].
///
/// Dropping it removes the subscriber.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriberId,
    active: Rc<Cell<bool>>,
    channel: Weak<RefCell<Inner>>,
}

impl Subscription {
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Whether the subscriber is still registered on a live channel.
    pub fn is_active(&self) -> bool {
        self.active.get() && self.channel.strong_count() > 0
    }

    /// Remove the subscriber now. Same as dropping the guard.
    pub fn unsubscribe(self) {}

    fn detach(&mut self) {
        self.active.set(false);
        let Some(inner) = self.channel.upgrade() else {
            return;
        };
        match inner.try_borrow_mut() {
            Ok(mut inner) => {
                if inner.remove(self.id) {
                    tracing::debug!(channel = %inner.name, subscriber = self.id, "unsubscribed");
                }
            }
            // inactive now; the entry is pruned on the next subscribe or publish
            Err(_) => tracing::warn!(subscriber = self.id, "channel busy, removal deferred"),
        };
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.detach();
    }
}
