//! Change Tracker
//!
//! Subscription registry, dirty-topic accumulator, and deduplicated dispatcher.
//! Mutations only mark topics dirty; nothing runs until the host calls
//! [`ChangeTracker::flush`], at which point every callback attached to a dirty
//! topic runs at most once, after the whole transaction, reading final values.
//!
//! Unknown topics are fail-open: attaching to or marking a topic that was never
//! subscribed is a no-op (with a debug diagnostic), never an error.

mod registry;
mod topic;

pub use topic::{CallbackId, Topic};

use registry::Registry;
use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::{debug, trace};

/// Shared, single-threaded handle to a change registry.
///
/// Cloning the handle shares the registry. The registry is never borrowed
/// while a callback runs, so callbacks may mutate state or register further
/// callbacks during dispatch.
pub struct ChangeTracker<T: Topic> {
    inner: Rc<RefCell<Registry<T>>>,
}

/// Non-owning handle, for callbacks that must reach their own tracker
/// without keeping its registry alive.
pub struct WeakChangeTracker<T: Topic> {
    inner: Weak<RefCell<Registry<T>>>,
}

impl<T: Topic> WeakChangeTracker<T> {
    pub fn upgrade(&self) -> Option<ChangeTracker<T>> {
        self.inner.upgrade().map(|inner| ChangeTracker { inner })
    }
}

impl<T: Topic> Clone for ChangeTracker<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Topic> Default for ChangeTracker<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Topic> fmt::Debug for ChangeTracker<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reg = self.inner.borrow();
        f.debug_struct("ChangeTracker")
            .field("dirty", &reg.dirty())
            .finish_non_exhaustive()
    }
}

impl<T: Topic> ChangeTracker<T> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Registry::default())),
        }
    }

    pub fn downgrade(&self) -> WeakChangeTracker<T> {
        WeakChangeTracker {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Declare a topic. Repeated calls keep the existing callback list.
    pub fn subscribe(&self, topic: T) {
        if self.inner.borrow_mut().subscribe(topic) {
            trace!(topic = ?topic, "Subscribed topic");
        }
    }

    pub fn is_subscribed(&self, topic: T) -> bool {
        self.inner.borrow().is_subscribed(topic)
    }

    /// Store a callback and return its dispatch identity.
    pub fn register<F>(&self, callback: F) -> CallbackId
    where
        F: Fn() + 'static,
    {
        self.inner.borrow_mut().register(Rc::new(callback))
    }

    /// Drop a callback body. Its id stays in topic lists as a null entry that
    /// dispatch skips.
    pub fn unregister(&self, id: CallbackId) -> bool {
        self.inner.borrow_mut().unregister(id)
    }

    /// Attach a registered callback to a topic.
    ///
    /// Returns `false` without effect when the topic was never subscribed.
    /// Attachments are not deduplicated; dispatch handles that.
    pub fn on_changed(&self, id: CallbackId, topic: T) -> bool {
        let attached = self.inner.borrow_mut().attach(id, topic);
        if !attached {
            debug!(topic = ?topic, callback = %id, "Ignoring callback for unsubscribed topic");
        }
        attached
    }

    /// Register `callback` and attach it to `topic` in one step.
    pub fn observe<F>(&self, topic: T, callback: F) -> CallbackId
    where
        F: Fn() + 'static,
    {
        let id = self.register(callback);
        self.on_changed(id, topic);
        id
    }

    /// Record that `topic` changed. Idempotent until the next flush.
    pub fn mark_changed(&self, topic: T) {
        let mut reg = self.inner.borrow_mut();
        if !reg.is_subscribed(topic) {
            debug!(topic = ?topic, "Change marked on unsubscribed topic");
        }
        if reg.mark(topic) {
            trace!(topic = ?topic, "Topic marked dirty");
        }
    }

    pub fn is_dirty(&self, topic: T) -> bool {
        self.inner.borrow().is_dirty(topic)
    }

    /// Dirty topics in the order they were first marked.
    pub fn dirty_topics(&self) -> Vec<T> {
        self.inner.borrow().dirty().to_vec()
    }

    /// Number of attachments (including null entries) for a topic.
    pub fn callback_count(&self, topic: T) -> usize {
        self.inner
            .borrow()
            .attached(topic)
            .map_or(0, <[CallbackId]>::len)
    }

    /// Dispatch pending notifications and reset accumulation state.
    ///
    /// Walks dirty topics in first-marked order and each topic's callbacks in
    /// attachment order, invoking every live callback at most once. Returns the
    /// number of callbacks invoked.
    ///
    /// The pending dirty set is detached before dispatch starts. Topics marked
    /// by a callback while this flush runs are delivered by the next flush.
    pub fn flush(&self) -> usize {
        let (topics, ids) = {
            let mut reg = self.inner.borrow_mut();
            if reg.dirty().is_empty() {
                return 0;
            }
            reg.take_batch()
        };

        let mut executed: HashSet<CallbackId> = HashSet::new();
        for id in ids {
            // Resolved per call so an unregister during dispatch is honoured.
            let Some(callback) = self.inner.borrow().callback(id) else {
                continue;
            };
            if executed.insert(id) {
                callback();
            }
        }

        debug!(
            topics = ?topics,
            invoked = executed.len(),
            "Flushed change notifications"
        );
        executed.len()
    }
}
