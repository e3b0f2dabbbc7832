//! Subscription registry and dirty-topic accumulator.
//!
//! Plain data with no interior mutability; [`super::ChangeTracker`] wraps it
//! in a shared handle and releases the borrow before invoking callbacks.

use std::collections::HashMap;
use std::rc::Rc;

use super::topic::{CallbackId, Topic};

pub(crate) type Callback = Rc<dyn Fn()>;

pub(crate) struct Registry<T: Topic> {
    subscriptions: HashMap<T, Vec<CallbackId>>,
    callbacks: HashMap<CallbackId, Callback>,
    dirty: Vec<T>,
    next_id: u64,
}

impl<T: Topic> Default for Registry<T> {
    fn default() -> Self {
        Self {
            subscriptions: HashMap::new(),
            callbacks: HashMap::new(),
            dirty: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T: Topic> Registry<T> {
    /// Returns true when a new (empty) list was created.
    pub fn subscribe(&mut self, topic: T) -> bool {
        if self.subscriptions.contains_key(&topic) {
            return false;
        }
        self.subscriptions.insert(topic, Vec::new());
        true
    }

    pub fn is_subscribed(&self, topic: T) -> bool {
        self.subscriptions.contains_key(&topic)
    }

    pub fn register(&mut self, callback: Callback) -> CallbackId {
        let id = CallbackId::new(self.next_id);
        self.next_id += 1;
        self.callbacks.insert(id, callback);
        id
    }

    pub fn unregister(&mut self, id: CallbackId) -> bool {
        self.callbacks.remove(&id).is_some()
    }

    /// Appends without deduplicating; the same id may appear many times.
    pub fn attach(&mut self, id: CallbackId, topic: T) -> bool {
        match self.subscriptions.get_mut(&topic) {
            Some(list) => {
                list.push(id);
                true
            }
            None => false,
        }
    }

    /// Returns true when the topic was not already dirty.
    pub fn mark(&mut self, topic: T) -> bool {
        if self.dirty.contains(&topic) {
            return false;
        }
        self.dirty.push(topic);
        true
    }

    pub fn is_dirty(&self, topic: T) -> bool {
        self.dirty.contains(&topic)
    }

    pub fn dirty(&self) -> &[T] {
        &self.dirty
    }

    pub fn callback(&self, id: CallbackId) -> Option<Callback> {
        self.callbacks.get(&id).cloned()
    }

    pub fn attached(&self, topic: T) -> Option<&[CallbackId]> {
        self.subscriptions.get(&topic).map(Vec::as_slice)
    }

    /// Detaches the pending dirty topics and resolves them into the ordered
    /// list of attached callback ids. Topics without a list contribute nothing.
    pub fn take_batch(&mut self) -> (Vec<T>, Vec<CallbackId>) {
        let topics = std::mem::take(&mut self.dirty);
        let ids = topics
            .iter()
            .filter_map(|topic| self.subscriptions.get(topic))
            .flat_map(|list| list.iter().copied())
            .collect();
        (topics, ids)
    }
}
