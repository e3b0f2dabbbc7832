//! Change-detecting scalar field.

use crate::tracker::{ChangeTracker, Topic};

/// A value bound to a fixed topic. Writes compare old and new by value and
/// mark the topic dirty only on an actual change.
#[derive(Debug, Clone)]
pub struct Field<T: Topic, V> {
    topic: T,
    value: V,
}

impl<T: Topic, V: PartialEq> Field<T, V> {
    pub fn new(topic: T, value: V) -> Self {
        Self { topic, value }
    }

    pub fn topic(&self) -> T {
        self.topic
    }

    pub fn get(&self) -> &V {
        &self.value
    }

    /// Store `value`; returns whether it differed from the previous one.
    pub fn set(&mut self, value: V, tracker: &ChangeTracker<T>) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        tracker.mark_changed(self.topic);
        true
    }
}
