//! Topic and callback identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;

/// A closed identifier naming an observable facet of state.
///
/// Implemented for any small copyable key; in practice an enum so that a
/// mistyped topic is a compile error rather than a silent no-op.
pub trait Topic: Copy + Eq + Hash + fmt::Debug + 'static {}

impl<T> Topic for T where T: Copy + Eq + Hash + fmt::Debug + 'static {}

/// Opaque handle returned when a callback is registered.
///
/// Dispatch deduplicates on this handle, so registering the same closure
/// twice yields two independent identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CallbackId(u64);

impl CallbackId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for CallbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cb#{}", self.0)
    }
}
