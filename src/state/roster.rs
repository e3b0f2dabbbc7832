//! Character roster entries.

use serde::{Deserialize, Serialize};

/// Level assigned to a freshly unlocked character.
pub const INITIAL_LEVEL: u32 = 1;

/// An unlocked character. `id` is unique within a roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: u32,
    pub level: u32,
}

impl Character {
    pub fn unlocked(id: u32) -> Self {
        Self {
            id,
            level: INITIAL_LEVEL,
        }
    }
}

pub(crate) fn position(roster: &[Character], id: u32) -> Option<usize> {
    roster.iter().position(|c| c.id == id)
}
