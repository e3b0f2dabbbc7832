//! Game State
//!
//! Coins, stars and the character roster. Every mutator reports actual changes
//! to the [`ChangeTracker`] handle supplied at construction; nothing is
//! dispatched until the owner flushes the tracker.

mod field;
mod roster;

pub use field::Field;
pub use roster::{Character, INITIAL_LEVEL};

use crate::error::ValidationError;
use crate::tracker::ChangeTracker;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Observable facets of [`GameState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateTopic {
    Coins,
    Stars,
    Characters,
}

impl StateTopic {
    /// The fixed topic set subscribed at initialization.
    pub const ALL: [StateTopic; 3] = [StateTopic::Coins, StateTopic::Stars, StateTopic::Characters];

    pub fn as_str(&self) -> &'static str {
        match self {
            StateTopic::Coins => "coins",
            StateTopic::Stars => "stars",
            StateTopic::Characters => "characters",
        }
    }
}

impl fmt::Display for StateTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point-in-time copy of the state, for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub coins: i64,
    pub stars: i64,
    pub characters: Vec<Character>,
}

pub struct GameState {
    tracker: ChangeTracker<StateTopic>,
    coins: Field<StateTopic, i64>,
    stars: Field<StateTopic, i64>,
    characters: Option<Vec<Character>>,
}

impl fmt::Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameState")
            .field("coins", self.coins.get())
            .field("stars", self.stars.get())
            .field("characters", &self.characters)
            .finish()
    }
}

impl GameState {
    /// Empty state (zero balances, no roster yet) reporting to `tracker`.
    pub fn new(tracker: ChangeTracker<StateTopic>) -> Self {
        Self {
            tracker,
            coins: Field::new(StateTopic::Coins, 0),
            stars: Field::new(StateTopic::Stars, 0),
            characters: None,
        }
    }

    pub fn tracker(&self) -> &ChangeTracker<StateTopic> {
        &self.tracker
    }

    pub fn coins(&self) -> i64 {
        *self.coins.get()
    }

    /// Returns whether the balance changed.
    pub fn set_coins(&mut self, coins: i64) -> bool {
        self.coins.set(coins, &self.tracker)
    }

    pub fn stars(&self) -> i64 {
        *self.stars.get()
    }

    /// Returns whether the balance changed.
    pub fn set_stars(&mut self, stars: i64) -> bool {
        self.stars.set(stars, &self.tracker)
    }

    /// Unlocked characters in unlock order; empty when no roster is set.
    pub fn characters(&self) -> &[Character] {
        self.characters.as_deref().unwrap_or_default()
    }

    pub fn has_roster(&self) -> bool {
        self.characters.is_some()
    }

    pub fn character(&self, id: u32) -> Option<&Character> {
        self.characters().iter().find(|c| c.id == id)
    }

    /// Replace the whole roster.
    ///
    /// An absent roster is rejected. The topic is marked only when a previous
    /// roster existed and differs from the new one, so the first assignment
    /// never marks. Returns whether the topic was marked.
    pub fn set_characters(
        &mut self,
        characters: Option<Vec<Character>>,
    ) -> Result<bool, ValidationError> {
        let Some(characters) = characters else {
            warn!("Character roster cannot be absent");
            return Err(ValidationError::MissingRoster);
        };

        let changed = matches!(&self.characters, Some(previous) if *previous != characters);
        self.characters = Some(characters);
        if changed {
            self.tracker.mark_changed(StateTopic::Characters);
        }
        Ok(changed)
    }

    /// Append a new character at [`INITIAL_LEVEL`].
    pub fn unlock_character(&mut self, id: u32) -> Result<(), ValidationError> {
        let Some(roster) = self.characters.as_mut() else {
            warn!(character_id = id, "Cannot unlock character without a roster");
            return Err(ValidationError::MissingRoster);
        };
        if roster::position(roster, id).is_some() {
            warn!(character_id = id, "Repeated character");
            return Err(ValidationError::DuplicateCharacter(id));
        }

        roster.push(Character::unlocked(id));
        self.tracker.mark_changed(StateTopic::Characters);
        Ok(())
    }

    /// Raise a character's level by one; returns the new level.
    pub fn upgrade_character(&mut self, id: u32) -> Result<u32, ValidationError> {
        let index = self
            .characters
            .as_deref()
            .and_then(|roster| roster::position(roster, id));
        let (Some(roster), Some(index)) = (self.characters.as_mut(), index) else {
            warn!(character_id = id, "No target character to upgrade");
            return Err(ValidationError::UnknownCharacter(id));
        };

        let character = &mut roster[index];
        character.level += 1;
        let level = character.level;
        self.tracker.mark_changed(StateTopic::Characters);
        Ok(level)
    }

    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            coins: self.coins(),
            stars: self.stars(),
            characters: self.characters().to_vec(),
        }
    }
}
