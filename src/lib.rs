//! Gamestate: Game Client State with Deferred Change Notifications
//!
//! Currencies and a character roster whose mutations mark topics dirty in a
//! [`tracker::ChangeTracker`]. A single explicit flush then notifies every
//! interested observer at most once, after the whole transaction, so observers
//! only ever read final values.

pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod script;
pub mod shop;
pub mod state;
pub mod tracker;

pub use context::GameContext;
pub use error::{GameError, ValidationError};
pub use shop::Shop;
pub use state::{Character, GameState, StateTopic};
pub use tracker::{CallbackId, ChangeTracker, WeakChangeTracker};
