//! Game Context
//!
//! Owns one [`GameState`] and its [`ChangeTracker`] for the lifetime of the
//! host, subscribes the fixed topic set, and hands out typed observer
//! registration. Constructed explicitly and passed to consumers; there is no
//! process-wide accessor.

use crate::config::GameConfig;
use crate::shop::Shop;
use crate::state::{GameState, StateTopic};
use crate::tracker::{CallbackId, ChangeTracker};
use std::cell::{Ref, RefCell, RefMut};
use std::rc::{Rc, Weak};
use tracing::{debug, info, warn};

pub struct GameContext {
    tracker: ChangeTracker<StateTopic>,
    state: Rc<RefCell<GameState>>,
}

impl GameContext {
    pub fn new(coins: i64, stars: i64) -> Self {
        let (tracker, state) = build(coins, stars);
        Self { tracker, state }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.initial.coins, config.initial.stars)
    }

    /// Hard reset: drops every subscription, callback, pending change and
    /// value. Observers registered before the call never run again.
    pub fn reinit(&mut self, coins: i64, stars: i64) {
        let (tracker, state) = build(coins, stars);
        self.tracker = tracker;
        self.state = state;
    }

    pub fn tracker(&self) -> &ChangeTracker<StateTopic> {
        &self.tracker
    }

    pub fn state(&self) -> Ref<'_, GameState> {
        self.state.borrow()
    }

    pub fn state_mut(&mut self) -> RefMut<'_, GameState> {
        self.state.borrow_mut()
    }

    /// Shared handle for consumers that outlive a borrow of the context.
    /// Stale after [`GameContext::reinit`].
    pub fn state_handle(&self) -> Rc<RefCell<GameState>> {
        Rc::clone(&self.state)
    }

    /// Run a sequence of shop operations against the state. Nothing is
    /// dispatched until [`GameContext::flush`].
    pub fn transact<R>(&mut self, operations: impl FnOnce(&mut Shop<'_>) -> R) -> R {
        let mut state = self.state.borrow_mut();
        let mut shop = Shop::new(&mut state);
        operations(&mut shop)
    }

    /// Register one observer under every topic in `topics`. It runs at most
    /// once per flush however many of them changed.
    ///
    /// An observer that finds the state mutably borrowed during a flush is not
    /// run; its topics are marked again so the next flush retries it. An
    /// observer attached to no topic is unregistered straight away.
    pub fn observe<F>(&self, topics: &[StateTopic], observer: F) -> CallbackId
    where
        F: Fn(&GameState) + 'static,
    {
        let state = Rc::downgrade(&self.state);
        let tracker = self.tracker.downgrade();
        let watched = topics.to_vec();
        let id = self.tracker.register(move || {
            if read_state(&state, &observer) {
                return;
            }
            warn!(topics = ?watched, "Game state is mutably borrowed during flush; observer deferred");
            if let Some(tracker) = tracker.upgrade() {
                for topic in &watched {
                    tracker.mark_changed(*topic);
                }
            }
        });

        let mut attached = 0;
        for topic in topics {
            if self.tracker.on_changed(id, *topic) {
                attached += 1;
            }
        }
        if attached == 0 {
            debug!(callback = %id, "Observer attached to no topic; unregistering");
            self.tracker.unregister(id);
        }
        id
    }

    pub fn on_coins_changed<F>(&self, observer: F) -> CallbackId
    where
        F: Fn(&GameState) + 'static,
    {
        self.observe(&[StateTopic::Coins], observer)
    }

    pub fn on_stars_changed<F>(&self, observer: F) -> CallbackId
    where
        F: Fn(&GameState) + 'static,
    {
        self.observe(&[StateTopic::Stars], observer)
    }

    pub fn on_characters_changed<F>(&self, observer: F) -> CallbackId
    where
        F: Fn(&GameState) + 'static,
    {
        self.observe(&[StateTopic::Characters], observer)
    }

    /// Deliver pending notifications; returns the number of observers run.
    pub fn flush(&self) -> usize {
        self.tracker.flush()
    }
}

fn build(coins: i64, stars: i64) -> (ChangeTracker<StateTopic>, Rc<RefCell<GameState>>) {
    let tracker = ChangeTracker::new();
    for topic in StateTopic::ALL {
        tracker.subscribe(topic);
    }

    let mut state = GameState::new(tracker.clone());
    state.set_coins(coins);
    state.set_stars(stars);
    if let Err(e) = state.set_characters(Some(Vec::new())) {
        warn!(error = %e, "Failed to initialize character roster");
    }
    // Initial values are the baseline observers start from, not a change.
    tracker.flush();

    info!(coins, stars, "Game state initialized");
    (tracker, Rc::new(RefCell::new(state)))
}

/// Run `observer` against the live state. Returns `false` when the state is
/// mutably borrowed and the read has to wait for a later flush.
fn read_state<F>(state: &Weak<RefCell<GameState>>, observer: &F) -> bool
where
    F: Fn(&GameState),
{
    let Some(state) = state.upgrade() else {
        return true;
    };
    let borrowed = state.try_borrow();
    match borrowed {
        Ok(current) => {
            observer(&current);
            true
        }
        Err(_) => false,
    }
}
