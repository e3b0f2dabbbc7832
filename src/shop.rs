//! Shop
//!
//! Business operations expressed as sequences of [`GameState`] mutations. A
//! shop never flushes; the host decides when a transaction is complete.
//! Currency is debited before the roster step and is not restored when that
//! step is rejected.

use crate::error::ValidationError;
use crate::state::GameState;
use tracing::{debug, warn};

pub struct Shop<'a> {
    state: &'a mut GameState,
}

impl<'a> Shop<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &GameState {
        &*self.state
    }

    /// Spend coins. A negative amount credits them.
    pub fn use_coins(&mut self, coins: i64) -> Result<(), ValidationError> {
        let balance = debit("coins", self.state.coins(), coins)?;
        self.state.set_coins(balance);
        debug!(spent = coins, balance, "Used coins");
        Ok(())
    }

    /// Gain `stars` for `for_coins` coins. Neither balance moves unless both
    /// fit.
    pub fn buy_stars(&mut self, stars: i64, for_coins: i64) -> Result<(), ValidationError> {
        let star_balance = credit("stars", self.state.stars(), stars)?;
        let coin_balance = debit("coins", self.state.coins(), for_coins)?;
        self.state.set_stars(star_balance);
        self.state.set_coins(coin_balance);
        debug!(bought = stars, balance = star_balance, "Bought stars");
        Ok(())
    }

    /// Spend `for_stars` stars to unlock character `id`.
    pub fn unlock_character(&mut self, id: u32, for_stars: i64) -> Result<(), ValidationError> {
        let balance = debit("stars", self.state.stars(), for_stars)?;
        self.state.set_stars(balance);
        self.state.unlock_character(id)?;
        debug!(character_id = id, stars = balance, "Unlocked character");
        Ok(())
    }

    /// Spend `for_coins` coins to upgrade character `id`; returns the new level.
    pub fn upgrade_character(&mut self, id: u32, for_coins: i64) -> Result<u32, ValidationError> {
        self.use_coins(for_coins)?;
        let level = self.state.upgrade_character(id)?;
        debug!(character_id = id, level, "Upgraded character");
        Ok(level)
    }
}

fn debit(currency: &'static str, balance: i64, amount: i64) -> Result<i64, ValidationError> {
    balance
        .checked_sub(amount)
        .ok_or_else(|| overflow(currency, balance, amount.saturating_neg()))
}

fn credit(currency: &'static str, balance: i64, amount: i64) -> Result<i64, ValidationError> {
    balance
        .checked_add(amount)
        .ok_or_else(|| overflow(currency, balance, amount))
}

fn overflow(currency: &'static str, balance: i64, amount: i64) -> ValidationError {
    warn!(currency, balance, amount, "Rejected balance change: out of range");
    ValidationError::BalanceOverflow {
        currency,
        balance,
        amount,
    }
}
