//! Scripted sessions
//!
//! Runs a sequence of shop steps and flushes against a [`GameContext`],
//! recording which observers were notified at each flush and what state they
//! saw. Backs the `gamestate run` command.

use crate::context::GameContext;
use crate::error::GameError;
use crate::state::{GameState, StateSnapshot, StateTopic};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use tracing::{info, warn};

/// Observer attached to every topic at once.
pub const SUMMARY_OBSERVER: &str = "summary";

/// One scripted step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Step {
    UseCoins { coins: i64 },
    BuyStars { stars: i64, coins: i64 },
    Unlock { id: u32, stars: i64 },
    Upgrade { id: u32, coins: i64 },
    Flush,
}

impl Step {
    /// Parse `use-coins:N`, `buy-stars:S:C`, `unlock:ID:S`, `upgrade:ID:C` or `flush`.
    pub fn parse(input: &str) -> Result<Self, GameError> {
        let parts: Vec<&str> = input.trim().split(':').collect();
        let invalid = |reason: &str| GameError::Script {
            step: input.to_string(),
            reason: reason.to_string(),
        };
        let number = |raw: &str| -> Result<i64, GameError> {
            raw.parse::<i64>()
                .map_err(|_| invalid(&format!("'{}' is not an amount", raw)))
        };
        let id = |raw: &str| -> Result<u32, GameError> {
            raw.parse::<u32>()
                .map_err(|_| invalid(&format!("'{}' is not a character id", raw)))
        };

        match parts.as_slice() {
            ["flush"] => Ok(Step::Flush),
            ["use-coins", coins] => Ok(Step::UseCoins {
                coins: number(*coins)?,
            }),
            ["buy-stars", stars, coins] => Ok(Step::BuyStars {
                stars: number(*stars)?,
                coins: number(*coins)?,
            }),
            ["unlock", raw_id, stars] => Ok(Step::Unlock {
                id: id(*raw_id)?,
                stars: number(*stars)?,
            }),
            ["upgrade", raw_id, coins] => Ok(Step::Upgrade {
                id: id(*raw_id)?,
                coins: number(*coins)?,
            }),
            _ => Err(invalid("unknown step or wrong number of arguments")),
        }
    }
}

impl FromStr for Step {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Step::parse(s)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::UseCoins { coins } => write!(f, "use-coins:{}", coins),
            Step::BuyStars { stars, coins } => write!(f, "buy-stars:{}:{}", stars, coins),
            Step::Unlock { id, stars } => write!(f, "unlock:{}:{}", id, stars),
            Step::Upgrade { id, coins } => write!(f, "upgrade:{}:{}", id, coins),
            Step::Flush => f.write_str("flush"),
        }
    }
}

/// One observer invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub observer: String,
    pub ts: String,
    pub state: StateSnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlushReport {
    pub index: usize,
    pub invoked: usize,
    pub notifications: Vec<Notification>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectedStep {
    pub step: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptReport {
    pub flushes: Vec<FlushReport>,
    pub rejected: Vec<RejectedStep>,
    pub final_state: StateSnapshot,
}

/// Execute `steps`, then flush anything still pending.
///
/// Rejected steps are recorded and the script continues; currency already
/// debited by a rejected step stays debited.
pub fn run_script(context: &mut GameContext, steps: &[Step]) -> ScriptReport {
    let log: Rc<RefCell<Vec<Notification>>> = Rc::new(RefCell::new(Vec::new()));
    for topic in StateTopic::ALL {
        context.observe(&[topic], recorder(topic.as_str(), &log));
    }
    context.observe(&StateTopic::ALL, recorder(SUMMARY_OBSERVER, &log));

    let mut flushes = Vec::new();
    let mut rejected = Vec::new();
    for step in steps {
        let outcome = context.transact(|shop| match *step {
            Step::UseCoins { coins } => shop.use_coins(coins),
            Step::BuyStars { stars, coins } => shop.buy_stars(stars, coins),
            Step::Unlock { id, stars } => shop.unlock_character(id, stars),
            Step::Upgrade { id, coins } => shop.upgrade_character(id, coins).map(|_| ()),
            Step::Flush => Ok(()),
        });

        if let Err(e) = outcome {
            warn!(step = %step, error = %e, "Step rejected");
            rejected.push(RejectedStep {
                step: step.to_string(),
                error: e.to_string(),
            });
        }
        if *step == Step::Flush {
            flushes.push(flush(context, &log, flushes.len() + 1));
        }
    }

    if !context.tracker().dirty_topics().is_empty() {
        flushes.push(flush(context, &log, flushes.len() + 1));
    }

    let final_state = context.state().snapshot();
    info!(
        steps = steps.len(),
        flushes = flushes.len(),
        rejected = rejected.len(),
        "Script finished"
    );
    ScriptReport {
        flushes,
        rejected,
        final_state,
    }
}

fn flush(context: &GameContext, log: &Rc<RefCell<Vec<Notification>>>, index: usize) -> FlushReport {
    let invoked = context.flush();
    let notifications = std::mem::take(&mut *log.borrow_mut());
    FlushReport {
        index,
        invoked,
        notifications,
    }
}

fn recorder(
    name: &'static str,
    log: &Rc<RefCell<Vec<Notification>>>,
) -> impl Fn(&GameState) + 'static {
    let log = Rc::clone(log);
    move |state: &GameState| {
        log.borrow_mut().push(Notification {
            observer: name.to_string(),
            ts: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            state: state.snapshot(),
        });
    }
}
