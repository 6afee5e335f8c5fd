//! The betting loop as an explicit state machine.
//!
//! A [`Session`] owns the purse and walks `Betting → Calling → (Betting |
//! Terminated)`. Each call consumes one validated line of input; rejected
//! input leaves the session exactly as it was so the caller can simply ask
//! again.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::call::{Call, CallRejection, parse_call};
use crate::constants::{DEPLETION_THRESHOLD, STARTING_PURSE};
use crate::dice::{DicePair, DiceSource, draw_dice};
use crate::numbers::{purse_to_max_wager, wager_to_mon};
use crate::round::{RoundOutcome, resolve_round};
use crate::wager::{WagerInput, WagerRejection, parse_wager};

/// Why a session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ending {
    /// The player typed `QUIT` at the betting prompt.
    Quit,
    /// The purse fell below one mon after a round.
    Depleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Betting,
    /// Wager is locked in and the dice are under the cup.
    Calling { wager: u64 },
    Terminated(Ending),
}

impl Phase {
    const fn label(self) -> &'static str {
        match self {
            Self::Betting => "betting",
            Self::Calling { .. } => "calling",
            Self::Terminated(_) => "terminated",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("session is {actual}, expected {expected}")]
    WrongPhase {
        expected: &'static str,
        actual: &'static str,
    },
    #[error(transparent)]
    Wager(#[from] WagerRejection),
    #[error(transparent)]
    Call(#[from] CallRejection),
}

/// Running tallies across the rounds of one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub rounds: u32,
    pub wins: u32,
    pub losses: u32,
    pub bonuses: u32,
    pub total_wagered: u64,
    pub fees_paid: f64,
    pub peak_purse: f64,
}

impl SessionStats {
    fn record(&mut self, outcome: &RoundOutcome) {
        self.rounds += 1;
        if outcome.won {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
        if outcome.bonus {
            self.bonuses += 1;
        }
        self.total_wagered = self.total_wagered.saturating_add(outcome.wager);
        self.fees_paid += outcome.fee.unwrap_or(0.0);
        self.peak_purse = self.peak_purse.max(outcome.purse_after);
    }
}

/// One player at the table, from the first bet to quit or ruin.
#[derive(Debug, Clone)]
pub struct Session<D> {
    purse: f64,
    phase: Phase,
    dice: D,
    covered: Option<DicePair>,
    stats: SessionStats,
}

impl<D: DiceSource> Session<D> {
    /// Fresh session with the standard starting purse.
    #[must_use]
    pub fn new(dice: D) -> Self {
        Self::with_purse(STARTING_PURSE, dice)
    }

    /// Session resuming from an arbitrary purse.
    ///
    /// A purse already below one mon, or one that is not a finite number,
    /// yields a terminated session; no betting phase is ever opened for it.
    #[must_use]
    pub fn with_purse(purse: f64, dice: D) -> Self {
        let phase = if is_depleted(purse) {
            Phase::Terminated(Ending::Depleted)
        } else {
            Phase::Betting
        };
        Self {
            purse,
            phase,
            dice,
            covered: None,
            stats: SessionStats {
                peak_purse: purse,
                ..SessionStats::default()
            },
        }
    }

    #[must_use]
    pub const fn purse(&self) -> f64 {
        self.purse
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub const fn stats(&self) -> &SessionStats {
        &self.stats
    }

    #[must_use]
    pub const fn ending(&self) -> Option<Ending> {
        match self.phase {
            Phase::Terminated(ending) => Some(ending),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.ending().is_some()
    }

    /// Largest wager the purse currently covers.
    #[must_use]
    pub fn max_wager(&self) -> u64 {
        purse_to_max_wager(self.purse)
    }

    /// Borrow the dice source, e.g. to inspect a scripted cup.
    #[must_use]
    pub const fn dice(&self) -> &D {
        &self.dice
    }

    /// Feed one line typed at the betting prompt.
    ///
    /// A valid amount locks in the wager and draws the dice; `QUIT` ends the
    /// session.
    ///
    /// # Errors
    ///
    /// [`SessionError::Wager`] when the line is rejected,
    /// [`SessionError::WrongPhase`] outside the betting phase.
    pub fn place_wager(&mut self, raw: &str) -> Result<WagerInput, SessionError> {
        self.expect_betting()?;
        let input = parse_wager(raw, self.purse)?;
        match input {
            WagerInput::Quit => self.phase = Phase::Terminated(Ending::Quit),
            WagerInput::Amount(wager) => self.lock_wager(wager),
        }
        Ok(input)
    }

    /// Place an already-numeric wager, with the same purse check as
    /// [`Session::place_wager`].
    ///
    /// # Errors
    ///
    /// [`SessionError::Wager`] when the purse does not cover `wager`,
    /// [`SessionError::WrongPhase`] outside the betting phase.
    pub fn bet(&mut self, wager: u64) -> Result<(), SessionError> {
        self.expect_betting()?;
        if wager_to_mon(wager) > self.purse {
            return Err(WagerRejection::InsufficientFunds {
                wager: Some(wager),
                purse: self.purse,
            }
            .into());
        }
        self.lock_wager(wager);
        Ok(())
    }

    /// Walk away from the table.
    ///
    /// # Errors
    ///
    /// [`SessionError::WrongPhase`] outside the betting phase.
    pub fn quit(&mut self) -> Result<(), SessionError> {
        self.expect_betting()?;
        self.phase = Phase::Terminated(Ending::Quit);
        Ok(())
    }

    /// Feed one line typed at the cho/han prompt and settle the round.
    ///
    /// # Errors
    ///
    /// [`SessionError::Call`] when the line is not `CHO`/`HAN`,
    /// [`SessionError::WrongPhase`] when no wager is waiting.
    pub fn place_call(&mut self, raw: &str) -> Result<RoundOutcome, SessionError> {
        self.expect_calling()?;
        let call = parse_call(raw)?;
        self.settle(call)
    }

    /// Settle the round with an already-parsed call.
    ///
    /// # Errors
    ///
    /// [`SessionError::WrongPhase`] when no wager is waiting.
    pub fn call(&mut self, call: Call) -> Result<RoundOutcome, SessionError> {
        self.expect_calling()?;
        self.settle(call)
    }

    fn lock_wager(&mut self, wager: u64) {
        self.covered = Some(draw_dice(&mut self.dice));
        self.phase = Phase::Calling { wager };
    }

    fn settle(&mut self, call: Call) -> Result<RoundOutcome, SessionError> {
        let (Phase::Calling { wager }, Some(dice)) = (self.phase, self.covered.take()) else {
            return Err(self.wrong_phase("calling"));
        };
        let (purse, outcome) = resolve_round(self.purse, wager, call, dice);
        self.purse = purse;
        self.stats.record(&outcome);
        self.phase = if is_depleted(self.purse) {
            Phase::Terminated(Ending::Depleted)
        } else {
            Phase::Betting
        };
        Ok(outcome)
    }

    fn expect_betting(&self) -> Result<(), SessionError> {
        match self.phase {
            Phase::Betting => Ok(()),
            _ => Err(self.wrong_phase("betting")),
        }
    }

    fn expect_calling(&self) -> Result<(), SessionError> {
        match self.phase {
            Phase::Calling { .. } => Ok(()),
            _ => Err(self.wrong_phase("calling")),
        }
    }

    const fn wrong_phase(&self, expected: &'static str) -> SessionError {
        SessionError::WrongPhase {
            expected,
            actual: self.phase.label(),
        }
    }
}

/// Strictly below one mon is out; NaN and infinities never count as money.
fn is_depleted(purse: f64) -> bool {
    !purse.is_finite() || purse < DEPLETION_THRESHOLD
}
