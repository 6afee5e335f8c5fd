//! Settlement of a single round.

use serde::{Deserialize, Serialize};

use crate::call::Call;
use crate::constants::{BONUS_AMOUNT, HOUSE_FEE_RATE};
use crate::dice::{DicePair, Parity};
use crate::numbers::wager_to_mon;

/// Everything the dealer announces once the cup is lifted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub wager: u64,
    pub call: Call,
    pub dice: DicePair,
    pub total: u8,
    pub parity: Parity,
    pub winning_call: Call,
    pub won: bool,
    pub bonus: bool,
    /// Mon credited by the bonus rule (0 when the total missed).
    pub bonus_amount: f64,
    /// House fee taken from a win, `None` on a loss.
    pub fee: Option<f64>,
    pub purse_before: f64,
    pub purse_after: f64,
}

impl RoundOutcome {
    /// Net change to the purse over the round.
    #[must_use]
    pub fn net(&self) -> f64 {
        self.purse_after - self.purse_before
    }

    /// Dealer's numeral names for the revealed faces.
    #[must_use]
    pub fn numeral_names(&self) -> (&'static str, &'static str) {
        self.dice.numeral_names()
    }
}

/// House fee on a winning wager: exactly 12% of it, unrounded.
#[must_use]
pub fn house_fee(wager: u64) -> f64 {
    wager_to_mon(wager) * HOUSE_FEE_RATE
}

/// Settle one round and return the new purse with the outcome report.
///
/// Order matters: the bonus lands first, then the wager is either credited
/// (and the fee taken) or deducted. The caller checks depletion afterwards.
#[must_use]
pub fn resolve_round(purse: f64, wager: u64, call: Call, dice: DicePair) -> (f64, RoundOutcome) {
    let purse_before = purse;
    let total = dice.total();
    let parity = dice.parity();
    let winning_call = Call::for_parity(parity);

    let mut purse = purse;
    let bonus = dice.is_bonus();
    let bonus_amount = if bonus { BONUS_AMOUNT } else { 0.0 };
    purse += bonus_amount;

    let won = call == winning_call;
    let stake = wager_to_mon(wager);
    let fee = if won {
        purse += stake;
        let fee = house_fee(wager);
        purse -= fee;
        Some(fee)
    } else {
        purse -= stake;
        None
    };

    let outcome = RoundOutcome {
        wager,
        call,
        dice,
        total,
        parity,
        winning_call,
        won,
        bonus,
        bonus_amount,
        fee,
        purse_before,
        purse_after: purse,
    };
    (purse, outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(first: u8, second: u8) -> DicePair {
        DicePair::new(first, second).unwrap()
    }

    #[test]
    fn snake_eyes_bonus_then_loss() {
        let (purse, outcome) = resolve_round(5_000.0, 100, Call::Han, pair(1, 1));
        assert!((purse - 4_910.0).abs() < 1e-9);
        assert!(outcome.bonus);
        assert!(!outcome.won);
        assert_eq!(outcome.winning_call, Call::Cho);
        assert_eq!(outcome.fee, None);
        assert_eq!(outcome.total, 2);
    }

    #[test]
    fn seven_bonus_then_loss() {
        let (purse, outcome) = resolve_round(1_000.0, 500, Call::Cho, pair(3, 4));
        assert!((purse - 510.0).abs() < 1e-9);
        assert_eq!(outcome.parity, Parity::Odd);
        assert!(outcome.bonus);
        assert!((outcome.bonus_amount - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn plain_win_pays_wager_minus_fee() {
        let (purse, outcome) = resolve_round(1_000.0, 1_000, Call::Cho, pair(2, 4));
        assert!((purse - 1_880.0).abs() < 1e-9);
        assert!(outcome.won);
        assert!(!outcome.bonus);
        assert!((outcome.fee.unwrap() - 120.0).abs() < 1e-9);
        assert!((outcome.net() - 880.0).abs() < 1e-9);
    }

    #[test]
    fn bonus_and_win_stack() {
        let (purse, outcome) = resolve_round(200.0, 50, Call::Han, pair(5, 2));
        assert!(outcome.won && outcome.bonus);
        assert!((purse - (200.0 + 10.0 + 50.0 - 6.0)).abs() < 1e-9);
    }

    #[test]
    fn fee_is_not_rounded() {
        assert!((house_fee(7) - 0.84).abs() < 1e-12);
        let (purse, _) = resolve_round(7.0, 7, Call::Cho, pair(6, 6));
        assert!((purse - 13.16).abs() < 1e-9);
        assert!(purse.fract() > 0.0);
    }

    #[test]
    fn zero_wager_only_moves_on_bonus() {
        let (purse, outcome) = resolve_round(42.0, 0, Call::Cho, pair(1, 2));
        assert!((purse - 42.0).abs() < f64::EPSILON);
        assert!(!outcome.won);
        let (purse, outcome) = resolve_round(42.0, 0, Call::Cho, pair(3, 5));
        assert!((purse - 42.0).abs() < f64::EPSILON);
        assert_eq!(outcome.fee, Some(0.0));
    }

    #[test]
    fn outcome_reports_numerals() {
        let (_, outcome) = resolve_round(100.0, 10, Call::Cho, pair(6, 5));
        assert_eq!(outcome.numeral_names(), ("ROKU", "GO"));
    }

    #[test]
    fn win_iff_call_matches_parity_for_all_pairs() {
        for first in 1..=6 {
            for second in 1..=6 {
                for call in Call::ALL {
                    let dice = pair(first, second);
                    let (purse, outcome) = resolve_round(1_000.0, 100, call, dice);
                    let bonus = if dice.is_bonus() { 10.0 } else { 0.0 };
                    let expected = if call.parity() == dice.parity() {
                        1_000.0 + bonus + 100.0 - 12.0
                    } else {
                        1_000.0 + bonus - 100.0
                    };
                    assert_eq!(outcome.won, call.parity() == dice.parity());
                    assert!((purse - expected).abs() < 1e-9);
                }
            }
        }
    }
}
