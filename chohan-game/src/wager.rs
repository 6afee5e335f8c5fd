//! Wager validation.
//!
//! [`parse_wager`] judges a single line against the purse and never loops; the
//! console shell decides when to ask again.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::call::strip_line_ending;
use crate::constants::QUIT_TOKEN;
use crate::numbers::wager_to_mon;

/// What a valid line at the betting prompt asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WagerInput {
    Quit,
    Amount(u64),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WagerRejection {
    #[error("Please enter a number.")]
    NotANumber,
    /// `wager` is `None` when the digits do not even fit a `u64`.
    #[error("You do not have enough to make that bet.")]
    InsufficientFunds { wager: Option<u64>, purse: f64 },
}

/// Validate one raw line of wager input against the current purse.
///
/// Only the line terminator is stripped. A case-insensitive `QUIT` ends the
/// game; otherwise the line must be a non-empty run of ASCII digits whose value
/// does not exceed `purse`. Zero is a valid wager.
///
/// # Errors
///
/// [`WagerRejection::NotANumber`] for anything that is not plain digits (signs,
/// spaces, and decimals included), [`WagerRejection::InsufficientFunds`] when
/// the amount is larger than the purse or the purse is NaN.
pub fn parse_wager(raw: &str, purse: f64) -> Result<WagerInput, WagerRejection> {
    let token = strip_line_ending(raw);
    if token.eq_ignore_ascii_case(QUIT_TOKEN) {
        return Ok(WagerInput::Quit);
    }
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(WagerRejection::NotANumber);
    }
    let Ok(wager) = token.parse::<u64>() else {
        // All digits but wider than u64: no purse can cover it.
        return Err(WagerRejection::InsufficientFunds {
            wager: None,
            purse,
        });
    };
    if purse.is_nan() || wager_to_mon(wager) > purse {
        return Err(WagerRejection::InsufficientFunds {
            wager: Some(wager),
            purse,
        });
    }
    Ok(WagerInput::Amount(wager))
}
