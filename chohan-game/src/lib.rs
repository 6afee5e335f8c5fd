//! Cho-Han Game Engine
//!
//! Platform-agnostic core of the Cho-Han dice game: a purse that carries across
//! rounds, wager and call validation, dice behind an injectable source, and
//! round settlement with the 2-or-7 bonus and the house fee on wins.
//! This crate performs no console I/O; drivers feed it input lines and render
//! the [`RoundOutcome`] it returns.

pub mod call;
pub mod constants;
pub mod dice;
pub mod numbers;
pub mod round;
pub mod session;
pub mod wager;

// Re-export commonly used types
pub use call::{Call, CallRejection, parse_call};
pub use dice::{DicePair, DiceSource, Parity, ScriptedDice, SeededDice, draw_dice, numeral_name};
pub use round::{RoundOutcome, house_fee, resolve_round};
pub use session::{Ending, Phase, Session, SessionError, SessionStats};
pub use wager::{WagerInput, WagerRejection, parse_wager};
