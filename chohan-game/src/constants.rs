//! Fixed rules of the Cho-Han table.
//!
//! Payout, bonus, and fee values are part of the game definition and are
//! deliberately not exposed through configuration.

// Purse ----------------------------------------------------------------------
/// Mon every new session starts with.
pub const STARTING_PURSE: f64 = 5_000.0;
/// A purse strictly below this value ends the session.
pub const DEPLETION_THRESHOLD: f64 = 1.0;

// Dice -----------------------------------------------------------------------
pub const DIE_MIN: u8 = 1;
pub const DIE_MAX: u8 = 6;

// Bonus ----------------------------------------------------------------------
/// Flat credit paid whenever the dice total lands on one of [`BONUS_TOTALS`].
pub const BONUS_AMOUNT: f64 = 10.0;
pub const BONUS_TOTALS: [u8; 2] = [2, 7];

// House ----------------------------------------------------------------------
/// Share of a winning wager the house keeps, applied after the payout.
pub const HOUSE_FEE_RATE: f64 = 0.12;

// Console tokens -------------------------------------------------------------
pub const QUIT_TOKEN: &str = "QUIT";
pub const CHO_TOKEN: &str = "CHO";
pub const HAN_TOKEN: &str = "HAN";

/// Numeral names read out by the dealer, indexed by face value minus one.
pub const NUMERAL_NAMES: [&str; 6] = ["ICHI", "NI", "SAN", "SHI", "GO", "ROKU"];
