//! Numeric conversion helpers centralizing the casts between integer wagers
//! and the floating-point purse.

use num_traits::cast::cast;

/// Convert a wager to mon while allowing precision loss in a single location.
#[must_use]
pub fn wager_to_mon(value: u64) -> f64 {
    cast::<u64, f64>(value).unwrap_or(f64::MAX)
}

/// Largest whole wager a purse can cover, or 0 for empty, negative, or NaN purses.
#[must_use]
pub fn purse_to_max_wager(purse: f64) -> u64 {
    if purse.is_nan() || purse <= 0.0 {
        return 0;
    }
    let max = cast::<u64, f64>(u64::MAX).unwrap_or(f64::MAX);
    cast::<f64, u64>(purse.min(max).floor()).unwrap_or(u64::MAX)
}
