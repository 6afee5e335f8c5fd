use std::fmt;

use chohan_game::Call;
use clap::ValueEnum;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Decides stake and call for automated play.
pub trait BettingPolicy {
    /// Name used for logging/debug output.
    fn name(&self) -> &'static str;

    /// Stake for the next round; must not exceed `max_wager`.
    fn wager(&mut self, purse: f64, max_wager: u64) -> u64;

    /// Cho or han for the round just staked.
    fn call(&mut self) -> Call;
}

/// Built-in betting strategies for simulated sessions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum PolicyKind {
    /// Same fixed stake every round, capped by the purse.
    Flat,
    /// Half of whatever the purse covers.
    HalfPurse,
    /// Everything, every round.
    AllIn,
}

impl PolicyKind {
    pub const ALL: [Self; 3] = [Self::Flat, Self::HalfPurse, Self::AllIn];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Flat => "Flat",
            Self::HalfPurse => "Half Purse",
            Self::AllIn => "All In",
        }
    }

    #[must_use]
    pub fn create_policy(self, seed: u64, flat_wager: u64) -> Box<dyn BettingPolicy + Send> {
        let caller = CoinCaller::new(seed);
        match self {
            Self::Flat => Box::new(FlatPolicy {
                stake: flat_wager,
                caller,
            }),
            Self::HalfPurse => Box::new(HalfPursePolicy { caller }),
            Self::AllIn => Box::new(AllInPolicy { caller }),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fair coin over cho/han, independent of the dice stream.
struct CoinCaller {
    rng: ChaCha20Rng,
}

impl CoinCaller {
    fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed.rotate_left(17) ^ 0xC40_4A11),
        }
    }

    fn flip(&mut self) -> Call {
        if self.rng.random_bool(0.5) {
            Call::Cho
        } else {
            Call::Han
        }
    }
}

struct FlatPolicy {
    stake: u64,
    caller: CoinCaller,
}

struct HalfPursePolicy {
    caller: CoinCaller,
}

struct AllInPolicy {
    caller: CoinCaller,
}

impl BettingPolicy for FlatPolicy {
    fn name(&self) -> &'static str {
        "Flat"
    }

    fn wager(&mut self, _purse: f64, max_wager: u64) -> u64 {
        self.stake.min(max_wager)
    }

    fn call(&mut self) -> Call {
        self.caller.flip()
    }
}

impl BettingPolicy for HalfPursePolicy {
    fn name(&self) -> &'static str {
        "Half Purse"
    }

    fn wager(&mut self, _purse: f64, max_wager: u64) -> u64 {
        (max_wager / 2).max(1).min(max_wager)
    }

    fn call(&mut self) -> Call {
        self.caller.flip()
    }
}

impl BettingPolicy for AllInPolicy {
    fn name(&self) -> &'static str {
        "All In"
    }

    fn wager(&mut self, _purse: f64, max_wager: u64) -> u64 {
        max_wager
    }

    fn call(&mut self) -> Call {
        self.caller.flip()
    }
}
