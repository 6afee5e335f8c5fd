//! Dice drawing behind an injectable source.
//!
//! Sessions never touch an RNG directly; they ask a [`DiceSource`] for one face
//! at a time. Production play uses [`SeededDice`] (ChaCha20, seeded from OS
//! entropy or a fixed `u64`), tests can replay exact faces with [`ScriptedDice`].

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{BONUS_TOTALS, DIE_MAX, DIE_MIN, NUMERAL_NAMES};

/// Uniform generator over the faces of a single die.
pub trait DiceSource {
    /// Roll one die, returning a face in `DIE_MIN..=DIE_MAX`.
    fn roll_die(&mut self) -> u8;
}

impl<D: DiceSource + ?Sized> DiceSource for &mut D {
    fn roll_die(&mut self) -> u8 {
        (**self).roll_die()
    }
}

impl<D: DiceSource + ?Sized> DiceSource for Box<D> {
    fn roll_die(&mut self) -> u8 {
        (**self).roll_die()
    }
}

/// ChaCha20-backed dice cup.
#[derive(Debug, Clone)]
pub struct SeededDice {
    rng: ChaCha20Rng,
    seed: Option<u64>,
}

impl SeededDice {
    /// Reproducible dice for a known seed.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Non-deterministic dice seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha20Rng::from_os_rng(),
            seed: None,
        }
    }

    /// Seed used to build this cup, if it was built from one.
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl DiceSource for SeededDice {
    fn roll_die(&mut self) -> u8 {
        self.rng.random_range(DIE_MIN..=DIE_MAX)
    }
}

/// Replays a fixed list of faces, cycling when it runs out.
///
/// Faces outside `1..=6` are clamped into range.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    faces: Vec<u8>,
    cursor: usize,
}

impl ScriptedDice {
    #[must_use]
    pub fn new(faces: impl IntoIterator<Item = u8>) -> Self {
        Self {
            faces: faces
                .into_iter()
                .map(|face| face.clamp(DIE_MIN, DIE_MAX))
                .collect(),
            cursor: 0,
        }
    }

    /// Script one pair per round, in order.
    #[must_use]
    pub fn from_pairs(pairs: &[(u8, u8)]) -> Self {
        Self::new(pairs.iter().flat_map(|&(first, second)| [first, second]))
    }

    /// Number of faces handed out so far.
    #[must_use]
    pub const fn rolls(&self) -> usize {
        self.cursor
    }
}

impl DiceSource for ScriptedDice {
    fn roll_die(&mut self) -> u8 {
        if self.faces.is_empty() {
            return DIE_MIN;
        }
        let face = self.faces[self.cursor % self.faces.len()];
        self.cursor += 1;
        face
    }
}

/// Parity of a dice total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Parity {
    Even,
    Odd,
}

impl Parity {
    #[must_use]
    pub const fn of(total: u8) -> Self {
        if total % 2 == 0 { Self::Even } else { Self::Odd }
    }
}

/// Two dice revealed together at the end of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DicePair {
    pub first: u8,
    pub second: u8,
}

impl DicePair {
    /// Build a pair from two faces, or `None` if either face is not a die face.
    #[must_use]
    pub fn new(first: u8, second: u8) -> Option<Self> {
        let faces = DIE_MIN..=DIE_MAX;
        (faces.contains(&first) && faces.contains(&second)).then_some(Self { first, second })
    }

    #[must_use]
    pub const fn total(self) -> u8 {
        self.first + self.second
    }

    #[must_use]
    pub const fn parity(self) -> Parity {
        Parity::of(self.total())
    }

    /// Whether this total pays the flat bonus.
    #[must_use]
    pub fn is_bonus(self) -> bool {
        BONUS_TOTALS.contains(&self.total())
    }

    /// Dealer's numeral names for both faces, e.g. `("SAN", "SHI")`.
    #[must_use]
    pub fn numeral_names(self) -> (&'static str, &'static str) {
        (numeral_name(self.first), numeral_name(self.second))
    }
}

/// Numeral name for one die face; out-of-range faces read as `"?"`.
#[must_use]
pub fn numeral_name(face: u8) -> &'static str {
    usize::from(face)
        .checked_sub(1)
        .and_then(|idx| NUMERAL_NAMES.get(idx))
        .copied()
        .unwrap_or("?")
}

/// Draw a fresh pair: two independent rolls from `source`.
pub fn draw_dice<D: DiceSource + ?Sized>(source: &mut D) -> DicePair {
    let first = source.roll_die().clamp(DIE_MIN, DIE_MAX);
    let second = source.roll_die().clamp(DIE_MIN, DIE_MAX);
    DicePair { first, second }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_dice_stay_on_the_die() {
        let mut dice = SeededDice::from_seed(1337);
        for _ in 0..1_000 {
            let face = dice.roll_die();
            assert!((DIE_MIN..=DIE_MAX).contains(&face), "face {face}");
        }
    }

    #[test]
    fn seeded_dice_are_reproducible() {
        let mut left = SeededDice::from_seed(42);
        let mut right = SeededDice::from_seed(42);
        let a: Vec<DicePair> = (0..20).map(|_| draw_dice(&mut left)).collect();
        let b: Vec<DicePair> = (0..20).map(|_| draw_dice(&mut right)).collect();
        assert_eq!(a, b);
        assert_eq!(left.seed(), Some(42));
    }

    #[test]
    fn seeded_dice_cover_every_face() {
        let mut dice = SeededDice::from_seed(7);
        let mut seen = [false; 6];
        for _ in 0..600 {
            seen[usize::from(dice.roll_die() - 1)] = true;
        }
        assert!(seen.iter().all(|hit| *hit));
    }

    #[test]
    fn entropy_dice_have_no_seed() {
        let dice = SeededDice::from_entropy();
        assert!(dice.seed().is_none());
    }

    #[test]
    fn scripted_dice_replay_and_cycle() {
        let mut dice = ScriptedDice::from_pairs(&[(1, 1), (3, 4)]);
        assert_eq!(draw_dice(&mut dice), DicePair::new(1, 1).unwrap());
        assert_eq!(draw_dice(&mut dice), DicePair::new(3, 4).unwrap());
        assert_eq!(draw_dice(&mut dice), DicePair::new(1, 1).unwrap());
        assert_eq!(dice.rolls(), 6);
    }

    #[test]
    fn scripted_dice_clamp_out_of_range_faces() {
        let mut dice = ScriptedDice::new([0, 9]);
        assert_eq!(dice.roll_die(), 1);
        assert_eq!(dice.roll_die(), 6);
        assert_eq!(ScriptedDice::default().roll_die(), DIE_MIN);
    }

    #[test]
    fn parity_follows_total() {
        for first in DIE_MIN..=DIE_MAX {
            for second in DIE_MIN..=DIE_MAX {
                let pair = DicePair::new(first, second).unwrap();
                let expected = if (first + second) % 2 == 0 {
                    Parity::Even
                } else {
                    Parity::Odd
                };
                assert_eq!(pair.parity(), expected);
            }
        }
    }

    #[test]
    fn bonus_only_on_two_and_seven() {
        let bonus_totals: Vec<u8> = (DIE_MIN..=DIE_MAX)
            .flat_map(|a| (DIE_MIN..=DIE_MAX).map(move |b| DicePair { first: a, second: b }))
            .filter(|pair| pair.is_bonus())
            .map(DicePair::total)
            .collect();
        assert!(bonus_totals.iter().all(|total| *total == 2 || *total == 7));
        // (1,1) plus the six ways to make seven
        assert_eq!(bonus_totals.len(), 7);
    }

    #[test]
    fn numeral_names_match_faces() {
        let pair = DicePair::new(3, 4).unwrap();
        assert_eq!(pair.numeral_names(), ("SAN", "SHI"));
        assert_eq!(numeral_name(1), "ICHI");
        assert_eq!(numeral_name(6), "ROKU");
        assert_eq!(numeral_name(0), "?");
        assert_eq!(numeral_name(7), "?");
    }

    #[test]
    fn pair_rejects_non_faces() {
        assert!(DicePair::new(0, 3).is_none());
        assert!(DicePair::new(2, 7).is_none());
    }
}
