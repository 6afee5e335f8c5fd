use chohan_game::{DicePair, Parity, SeededDice, draw_dice};
use std::convert::TryFrom;

const SAMPLE_SIZE: usize = 36_000;
const TOLERANCE: f64 = 0.015;

fn sample(seed: u64) -> Vec<DicePair> {
    let mut dice = SeededDice::from_seed(seed);
    (0..SAMPLE_SIZE).map(|_| draw_dice(&mut dice)).collect()
}

fn rate(hits: usize) -> f64 {
    let hits = u32::try_from(hits).expect("hits fit u32");
    let total = u32::try_from(SAMPLE_SIZE).expect("sample size fits u32");
    f64::from(hits) / f64::from(total)
}

#[test]
fn even_totals_come_up_half_the_time() {
    let pairs = sample(1234);
    let even = pairs.iter().filter(|p| p.parity() == Parity::Even).count();
    let observed = rate(even);
    assert!(
        (observed - 0.5).abs() < TOLERANCE,
        "observed even rate {observed:.4}"
    );
}

#[test]
fn bonus_rate_tracks_seven_in_thirty_six() {
    let pairs = sample(99);
    let bonus = pairs.iter().filter(|p| p.is_bonus()).count();
    let observed = rate(bonus);
    let expected = 7.0 / 36.0;
    assert!(
        (observed - expected).abs() < TOLERANCE,
        "observed bonus rate {observed:.4}, expected {expected:.4}"
    );
}

#[test]
fn each_face_is_uniform() {
    let pairs = sample(2024);
    let mut counts = [0usize; 6];
    for pair in &pairs {
        counts[usize::from(pair.first - 1)] += 1;
        counts[usize::from(pair.second - 1)] += 1;
    }
    for (face, count) in counts.iter().enumerate() {
        let observed = rate(*count) / 2.0;
        assert!(
            (observed - 1.0 / 6.0).abs() < TOLERANCE,
            "face {} observed {observed:.4}",
            face + 1
        );
    }
}
