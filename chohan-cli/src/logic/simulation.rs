use chohan_game::{Ending, SeededDice, Session, SessionError};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::logic::policy::{BettingPolicy, PolicyKind};
use crate::logic::seeds::SeedInfo;

/// Configuration for one simulated session.
#[derive(Debug, Clone, Copy)]
pub struct SimulationConfig {
    pub seed: u64,
    pub policy: PolicyKind,
    pub flat_wager: u64,
    pub max_rounds: u32,
}

impl SimulationConfig {
    #[must_use]
    pub const fn new(policy: PolicyKind, seed: u64) -> Self {
        Self {
            seed,
            policy,
            flat_wager: 100,
            max_rounds: 500,
        }
    }

    #[must_use]
    pub const fn with_flat_wager(mut self, flat_wager: u64) -> Self {
        self.flat_wager = flat_wager;
        self
    }

    #[must_use]
    pub const fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunEnding {
    Depleted,
    RoundCap,
}

/// Outcome of one simulated session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub seed: u64,
    pub seed_label: String,
    pub iteration: u32,
    pub policy: String,
    pub rounds: u32,
    pub wins: u32,
    pub losses: u32,
    pub bonuses: u32,
    pub total_wagered: u64,
    pub fees_paid: f64,
    pub peak_purse: f64,
    pub final_purse: f64,
    pub ending: RunEnding,
}

/// Play one session to ruin or the round cap.
///
/// # Errors
///
/// Only if a policy stakes more than the purse covers.
pub fn run_simulation(
    config: SimulationConfig,
    label: &str,
    iteration: u32,
) -> Result<RunRecord, SessionError> {
    let run_seed = iteration_seed(config.seed, iteration);
    let mut session = Session::new(SeededDice::from_seed(run_seed));
    let mut policy = config.policy.create_policy(run_seed, config.flat_wager);

    while !session.is_over() && session.stats().rounds < config.max_rounds {
        play_round(&mut session, policy.as_mut())?;
    }

    let ending = match session.ending() {
        Some(Ending::Depleted) => RunEnding::Depleted,
        _ => RunEnding::RoundCap,
    };
    debug!(
        "{} seed {run_seed}: {ending:?} after {} rounds with {} mon",
        policy.name(),
        session.stats().rounds,
        session.purse()
    );

    let stats = session.stats();
    Ok(RunRecord {
        seed: config.seed,
        seed_label: label.to_string(),
        iteration,
        policy: config.policy.label().to_string(),
        rounds: stats.rounds,
        wins: stats.wins,
        losses: stats.losses,
        bonuses: stats.bonuses,
        total_wagered: stats.total_wagered,
        fees_paid: stats.fees_paid,
        peak_purse: stats.peak_purse,
        final_purse: session.purse(),
        ending,
    })
}

/// Run every policy over every seed, `iterations` times each.
///
/// # Errors
///
/// Propagates the first failing run.
pub fn run_batch(
    policies: &[PolicyKind],
    seeds: &[SeedInfo],
    iterations: u32,
    flat_wager: u64,
    max_rounds: u32,
) -> Result<Vec<RunRecord>, SessionError> {
    let mut records = Vec::new();
    for &policy in policies {
        for seed in seeds {
            let config = SimulationConfig::new(policy, seed.seed)
                .with_flat_wager(flat_wager)
                .with_max_rounds(max_rounds);
            for iteration in 0..iterations {
                records.push(run_simulation(config, &seed.label(), iteration)?);
            }
        }
    }
    Ok(records)
}

fn play_round(
    session: &mut Session<SeededDice>,
    policy: &mut (dyn BettingPolicy + Send),
) -> Result<(), SessionError> {
    let wager = policy.wager(session.purse(), session.max_wager());
    session.bet(wager)?;
    session.call(policy.call())?;
    Ok(())
}

fn iteration_seed(seed: u64, iteration: u32) -> u64 {
    seed ^ u64::from(iteration).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Per-policy rollup of simulated runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyAggregate {
    pub policy: String,
    pub runs: usize,
    pub depleted: usize,
    pub depletion_rate: f64,
    pub mean_rounds: f64,
    pub mean_final_purse: f64,
    pub total_fees: f64,
    pub bonus_rate: f64,
}

#[must_use]
pub fn aggregate_runs(records: &[RunRecord]) -> Vec<PolicyAggregate> {
    let mut order: Vec<&str> = Vec::new();
    for record in records {
        if !order.contains(&record.policy.as_str()) {
            order.push(&record.policy);
        }
    }

    order
        .into_iter()
        .map(|policy| {
            let runs: Vec<&RunRecord> = records.iter().filter(|r| r.policy == policy).collect();
            aggregate_policy(policy, &runs)
        })
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn aggregate_policy(policy: &str, runs: &[&RunRecord]) -> PolicyAggregate {
    let count = runs.len();
    let depleted = runs
        .iter()
        .filter(|r| r.ending == RunEnding::Depleted)
        .count();
    let rounds: u64 = runs.iter().map(|r| u64::from(r.rounds)).sum();
    let bonuses: u64 = runs.iter().map(|r| u64::from(r.bonuses)).sum();
    let mean = |total: f64| if count == 0 { 0.0 } else { total / count as f64 };
    let bonus_rate = if rounds == 0 {
        0.0
    } else {
        bonuses as f64 / rounds as f64
    };

    PolicyAggregate {
        policy: policy.to_string(),
        runs: count,
        depleted,
        depletion_rate: mean(depleted as f64),
        mean_rounds: mean(rounds as f64),
        mean_final_purse: mean(runs.iter().map(|r| r.final_purse).sum()),
        total_fees: runs.iter().map(|r| r.fees_paid).sum(),
        bonus_rate,
    }
}
