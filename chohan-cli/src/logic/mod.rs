pub mod policy;
pub mod reports;
pub mod seeds;
pub mod simulation;

pub use policy::PolicyKind;
pub use seeds::resolve_seed_inputs;
pub use simulation::{PolicyAggregate, RunEnding, RunRecord, aggregate_runs, run_batch};
