mod common;
mod logic;
mod shell;

use anyhow::{Context, Result, bail};
use chohan_game::{SeededDice, Session};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write, stdin, stdout};
use std::path::PathBuf;
use std::time::Instant;

use common::split_csv;
use logic::{PolicyKind, RunRecord, aggregate_runs, resolve_seed_inputs, run_batch};
use shell::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Play at the console table
    Interactive,
    /// Run automated betting policies headlessly and report the results
    Simulate,
}

#[derive(Debug, Parser)]
#[command(name = "chohan", version)]
#[command(about = "Cho-Han: the traditional Japanese even-odd dice game")]
struct Args {
    /// Play interactively or simulate automated sessions
    #[arg(long, value_enum, default_value_t = Mode::Interactive)]
    mode: Mode,

    /// Fixed dice seed for a reproducible interactive session
    #[arg(long)]
    seed: Option<u64>,

    /// Seeds to simulate (comma-separated integers or words)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Betting policies to simulate (comma-separated: flat, half-purse, all-in)
    #[arg(long, default_value = "flat,half-purse,all-in")]
    policies: String,

    /// Sessions per seed and policy (simulate mode only)
    #[arg(long, default_value_t = 10)]
    iterations: u32,

    /// Round cap for a simulated session
    #[arg(long, default_value_t = 500)]
    max_rounds: u32,

    /// Stake used by the flat policy
    #[arg(long, default_value_t = 100)]
    flat_wager: u64,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Print every simulated run as it finishes
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.mode {
        Mode::Interactive => run_interactive(&args),
        Mode::Simulate => run_simulate(&args),
    }
}

fn run_interactive(args: &Args) -> Result<()> {
    let dice = args
        .seed
        .map_or_else(SeededDice::from_entropy, SeededDice::from_seed);
    info!("starting table with dice seed {:?}", dice.seed());
    let mut session = Session::new(dice);
    let mut table = Table::new(stdin().lock(), stdout().lock());
    table.play(&mut session)?;
    Ok(())
}

fn run_simulate(args: &Args) -> Result<()> {
    announce_banner();

    let start_time = Instant::now();
    let policies = parse_policies(&args.policies)?;
    let seeds = resolve_seed_inputs(&split_csv(&args.seeds))?;
    info!(
        "simulating {} policies over {} seeds x {} iterations",
        policies.len(),
        seeds.len(),
        args.iterations
    );

    let records = run_batch(
        &policies,
        &seeds,
        args.iterations,
        args.flat_wager,
        args.max_rounds,
    )
    .context("simulation run failed")?;

    if args.verbose {
        for record in &records {
            print_run(record);
        }
    }

    write_reports(args, &records, start_time)
}

fn announce_banner() {
    println!("{}", "🎲 Cho-Han Simulator".bright_cyan().bold());
    println!("{}", "====================".cyan());
}

fn parse_policies(raw: &str) -> Result<Vec<PolicyKind>> {
    let mut policies = Vec::new();
    for token in split_csv(raw) {
        if token.eq_ignore_ascii_case("all") {
            return Ok(PolicyKind::ALL.to_vec());
        }
        let Ok(policy) = PolicyKind::from_str(&token, true) else {
            bail!("Unknown policy: {token}");
        };
        if !policies.contains(&policy) {
            policies.push(policy);
        }
    }
    if policies.is_empty() {
        bail!("No betting policy selected");
    }
    Ok(policies)
}

fn print_run(record: &RunRecord) {
    println!(
        "🧪 {} seed {} #{}: {} rounds, {:.2} mon ({:?})",
        record.policy.bright_white(),
        record.seed_label,
        record.iteration,
        record.rounds,
        record.final_purse,
        record.ending
    );
}

fn write_reports(args: &Args, records: &[RunRecord], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;
    let aggregates = aggregate_runs(records);

    match args.report.as_str() {
        "json" => logic::reports::generate_json_report(&mut output_target, records, &aggregates)?,
        "markdown" => {
            logic::reports::generate_markdown_report(&mut output_target, records, &aggregates)?;
        }
        _ => {
            if records.is_empty() {
                writeln!(&mut output_target, "No simulated runs.")?;
            } else {
                logic::reports::generate_console_report(
                    &mut output_target,
                    records,
                    &aggregates,
                    start_time.elapsed(),
                )?;
            }
        }
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
