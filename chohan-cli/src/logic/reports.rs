use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::io::Write;
use std::time::Duration;

use super::{PolicyAggregate, RunEnding, RunRecord};
use crate::common::report_timestamp;

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    aggregates: &'a [PolicyAggregate],
    runs: &'a [RunRecord],
}

pub fn generate_console_report(
    out: &mut impl Write,
    records: &[RunRecord],
    aggregates: &[PolicyAggregate],
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Simulation Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "=====================".cyan())?;
    writeln!(out, "Total runs: {}", records.len())?;
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for aggregate in aggregates {
        let rate = format!("{:.1}%", aggregate.depletion_rate * 100.0);
        let rate = if aggregate.depletion_rate > 0.5 {
            rate.red()
        } else {
            rate.green()
        };
        writeln!(out, "{}", aggregate.policy.bold())?;
        writeln!(
            out,
            "   Broke: {}/{} ({rate})",
            aggregate.depleted, aggregate.runs
        )?;
        writeln!(out, "   Mean rounds: {:.1}", aggregate.mean_rounds)?;
        writeln!(
            out,
            "   Mean final purse: {:.2} mon",
            aggregate.mean_final_purse
        )?;
        writeln!(out, "   House fees: {:.2} mon", aggregate.total_fees)?;
        writeln!(out, "   Bonus rate: {:.3}", aggregate.bonus_rate)?;
        writeln!(out)?;
    }

    if let Some(best) = records
        .iter()
        .max_by(|a, b| a.final_purse.total_cmp(&b.final_purse))
    {
        writeln!(out, "{}", "🎲 Best Run".bright_yellow().bold())?;
        writeln!(out, "{}", "==========".yellow())?;
        writeln!(
            out,
            "{} seed {} #{}: {:.2} mon after {} rounds",
            best.policy.green(),
            best.seed_label,
            best.iteration,
            best.final_purse,
            best.rounds
        )?;
    }
    Ok(())
}

pub fn generate_json_report(
    out: &mut impl Write,
    records: &[RunRecord],
    aggregates: &[PolicyAggregate],
) -> Result<()> {
    let report = JsonReport {
        generated_at: report_timestamp(),
        aggregates,
        runs: records,
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

pub fn generate_markdown_report(
    out: &mut impl Write,
    records: &[RunRecord],
    aggregates: &[PolicyAggregate],
) -> Result<()> {
    writeln!(out, "# Cho-Han Simulation Results\n")?;
    writeln!(out, "_Generated {}_\n", report_timestamp())?;

    writeln!(out, "## Summary\n")?;
    writeln!(out, "| Policy | Runs | Broke | Mean rounds | Mean final purse | House fees |")?;
    writeln!(out, "|---|---|---|---|---|---|")?;
    for aggregate in aggregates {
        writeln!(
            out,
            "| {} | {} | {:.1}% | {:.1} | {:.2} | {:.2} |",
            aggregate.policy,
            aggregate.runs,
            aggregate.depletion_rate * 100.0,
            aggregate.mean_rounds,
            aggregate.mean_final_purse,
            aggregate.total_fees
        )?;
    }

    writeln!(out, "\n## Runs\n")?;
    for record in records {
        let status = match record.ending {
            RunEnding::Depleted => "💸",
            RunEnding::RoundCap => "✅",
        };
        writeln!(
            out,
            "- {status} **{}** seed {} #{}: {} rounds, {} wins, {} bonuses, final purse {:.2}",
            record.policy,
            record.seed_label,
            record.iteration,
            record.rounds,
            record.wins,
            record.bonuses,
            record.final_purse
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::aggregate_runs;

    fn sample_record(policy: &str, ending: RunEnding, final_purse: f64) -> RunRecord {
        RunRecord {
            seed: 1,
            seed_label: "1".to_string(),
            iteration: 0,
            policy: policy.to_string(),
            rounds: 10,
            wins: 4,
            losses: 6,
            bonuses: 2,
            total_wagered: 1_000,
            fees_paid: 48.0,
            peak_purse: 5_200.0,
            final_purse,
            ending,
        }
    }

    fn sample() -> Vec<RunRecord> {
        vec![
            sample_record("Flat", RunEnding::RoundCap, 4_800.0),
            sample_record("All In", RunEnding::Depleted, 0.0),
        ]
    }

    #[test]
    fn console_report_lists_each_policy() {
        let records = sample();
        let aggregates = aggregate_runs(&records);
        let mut buffer = Vec::new();
        generate_console_report(&mut buffer, &records, &aggregates, Duration::ZERO).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("Simulation Summary"));
        assert!(text.contains("Total runs: 2"));
        assert!(text.contains("Flat"));
        assert!(text.contains("All In"));
        assert!(text.contains("4800.00 mon after 10 rounds"));
    }

    #[test]
    fn json_report_parses_back() {
        let records = sample();
        let aggregates = aggregate_runs(&records);
        let mut buffer = Vec::new();
        generate_json_report(&mut buffer, &records, &aggregates).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["runs"].as_array().unwrap().len(), 2);
        assert_eq!(value["runs"][1]["ending"], "depleted");
        assert_eq!(value["aggregates"][0]["policy"], "Flat");
        assert!(value["generated_at"].is_string());
    }

    #[test]
    fn markdown_report_has_table_and_runs() {
        let records = sample();
        let aggregates = aggregate_runs(&records);
        let mut buffer = Vec::new();
        generate_markdown_report(&mut buffer, &records, &aggregates).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("# Cho-Han Simulation Results"));
        assert!(text.contains("| Flat | 1 | 0.0% |"));
        assert!(text.contains("| All In | 1 | 100.0% |"));
        assert!(text.contains("💸 **All In**"));
    }
}
