mod fixtures;
mod policy;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use serde::Serialize;
use std::collections::BTreeMap;

use fixtures::{all_presets, preset_by_name};
use policy::{Operator, OperatorStyle};
use primordia_sim::{
    DriverSignal, MemoryArchive, MissionDriver, MissionSession, OperatorCommand,
};

const STEP_MS: u64 = 500;
const MAX_STEPS: u64 = 40_000;

#[derive(Debug, Parser)]
#[command(name = "primordia-tester", version = "0.1.0")]
#[command(about = "Headless QA harness for the Primordia capture-mission simulator")]
struct Args {
    /// Mission presets to run (comma-separated), or "all"
    #[arg(long, default_value = "all")]
    presets: String,

    /// List all available presets and exit
    #[arg(long)]
    list_presets: bool,

    /// First seed of the run range
    #[arg(long, default_value_t = 1_337)]
    seed_start: u64,

    /// Number of seeded runs per preset
    #[arg(long, default_value_t = 25)]
    runs: u64,

    /// Operator style for the scripted runs
    #[arg(long, value_enum, default_value_t = OperatorStyle::Cautious)]
    style: OperatorStyle,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "console"])]
    report: String,

    /// Verbose output (full mission logs for each run)
    #[arg(short, long)]
    verbose: bool,
}

/// Outcome of one seeded headless mission.
#[derive(Debug, Clone, Serialize)]
struct RunRecord {
    preset: String,
    seed: u64,
    status: String,
    success: bool,
    duration_seconds: u64,
    log_lines: usize,
    archived_records: usize,
}

#[derive(Debug, Default, Serialize)]
struct PresetSummary {
    runs: u64,
    captures: u64,
    statuses: BTreeMap<String, u64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.list_presets {
        for preset in all_presets() {
            println!("{:<16} {}", preset.name.bold(), preset.description);
        }
        return Ok(());
    }

    let presets = resolve_presets(&args.presets)?;
    println!(
        "{}",
        format!(
            "Primordia mission sweep: {} preset(s) x {} run(s), seeds from {}",
            presets.len(),
            args.runs,
            args.seed_start
        )
        .cyan()
        .bold()
    );

    let mut records = Vec::new();
    let mut summaries: BTreeMap<String, PresetSummary> = BTreeMap::new();

    for preset in &presets {
        for offset in 0..args.runs {
            let seed = args.seed_start + offset;
            let record = run_mission(preset, seed, args.style, args.verbose)
                .with_context(|| format!("preset {} seed {seed}", preset.name))?;
            let summary = summaries.entry(record.preset.clone()).or_default();
            summary.runs += 1;
            if record.success {
                summary.captures += 1;
            }
            *summary.statuses.entry(record.status.clone()).or_default() += 1;
            records.push(record);
        }
    }

    match args.report.as_str() {
        "json" => {
            let report = serde_json::json!({
                "records": records,
                "summaries": summaries,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => print_console_report(&records, &summaries),
    }

    Ok(())
}

fn resolve_presets(selection: &str) -> Result<Vec<fixtures::MissionPreset>> {
    if selection.eq_ignore_ascii_case("all") {
        return Ok(all_presets());
    }
    let mut presets = Vec::new();
    for name in selection.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        match preset_by_name(name) {
            Some(preset) => presets.push(preset),
            None => bail!("unknown preset: {name} (try --list-presets)"),
        }
    }
    if presets.is_empty() {
        bail!("no presets selected");
    }
    Ok(presets)
}

/// Drive one mission to its presented outcome on a simulated clock.
fn run_mission(
    preset: &fixtures::MissionPreset,
    seed: u64,
    style: OperatorStyle,
    verbose: bool,
) -> Result<RunRecord> {
    let plan = (preset.plan)();
    let session = MissionSession::launch(plan, seed, 0)
        .with_context(|| format!("launching preset {}", preset.name))?;
    let archive = MemoryArchive::new();
    let mut driver = MissionDriver::new(session, archive.clone(), 0);
    let mut operator = Operator::new(style, seed);

    let mut now = 0_u64;
    let mut presented = None;
    'steps: for _ in 0..MAX_STEPS {
        now += STEP_MS;
        let signals = driver.advance(now);
        for signal in signals {
            match signal {
                DriverSignal::OutcomePresented(status) => {
                    presented = Some(status);
                    break 'steps;
                }
                DriverSignal::EventRaised => {
                    let event = driver
                        .session()
                        .transit()
                        .and_then(|t| t.active_event())
                        .context("event signal without an active event")?;
                    let choice = operator.event_choice(event);
                    driver.command(OperatorCommand::ResolveEvent(choice), now)?;
                }
                DriverSignal::EngagementStarted | DriverSignal::DuckResolved => {
                    issue_orders(&mut driver, &mut operator, now)?;
                }
                DriverSignal::RepairReady | DriverSignal::TransitProgress(_) => {
                    log::debug!("seed {seed}: {signal:?}");
                }
            }
        }
    }

    let status = presented.context("mission never presented an outcome")?;
    let outcome = driver
        .session()
        .outcome()
        .context("presented outcome without a session outcome")?;

    if verbose {
        println!("{}", format!("--- {} / seed {seed} ---", preset.name).dimmed());
        for line in driver.session().log().entries() {
            println!("  {line}");
        }
    }
    log::info!(
        "preset {} seed {seed}: {} em {}s",
        preset.name,
        status,
        outcome.duration_seconds
    );

    Ok(RunRecord {
        preset: preset.name.to_string(),
        seed,
        status: status.as_str().to_string(),
        success: status.is_success(),
        duration_seconds: outcome.duration_seconds,
        log_lines: driver.session().log().len(),
        archived_records: archive.records().len(),
    })
}

/// Keep issuing orders while the drone holds the turn (capture failures can
/// leave it holding).
fn issue_orders(
    driver: &mut MissionDriver<MemoryArchive>,
    operator: &mut Operator,
    now: u64,
) -> Result<()> {
    for _ in 0..64 {
        let drone_holds_turn = driver
            .session()
            .engagement()
            .is_some_and(|e| e.turn() == primordia_sim::Side::Drone && e.outcome().is_none());
        if !drone_holds_turn {
            return Ok(());
        }
        let action = operator.next_action(driver.session());
        driver.command(OperatorCommand::Act(action), now)?;
    }
    bail!("operator spun without passing the turn");
}

fn print_console_report(records: &[RunRecord], summaries: &BTreeMap<String, PresetSummary>) {
    println!();
    for (name, summary) in summaries {
        let rate = if summary.runs > 0 {
            summary.captures * 100 / summary.runs
        } else {
            0
        };
        let headline = format!(
            "{name}: {}/{} capturas ({rate}%)",
            summary.captures, summary.runs
        );
        if summary.captures > 0 {
            println!("{}", headline.green().bold());
        } else {
            println!("{}", headline.yellow().bold());
        }
        for (status, count) in &summary.statuses {
            let line = format!("    {count:>3}x {status}");
            if status.starts_with("Sucesso") {
                println!("{}", line.green());
            } else {
                println!("{}", line.red());
            }
        }
    }
    let total_archived: usize = records.iter().map(|r| r.archived_records).sum();
    println!(
        "\n{} runs, {} archive records written",
        records.len(),
        total_archived
    );
}
