//! Subcommand implementations.

use serde::Serialize;
use tether::{
    DisplayAdapter, Placement, PlacementCountersSnapshot, place_window, placement_counters_reset,
    placement_counters_snapshot,
    rules::{self, RulePlacement},
};
use tracing::info;

use crate::{cli::ScenarioArgs, error::Result, scenario::Scenario};

/// JSON shape printed by `--json`.
#[derive(Debug, Serialize)]
struct Report<'a, T: Serialize> {
    /// Subcommand that produced the result.
    command: &'a str,
    /// Strategy outcome; `null` when the rule-based strategy found nothing.
    result: Option<T>,
}

/// Print `result` as JSON or as a summary line.
fn emit<T: Serialize>(
    args: &ScenarioArgs,
    command: &str,
    result: Option<T>,
    summary: impl FnOnce(Option<&T>) -> String,
) -> Result<()> {
    if args.json {
        let report = Report { command, result };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", summary(result.as_ref()));
    }
    if args.counters {
        print_counters(&placement_counters_snapshot());
    }
    Ok(())
}

/// Print the global placement counters on one line.
fn print_counters(c: &PlacementCountersSnapshot) {
    println!(
        "counters: solves={} flipped=({},{}) clamped=({},{}) rule_solves={} rule_unsatisfied={} placed={} callbacks={} failures={}",
        c.solves,
        c.x.flipped,
        c.y.flipped,
        c.x.clamped,
        c.y.clamped,
        c.rule_solves,
        c.rule_unsatisfied,
        c.placed,
        c.callbacks,
        c.failures
    );
}

/// `solve`: the anchor solver against the scenario's bounds.
pub fn solve(args: &ScenarioArgs) -> Result<()> {
    let scenario = Scenario::load(&args.path)?;
    let (display, _) = scenario.display();
    let origin = display.resolve_absolute_origin(scenario.space)?;
    placement_counters_reset();
    let placement = tether::solve(&scenario.attach_params(), &scenario.solve_input(origin))?;
    info!(%placement, "solve complete");
    emit(args, "solve", Some(placement), |p| {
        p.map_or_else(String::new, Placement::to_string)
    })
}

/// `rules`: the rule-based strategy against the scenario's bounds.
pub fn rules(args: &ScenarioArgs) -> Result<()> {
    let scenario = Scenario::load(&args.path)?;
    let params = scenario.rule_params()?;
    placement_counters_reset();
    let chosen = rules::choose_position(&params, scenario.window, scenario.bounds.as_ref())?;
    info!(found = chosen.is_some(), "rules complete");
    emit(args, "rules", chosen, |p: Option<&RulePlacement>| match p {
        Some(p) => format!(
            "pos=({},{}) offset=({},{}) primary={} secondary={}",
            p.x, p.y, p.offset_x, p.offset_y, p.primary, p.secondary
        ),
        None => "no non-conflicting rule pair".to_string(),
    })
}

/// `place`: full placement on a virtual display.
pub fn place(args: &ScenarioArgs) -> Result<()> {
    let scenario = Scenario::load(&args.path)?;
    let (display, window) = scenario.display();
    let mut params = scenario.attach_params();
    params.set_position_callback(
        |ev| {
            info!(window = %ev.window, placement = %ev.placement, "position callback");
        },
        None,
    );
    placement_counters_reset();
    let placement = place_window(&display, &params, window)?;
    let moved_to = display.window_position(window);
    info!(%window, ?moved_to, "place complete");
    emit(args, "place", Some(placement), |p| {
        p.map_or_else(String::new, |p| format!("{window} {p}"))
    })
}
