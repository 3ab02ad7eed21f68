//! Random Handout Simulator CLI
//!
//! Run seeded handout scenarios and optionally export frames for plotting.

use clap::Parser;
use handout_core::SimulationConfig;
use handout_sim::scenarios::ScenarioId;
use handout_sim::{sibling_seeds, ScenarioResult, ScenarioRunner, SimError};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Random handout wealth simulation CLI
#[derive(Parser, Debug)]
#[command(name = "handout-sim")]
#[command(about = "Simulate the random handout problem and check its invariants", long_about = None)]
struct Args {
    /// Master seed for determinism (0 = random from time)
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Number of agents in the baseline scenario
    #[arg(short, long, default_value = "100")]
    agents: usize,

    /// Initial wealth per agent in the baseline scenario
    #[arg(short, long, default_value = "100")]
    wealth: u64,

    /// Ticks to simulate per run
    #[arg(short, long, default_value = "1000")]
    ticks: u64,

    /// Scenario to run (single_agent, bankrupt, forced_recipient, baseline, all)
    #[arg(short = 'S', long, default_value = "all")]
    scenario: String,

    /// Number of consecutive seeds to test
    #[arg(long, default_value = "1")]
    seeds: usize,

    /// Export frames to a JSON file for visualization
    #[arg(long)]
    export: Option<String>,

    /// Export every N ticks
    #[arg(long, default_value = "10")]
    export_interval: u64,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// JSON output for CI parsing
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    if let Err(e) = run(args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), SimError> {
    let scenarios: Vec<ScenarioId> = if args.scenario == "all" {
        ScenarioId::all()
    } else {
        vec![args.scenario.parse()?]
    };

    let base_seed = if args.seed == 0 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(1)
    } else {
        args.seed
    };

    let baseline = SimulationConfig::new(args.agents, args.wealth);
    baseline.validate()?;

    if !args.json {
        info!("Random Handout Simulator v{}", env!("CARGO_PKG_VERSION"));
        info!(
            "agents={} wealth={} ticks={} seed={}",
            args.agents, args.wealth, args.ticks, base_seed
        );
    }

    // Handle --export mode for visualization
    if let Some(export_path) = &args.export {
        check_export_request(&scenarios, args.seeds)?;

        let runner = ScenarioRunner::new(base_seed)
            .with_ticks(args.ticks)
            .with_config(baseline)
            .with_export_interval(args.export_interval);

        let (result, export) = runner.run_with_export(scenarios[0])?;
        export.write_to_file(export_path)?;
        info!("Exported {} frames to {}", export.frames.len(), export_path);

        report(&result, args.json);
        if !result.passed {
            return Err(SimError::ScenariosFailed { failed: 1, total: 1 });
        }
        return Ok(());
    }

    let mut all_results: Vec<ScenarioResult> = Vec::new();

    for seed in sibling_seeds(base_seed, args.seeds) {
        let runner = ScenarioRunner::new(seed)
            .with_ticks(args.ticks)
            .with_config(baseline);

        for scenario in &scenarios {
            let result = runner.run(*scenario)?;
            if !args.json {
                report(&result, false);
            }
            all_results.push(result);
        }
    }

    let total = all_results.len();
    let failed: Vec<&ScenarioResult> = all_results.iter().filter(|r| !r.passed).collect();

    if args.json {
        let summary = serde_json::json!({
            "total": total,
            "passed": total - failed.len(),
            "failed": failed.len(),
            "results": all_results.iter().map(result_json).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else if failed.is_empty() {
        info!("All {} scenario runs passed", total);
    } else {
        error!("{}/{} scenario runs failed", failed.len(), total);
        for result in &failed {
            error!(
                "  - {} seed={}: {}",
                result.scenario,
                result.seed,
                result.failure_reason.as_deref().unwrap_or("unknown")
            );
        }
    }

    if !failed.is_empty() {
        return Err(SimError::ScenariosFailed {
            failed: failed.len(),
            total,
        });
    }
    Ok(())
}

/// An export holds exactly one run.
fn check_export_request(scenarios: &[ScenarioId], seeds: usize) -> Result<(), SimError> {
    if scenarios.len() != 1 {
        return Err(SimError::InvalidArguments(
            "--export only supports a single scenario, not 'all'".to_string(),
        ));
    }
    if seeds != 1 {
        return Err(SimError::InvalidArguments(format!(
            "--export records a single seed, got --seeds {}",
            seeds
        )));
    }
    Ok(())
}

fn report(result: &ScenarioResult, json: bool) {
    if json {
        println!("{}", result_json(result));
    } else if result.passed {
        info!(
            "✓ {} (seed={}) PASSED | gini={:.3} top10%={:.1}% broke={}",
            result.scenario,
            result.seed,
            result.final_stats.gini,
            result.final_stats.top_decile_share * 100.0,
            result.final_stats.zero_count
        );
    } else {
        error!(
            "✗ {} (seed={}) FAILED: {}",
            result.scenario,
            result.seed,
            result.failure_reason.as_deref().unwrap_or("unknown")
        );
    }
}

fn result_json(result: &ScenarioResult) -> serde_json::Value {
    serde_json::json!({
        "scenario": result.scenario.name(),
        "seed": result.seed,
        "passed": result.passed,
        "ticks": result.total_ticks,
        "total_wealth": result.total_wealth,
        "gini": result.final_stats.gini,
        "variance": result.final_stats.variance,
        "units_transferred": result.metrics.units_transferred,
        "failure_reason": result.failure_reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_single_run_accepted() {
        assert!(check_export_request(&[ScenarioId::Baseline], 1).is_ok());
    }

    #[test]
    fn test_export_rejects_all_scenarios() {
        let err = check_export_request(&ScenarioId::all(), 1).unwrap_err();
        assert!(matches!(err, SimError::InvalidArguments(_)));
    }

    #[test]
    fn test_export_rejects_multiple_seeds() {
        let err = check_export_request(&[ScenarioId::Baseline], 5).unwrap_err();

        assert!(matches!(err, SimError::InvalidArguments(_)));
        assert!(err.to_string().contains("--seeds 5"));
    }

    #[test]
    fn test_args_parse_defaults() {
        let args = Args::try_parse_from(["handout-sim"]).unwrap();

        assert_eq!(args.seed, 42);
        assert_eq!(args.agents, 100);
        assert_eq!(args.seeds, 1);
        assert!(args.export.is_none());
    }
}
