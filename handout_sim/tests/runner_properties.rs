//! Property tests for the scenario runner.

use handout_core::SimulationConfig;
use handout_sim::scenarios::ScenarioId;
use handout_sim::ScenarioRunner;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_baseline_never_violates_conservation(
        agents in 1usize..50,
        wealth in 0u64..20,
        seed in any::<u64>(),
        ticks in 0u64..80,
    ) {
        let runner = ScenarioRunner::new(seed)
            .with_ticks(ticks)
            .with_config(SimulationConfig::new(agents, wealth));

        let result = runner.run(ScenarioId::Baseline).unwrap();

        prop_assert!(result.passed, "{:?}", result.failure_reason);
        prop_assert_eq!(result.metrics.conservation_violations, 0);
        prop_assert_eq!(result.final_stats.total, agents as u64 * wealth);
        prop_assert_eq!(result.total_ticks, ticks);
    }

    #[test]
    fn prop_pinned_scenarios_pass_for_any_seed(seed in any::<u64>()) {
        let runner = ScenarioRunner::new(seed).with_ticks(30);

        for scenario in [ScenarioId::SingleAgent, ScenarioId::Bankrupt, ScenarioId::ForcedRecipient] {
            let result = runner.run(scenario).unwrap();
            prop_assert!(result.passed, "{}: {:?}", scenario, result.failure_reason);
        }
    }
}

#[test]
fn test_export_interval_zero_is_clamped() {
    let runner = ScenarioRunner::new(1)
        .with_ticks(3)
        .with_export_interval(0)
        .with_config(SimulationConfig::new(4, 1));

    let (_, export) = runner.run_with_export(ScenarioId::Baseline).unwrap();
    let ticks: Vec<u64> = export.frames.iter().map(|f| f.tick).collect();

    assert_eq!(ticks, vec![0, 1, 2, 3]);
}
