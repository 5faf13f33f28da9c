/// Monte Carlo comparison of allocation strategies
/// Runs every strategy over the same seeded random scenarios and summarizes coverage

use serde::Serialize;
use tracing::info;
use crate::allocation::allocate;
use crate::error::ScenarioError;
use crate::metrics::compute_metrics;
use crate::scenario::{random_scenario, RandomScenarioParams};
use crate::strategy::Strategy;

/// Coverage statistics for one strategy and resource across all scenarios
#[derive(Debug, Clone, Serialize)]
pub struct CoverageStats {
    pub strategy: Strategy,
    pub resource: String,
    pub num_scenarios: usize,
    pub mean_coverage: f64,
    pub std_dev_coverage: f64,
    pub min_coverage: f64,
    pub max_coverage: f64,
    pub percentile_10: f64,
    pub percentile_50: f64, // Median
    pub percentile_90: f64,
    pub mean_fully_served: f64,
    pub mean_unserved: f64,
}

/// Run each strategy over `num_scenarios` random scenarios seeded from
/// `base_seed`, `base_seed + 1`, ... Strategies that don't support the
/// configured number of resources are skipped.
pub fn run_monte_carlo_comparison(
    params: &RandomScenarioParams,
    strategies: &[Strategy],
    num_scenarios: usize,
    base_seed: u64,
) -> Result<Vec<CoverageStats>, ScenarioError> {
    let scenarios = (0..num_scenarios as u64)
        .map(|i| random_scenario(params, base_seed.wrapping_add(i)))
        .collect::<Result<Vec<_>, _>>()?;

    let mut all_stats = Vec::new();

    for strategy in strategies.iter().filter(|s| s.supports_resources(params.resources.len())) {
        // samples[resource] = (coverage, fully served, unserved) per scenario
        let mut samples: Vec<Vec<(f64, usize, usize)>> = vec![Vec::with_capacity(num_scenarios); params.resources.len()];

        for scenario in &scenarios {
            let allocation = allocate(*strategy, &scenario.zones, &scenario.supply)?;
            let metrics = compute_metrics(&allocation, &scenario.supply);
            for (resource, m) in metrics.dimensions.iter().enumerate() {
                samples[resource].push((m.coverage_percent, m.fully_served, m.unserved));
            }
        }

        for (name, resource_samples) in params.resources.iter().zip(samples) {
            let stats = summarize(*strategy, name, &resource_samples);
            info!(
                strategy = %strategy,
                resource = %name,
                mean_coverage = stats.mean_coverage,
                "monte carlo summary"
            );
            all_stats.push(stats);
        }
    }

    Ok(all_stats)
}

fn summarize(strategy: Strategy, resource: &str, samples: &[(f64, usize, usize)]) -> CoverageStats {
    let mut coverages: Vec<f64> = samples.iter().map(|s| s.0).collect();
    coverages.sort_by(|a, b| a.total_cmp(b));

    let n = coverages.len();
    let mean_coverage = mean(coverages.iter().copied());
    let std_dev_coverage = mean(coverages.iter().map(|c| (c - mean_coverage).powi(2))).sqrt();

    let min_coverage = coverages.first().copied().unwrap_or(0.0);
    let max_coverage = coverages.last().copied().unwrap_or(0.0);

    // Calculate percentiles
    let percentile = |p: f64| {
        if n == 0 {
            return 0.0;
        }
        let index = ((p / 100.0) * (n as f64 - 1.0)).round() as usize;
        coverages[index.min(n - 1)]
    };

    CoverageStats {
        strategy,
        resource: resource.to_string(),
        num_scenarios: n,
        mean_coverage,
        std_dev_coverage,
        min_coverage,
        max_coverage,
        percentile_10: percentile(10.0),
        percentile_50: percentile(50.0),
        percentile_90: percentile(90.0),
        mean_fully_served: mean(samples.iter().map(|s| s.1 as f64)),
        mean_unserved: mean(samples.iter().map(|s| s.2 as f64)),
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Limits;

    #[test]
    fn test_comparison_covers_applicable_strategies() {
        let params = RandomScenarioParams::default();
        let stats = run_monte_carlo_comparison(&params, &Strategy::ALL, 20, 3).unwrap();

        assert_eq!(stats.len(), 3);
        for s in &stats {
            assert_eq!(s.num_scenarios, 20);
            assert!(s.min_coverage <= s.percentile_50 && s.percentile_50 <= s.max_coverage);
            assert!(s.max_coverage <= 100.0 + 1e-9);
            assert!(s.std_dev_coverage >= 0.0);
        }
    }

    #[test]
    fn test_two_resources_only_run_urgency() {
        let params = RandomScenarioParams {
            resources: vec!["food".to_string(), "water".to_string()],
            limits: Limits::two_resource(),
            ..RandomScenarioParams::default()
        };
        let stats = run_monte_carlo_comparison(&params, &Strategy::ALL, 5, 0).unwrap();

        assert_eq!(stats.len(), 2);
        assert!(stats.iter().all(|s| s.strategy == Strategy::Urgency));
        assert_eq!(stats[0].resource, "food");
        assert_eq!(stats[1].resource, "water");
    }

    #[test]
    fn test_same_seed_same_statistics() {
        let params = RandomScenarioParams::default();
        let a = run_monte_carlo_comparison(&params, &[Strategy::RoundRobin], 10, 42).unwrap();
        let b = run_monte_carlo_comparison(&params, &[Strategy::RoundRobin], 10, 42).unwrap();
        assert_eq!(a[0].mean_coverage, b[0].mean_coverage);
        assert_eq!(a[0].percentile_90, b[0].percentile_90);
    }

    #[test]
    fn test_no_scenarios_gives_zeroed_stats() {
        let stats = run_monte_carlo_comparison(&RandomScenarioParams::default(), &[Strategy::Urgency], 0, 1).unwrap();
        assert_eq!(stats[0].num_scenarios, 0);
        assert_eq!(stats[0].mean_coverage, 0.0);
    }
}
