/// Reporting and output formatting module
/// Handles all console output: allocation tables, metrics, chart, diagram
/// and strategy comparisons

use serde::Serialize;

use crate::chart::BarChart;
use crate::diagram::network_diagram;
use crate::metrics::Metrics;
use crate::models::{Allocation, SupplyBudget, Zone};
use crate::monte_carlo::CoverageStats;
use crate::validation::Limits;

const CHART_WIDTH: usize = 40;

/// Display band for a zone's urgency
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UrgencyBand {
    Critical,
    High,
    Normal,
}

impl UrgencyBand {
    pub fn from_urgency(urgency: f64) -> Self {
        if urgency >= 80.0 {
            UrgencyBand::Critical
        } else if urgency >= 50.0 {
            UrgencyBand::High
        } else {
            UrgencyBand::Normal
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UrgencyBand::Critical => "CRITICAL",
            UrgencyBand::High => "HIGH",
            UrgencyBand::Normal => "normal",
        }
    }
}

/// Whole numbers without decimals, everything else with two
pub fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

pub fn display_header(title: &str) {
    println!("╔══════════════════════════════════════════════════════════════════════════════╗");
    println!("║ {:<76} ║", title);
    println!("╚══════════════════════════════════════════════════════════════════════════════╝\n");
}

/// Display camp supply and the zone network
pub fn display_scenario(zones: &[Zone], supply: &SupplyBudget) {
    println!("Camp supply:");
    for resource in &supply.resources {
        println!("  {}: {}", resource.name, format_quantity(resource.amount));
    }
    println!("\nRoad network:");
    print!("{}", network_diagram(zones));
    println!();
}

/// Display the per-zone allocation table and remaining supply
pub fn display_allocation(allocation: &Allocation) {
    println!("=== Allocation plan ({}) ===", allocation.strategy.description());

    let mut header = format!("{:>6} {:>8}", "Zone", "Urgency");
    for name in &allocation.resources {
        header.push_str(&format!(" {:>14} {:>14}", format!("{} demand", name), format!("{} sent", name)));
    }
    header.push_str("   Band");
    println!("{}", header);

    for result in &allocation.results {
        let mut row = format!("{:>6} {:>8}", result.id, format_quantity(result.urgency));
        for resource in 0..allocation.resources.len() {
            row.push_str(&format!(
                " {:>14} {:>14}",
                format_quantity(result.demand_for(resource)),
                format_quantity(result.sent_for(resource))
            ));
        }
        row.push_str(&format!("   {}", UrgencyBand::from_urgency(result.urgency).label()));
        println!("{}", row);
    }

    let remaining: Vec<String> = allocation
        .resources
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{}={}", name, format_quantity(allocation.remaining_for(i))))
        .collect();
    println!("Remaining at camp: {}\n", remaining.join(", "));
}

/// Display fulfillment counts and coverage per resource
pub fn display_metrics(metrics: &Metrics) {
    println!("Zones: {}", metrics.zone_count);
    for m in &metrics.dimensions {
        println!(
            "  {}: Fully served: {} | Partially served: {} | Not served: {}",
            m.resource, m.fully_served, m.partially_served, m.unserved
        );
        println!(
            "  {}: Demand met: {}/{} ({:.1}%) | Supply used: {}/{}",
            m.resource,
            format_quantity(m.total_sent),
            format_quantity(m.total_demand),
            m.coverage_percent,
            format_quantity(m.supply_used),
            format_quantity(m.supply)
        );
    }
    println!();
}

pub fn display_chart(chart: &BarChart) {
    println!("Demand vs. sent:");
    print!("{}", chart.render(CHART_WIDTH));
    println!();
}

/// Display metrics for several strategies run on the same scenario
pub fn display_comparison(runs: &[(Allocation, Metrics)]) {
    display_header("STRATEGY COMPARISON");

    for (allocation, metrics) in runs {
        println!("{}:", allocation.strategy.description());
        for m in &metrics.dimensions {
            println!(
                "  {:<8} coverage {:>5.1}% | fully {} | partial {} | none {} | order {:?}",
                m.resource,
                m.coverage_percent,
                m.fully_served,
                m.partially_served,
                m.unserved,
                allocation.order()
            );
        }
    }
    println!();
}

/// Display Monte Carlo coverage statistics, best mean coverage first
pub fn display_coverage_stats(mut stats: Vec<CoverageStats>) {
    display_header("MONTE CARLO RESULTS - ALL STRATEGIES");

    stats.sort_by(|a, b| b.mean_coverage.total_cmp(&a.mean_coverage));

    for (rank, s) in stats.iter().enumerate() {
        println!("{}. {} ({}), {} scenarios", rank + 1, s.strategy.description(), s.resource, s.num_scenarios);
        println!(
            "   Coverage: {:.1}% ± {:.1}% | Median: {:.1}% | Range: [{:.1}%, {:.1}%]",
            s.mean_coverage, s.std_dev_coverage, s.percentile_50, s.min_coverage, s.max_coverage
        );
        println!(
            "   10th-90th Percentile: [{:.1}%, {:.1}%] | Mean fully served: {:.2} | Mean not served: {:.2}\n",
            s.percentile_10, s.percentile_90, s.mean_fully_served, s.mean_unserved
        );
    }
}

/// Machine-readable form of one or more strategy runs on a scenario
#[derive(Serialize)]
struct RunReport<'a> {
    supply: &'a SupplyBudget,
    limits: &'a Limits,
    runs: Vec<StrategyRun<'a>>,
}

#[derive(Serialize)]
struct StrategyRun<'a> {
    allocation: &'a Allocation,
    metrics: &'a Metrics,
}

/// Pretty-printed JSON for `run` and `compare` output
pub fn runs_to_json(
    supply: &SupplyBudget,
    limits: &Limits,
    runs: &[(Allocation, Metrics)],
) -> serde_json::Result<String> {
    let report = RunReport {
        supply,
        limits,
        runs: runs
            .iter()
            .map(|(allocation, metrics)| StrategyRun { allocation, metrics })
            .collect(),
    };
    serde_json::to_string_pretty(&report)
}

pub fn coverage_stats_to_json(stats: &[CoverageStats]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::allocate;
    use crate::metrics::compute_metrics;
    use crate::scenario::Scenario;
    use crate::strategy::Strategy;

    #[test]
    fn test_urgency_bands() {
        assert_eq!(UrgencyBand::from_urgency(95.0), UrgencyBand::Critical);
        assert_eq!(UrgencyBand::from_urgency(80.0), UrgencyBand::Critical);
        assert_eq!(UrgencyBand::from_urgency(50.0), UrgencyBand::High);
        assert_eq!(UrgencyBand::from_urgency(49.9), UrgencyBand::Normal);
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(40.0), "40");
        assert_eq!(format_quantity(1.25), "1.25");
        assert_eq!(format_quantity(0.0), "0");
    }

    #[test]
    fn test_runs_to_json_carries_allocation_and_metrics() {
        let scenario = Scenario::sample_two_resource();
        let allocation = allocate(Strategy::Urgency, &scenario.zones, &scenario.supply).unwrap();
        let metrics = compute_metrics(&allocation, &scenario.supply);

        let json = runs_to_json(&scenario.supply, &scenario.limits, &[(allocation, metrics)]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["supply"]["resources"][1]["name"], "water");
        assert_eq!(value["limits"]["max_demand"], 100.0);

        let run = &value["runs"][0];
        assert_eq!(run["allocation"]["strategy"], "urgency");
        assert_eq!(run["allocation"]["results"][0]["id"], 1);
        assert_eq!(run["allocation"]["remaining"], serde_json::json!([0.0, 0.0]));
        assert_eq!(run["metrics"]["dimensions"][0]["resource"], "food");
        assert_eq!(run["metrics"]["zone_count"], 3);
    }
}
