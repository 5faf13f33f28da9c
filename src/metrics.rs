/// Coverage and fulfillment statistics derived from an allocation

use serde::Serialize;
use crate::models::{Allocation, Quantity, SupplyBudget};

/// Statistics for one resource dimension
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DimensionMetrics {
    pub resource: String,
    /// Zones whose demand was met in full (zero demand counts as met)
    pub fully_served: usize,
    pub partially_served: usize,
    /// Zones with positive demand that received nothing
    pub unserved: usize,
    pub total_demand: Quantity,
    pub total_sent: Quantity,
    /// 0 when there was no demand at all
    pub coverage_percent: f64,
    pub supply: Quantity,
    pub supply_used: Quantity,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Metrics {
    pub zone_count: usize,
    pub dimensions: Vec<DimensionMetrics>,
}

impl Metrics {
    pub fn dimension(&self, resource: &str) -> Option<&DimensionMetrics> {
        self.dimensions.iter().find(|d| d.resource == resource)
    }
}

/// Relative slack when comparing sent against demand
const MET_TOLERANCE: f64 = 1e-9;

/// A zone counts as fully served when the shortfall is only float rounding,
/// e.g. 0.2 demanded but 0.3 - 0.1 sent.
fn is_met(sent: Quantity, demand: Quantity) -> bool {
    demand - sent <= MET_TOLERANCE * demand.max(1.0)
}

/// Compute per-resource metrics for an allocation made against `supply`
pub fn compute_metrics(allocation: &Allocation, supply: &SupplyBudget) -> Metrics {
    let dimensions = allocation
        .resources
        .iter()
        .enumerate()
        .map(|(resource, name)| {
            let mut fully_served = 0;
            let mut partially_served = 0;
            let mut unserved = 0;
            let mut total_demand = 0.0;
            let mut total_sent = 0.0;

            for result in &allocation.results {
                let demand = result.demand_for(resource);
                let sent = result.sent_for(resource);
                total_demand += demand;
                total_sent += sent;

                if is_met(sent, demand) {
                    fully_served += 1;
                } else if sent > 0.0 {
                    partially_served += 1;
                } else {
                    unserved += 1;
                }
            }

            let coverage_percent = if total_demand > 0.0 {
                total_sent / total_demand * 100.0
            } else {
                0.0
            };

            DimensionMetrics {
                resource: name.clone(),
                fully_served,
                partially_served,
                unserved,
                total_demand,
                total_sent,
                coverage_percent,
                supply: supply.amount(resource),
                supply_used: total_sent,
            }
        })
        .collect();

    Metrics {
        zone_count: allocation.results.len(),
        dimensions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::allocate;
    use crate::models::Zone;
    use crate::strategy::Strategy;

    #[test]
    fn test_urgency_example_metrics() {
        let zones = vec![
            Zone::single(1, 40.0, 90.0, 10.0),
            Zone::single(2, 30.0, 60.0, 10.0),
            Zone::single(3, 50.0, 80.0, 10.0),
        ];
        let supply = SupplyBudget::single(60.0);
        let allocation = allocate(Strategy::Urgency, &zones, &supply).unwrap();
        let metrics = compute_metrics(&allocation, &supply);

        assert_eq!(metrics.zone_count, 3);
        let m = &metrics.dimensions[0];
        assert_eq!((m.fully_served, m.partially_served, m.unserved), (1, 1, 1));
        assert_eq!(m.total_demand, 120.0);
        assert_eq!(m.total_sent, 60.0);
        assert!((m.coverage_percent - 50.0).abs() < 1e-9);
        assert_eq!(m.supply, 60.0);
    }

    #[test]
    fn test_zero_demand_counts_as_fully_served() {
        let zones = vec![Zone::single(1, 0.0, 10.0, 0.0), Zone::single(2, 0.0, 5.0, 0.0)];
        let supply = SupplyBudget::single(0.0);
        let allocation = allocate(Strategy::Urgency, &zones, &supply).unwrap();
        let metrics = compute_metrics(&allocation, &supply);

        let m = &metrics.dimensions[0];
        assert_eq!(m.fully_served, 2);
        assert_eq!(m.unserved, 0);
        assert_eq!(m.coverage_percent, 0.0);
    }

    #[test]
    fn test_metrics_per_resource() {
        let zones = vec![
            Zone::new(1, vec![40.0, 20.0], 90.0, 10.0),
            Zone::new(2, vec![30.0, 30.0], 60.0, 10.0),
        ];
        let supply = SupplyBudget::default()
            .with_resource("food", 50.0)
            .with_resource("water", 100.0);
        let allocation = allocate(Strategy::Urgency, &zones, &supply).unwrap();
        let metrics = compute_metrics(&allocation, &supply);

        let food = metrics.dimension("food").unwrap();
        assert_eq!((food.fully_served, food.partially_served, food.unserved), (1, 1, 0));
        let water = metrics.dimension("water").unwrap();
        assert_eq!(water.fully_served, 2);
        assert_eq!(water.supply_used, 50.0);
        assert_eq!(water.coverage_percent, 100.0);
        assert!(metrics.dimension("fuel").is_none());
    }

    #[test]
    fn test_empty_allocation_metrics() {
        let supply = SupplyBudget::single(25.0);
        let allocation = allocate(Strategy::RoundRobin, &[], &supply).unwrap();
        let metrics = compute_metrics(&allocation, &supply);

        assert_eq!(metrics.zone_count, 0);
        assert_eq!(metrics.dimensions[0].total_demand, 0.0);
        assert_eq!(metrics.dimensions[0].coverage_percent, 0.0);
    }

    #[test]
    fn test_rounding_shortfall_counts_as_fully_served() {
        let zones = vec![Zone::single(1, 0.1, 0.0, 0.0), Zone::single(2, 0.2, 0.0, 0.0)];
        let supply = SupplyBudget::single(0.3);
        let allocation = allocate(Strategy::RoundRobin, &zones, &supply).unwrap();
        let metrics = compute_metrics(&allocation, &supply);

        let m = &metrics.dimensions[0];
        assert_eq!((m.fully_served, m.partially_served, m.unserved), (2, 0, 0));
    }

    #[test]
    fn test_real_shortfall_still_partial() {
        let zones = vec![Zone::single(1, 10.0, 0.0, 0.0)];
        let supply = SupplyBudget::single(9.999);
        let allocation = allocate(Strategy::Urgency, &zones, &supply).unwrap();
        let metrics = compute_metrics(&allocation, &supply);

        assert_eq!(metrics.dimensions[0].partially_served, 1);
    }
}
