/// Allocation engine
/// Distributes a supply budget across zones under a hard supply constraint.
/// Every resource dimension is filled independently of the others.

use std::cmp::Ordering;

use tracing::debug;
use crate::error::AllocationError;
use crate::models::{Allocation, Quantity, SupplyBudget, Zone, ZoneResult};
use crate::strategy::Strategy;

/// Run one strategy over the zones and supply budget.
/// The caller's zones are never modified; results are owned copies.
pub fn allocate(
    strategy: Strategy,
    zones: &[Zone],
    supply: &SupplyBudget,
) -> Result<Allocation, AllocationError> {
    check_inputs(zones, supply)?;

    if !strategy.supports_resources(supply.len()) {
        return Err(AllocationError::UnsupportedDimensions {
            strategy: strategy.to_string(),
            resources: supply.len(),
        });
    }

    let (results, remaining) = match strategy {
        Strategy::Urgency => greedy_fill(sort_by_priority(zones, |z| z.urgency), supply),
        Strategy::Demand => greedy_fill(sort_by_priority(zones, |z| z.demand_for(0)), supply),
        Strategy::RoundRobin => round_robin(zones, supply.amount(0)),
    };

    debug!(
        strategy = %strategy,
        zones = zones.len(),
        remaining = ?remaining,
        "allocation complete"
    );

    Ok(Allocation {
        strategy,
        resources: supply.names(),
        results,
        remaining,
    })
}

/// Reject quantities outside the engine's domain: negative or non-finite
/// values, and demand vectors that don't match the budget.
fn check_inputs(zones: &[Zone], supply: &SupplyBudget) -> Result<(), AllocationError> {
    if supply.is_empty() {
        return Err(AllocationError::EmptyBudget);
    }

    for resource in &supply.resources {
        if !is_valid_quantity(resource.amount) {
            return Err(AllocationError::InvalidSupply {
                resource: resource.name.clone(),
                value: resource.amount,
            });
        }
    }

    for zone in zones {
        if zone.demand.len() != supply.len() {
            return Err(AllocationError::DimensionMismatch {
                zone_id: zone.id,
                expected: supply.len(),
                found: zone.demand.len(),
            });
        }

        let demands = supply
            .resources
            .iter()
            .zip(&zone.demand)
            .map(|(r, d)| (format!("{} demand", r.name), *d));
        let fields = demands
            .chain([("urgency".to_string(), zone.urgency), ("distance".to_string(), zone.distance)]);

        for (field, value) in fields {
            if !is_valid_quantity(value) {
                return Err(AllocationError::InvalidZoneValue {
                    zone_id: zone.id,
                    field,
                    value,
                });
            }
        }
    }

    Ok(())
}

fn is_valid_quantity(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Copy the zones and stable-sort them by descending key.
/// Zones with equal keys keep their input order.
fn sort_by_priority<F>(zones: &[Zone], key: F) -> Vec<Zone>
where
    F: Fn(&Zone) -> f64,
{
    let mut sorted = zones.to_vec();
    sorted.sort_by(|a, b| key(b).partial_cmp(&key(a)).unwrap_or(Ordering::Equal));
    sorted
}

/// Walk the sorted zones once per resource, sending as much of each demand
/// as the remaining supply allows. Zones after exhaustion still get a row.
fn greedy_fill(sorted: Vec<Zone>, supply: &SupplyBudget) -> (Vec<ZoneResult>, Vec<Quantity>) {
    let mut results: Vec<ZoneResult> = sorted.iter().map(ZoneResult::from_zone).collect();
    let mut remaining = supply.amounts();

    for (resource, left) in remaining.iter_mut().enumerate() {
        for result in results.iter_mut() {
            let sent = result.demand[resource].min(*left);
            *left -= sent;
            result.sent[resource] = sent;

            debug!(zone = result.id, resource, sent, remaining = *left, "greedy grant");
        }
    }

    (results, remaining)
}

/// Grant one unit at a time, cycling through the zones in input order until
/// supply runs out or every demand is met. A grant never exceeds what the zone
/// still wants or what is left, so fractional amounts finish exactly.
///
/// Whenever every unmet zone still wants at least one more full cycle and the
/// supply covers it, the cycles are granted in one step. That gives the same
/// result as walking unit by unit and keeps large quantities from looping for
/// ever once a single unit no longer changes an `f64`.
fn round_robin(zones: &[Zone], supply: Quantity) -> (Vec<ZoneResult>, Vec<Quantity>) {
    let mut results: Vec<ZoneResult> = zones.iter().map(ZoneResult::from_zone).collect();
    let mut remaining = supply;

    if results.is_empty() {
        return (results, vec![remaining]);
    }

    let mut wanted: Vec<Quantity> = zones.iter().map(|z| z.demand_for(0)).collect();
    let mut hungry = wanted.iter().filter(|w| **w > 0.0).count();
    let mut cursor = 0;

    while remaining > 0.0 && hungry > 0 {
        let passes = full_passes(&wanted, remaining, hungry);
        if passes >= 1.0 {
            for w in wanted.iter_mut().filter(|w| **w > 0.0) {
                let grant = passes.min(*w).min(remaining);
                *w -= grant;
                remaining -= grant;
            }
            hungry = wanted.iter().filter(|w| **w > 0.0).count();
            debug!(passes, remaining, unmet_zones = hungry, "granted full round robin passes");
            continue;
        }

        if wanted[cursor] > 0.0 {
            let grant = wanted[cursor].min(remaining).min(1.0);
            wanted[cursor] -= grant;
            remaining -= grant;
            if wanted[cursor] <= 0.0 {
                hungry -= 1;
            }
        }

        cursor = (cursor + 1) % results.len();
    }

    for (result, left) in results.iter_mut().zip(&wanted) {
        result.sent[0] = if *left <= 0.0 { result.demand[0] } else { result.demand[0] - left };
    }

    debug!(remaining, unmet_zones = hungry, "round robin finished");

    (results, vec![remaining])
}

/// Whole cycles every unmet zone can take before one of them is nearly
/// satisfied or the supply can no longer feed a full cycle.
fn full_passes(wanted: &[Quantity], remaining: Quantity, hungry: usize) -> Quantity {
    let smallest = wanted
        .iter()
        .copied()
        .filter(|w| *w > 0.0)
        .fold(Quantity::INFINITY, Quantity::min);
    smallest.min(remaining / hungry as Quantity).floor()
}
