/// Input range checks applied before the allocation engine runs
/// Bounds are configurable; the two presets match the single-resource
/// (0-300) and food/water (0-100) input forms

use serde::{Deserialize, Serialize};
use tracing::warn;
use crate::error::ValidationError;
use crate::models::{SupplyBudget, Zone};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub max_demand: f64,
    pub max_urgency: f64,
    pub max_supply: f64,
    /// Distance is unbounded unless set
    pub max_distance: Option<f64>,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_demand: 300.0,
            max_urgency: 300.0,
            max_supply: 300.0,
            max_distance: None,
        }
    }
}

impl Limits {
    pub fn two_resource() -> Self {
        Self {
            max_demand: 100.0,
            max_urgency: 100.0,
            max_supply: 100.0,
            max_distance: None,
        }
    }

    /// Preset matching the number of resources in a budget
    pub fn for_resources(resources: usize) -> Self {
        if resources > 1 {
            Self::two_resource()
        } else {
            Self::default()
        }
    }
}

/// Check supply and zones against the limits.
/// Reports the first violation found: supply, then zone count, then each
/// zone's urgency, demands and distance in input order.
pub fn validate_request(
    zones: &[Zone],
    supply: &SupplyBudget,
    limits: &Limits,
) -> Result<(), ValidationError> {
    let result = check_request(zones, supply, limits);
    if let Err(err) = &result {
        warn!(error = %err, "rejected allocation request");
    }
    result
}

fn check_request(zones: &[Zone], supply: &SupplyBudget, limits: &Limits) -> Result<(), ValidationError> {
    for resource in &supply.resources {
        if !in_range(resource.amount, limits.max_supply) {
            return Err(ValidationError::SupplyOutOfRange {
                resource: resource.name.clone(),
                value: resource.amount,
                max: limits.max_supply,
            });
        }
    }

    if zones.is_empty() {
        return Err(ValidationError::NoZones);
    }

    for zone in zones {
        check_field(zone.id, "urgency", zone.urgency, limits.max_urgency)?;

        for (resource, demand) in supply.resources.iter().zip(&zone.demand) {
            check_field(zone.id, &format!("{} demand", resource.name), *demand, limits.max_demand)?;
        }

        let max_distance = limits.max_distance.unwrap_or(f64::MAX);
        check_field(zone.id, "distance", zone.distance, max_distance)?;
    }

    Ok(())
}

fn check_field(zone_id: i64, field: &str, value: f64, max: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite {
            zone_id,
            field: field.to_string(),
        });
    }
    if !in_range(value, max) {
        return Err(ValidationError::OutOfRange {
            zone_id,
            field: field.to_string(),
            value,
            max,
        });
    }
    Ok(())
}

fn in_range(value: f64, max: f64) -> bool {
    value.is_finite() && (0.0..=max).contains(&value)
}
