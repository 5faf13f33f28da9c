/// Scenario module
/// Loads zones and supply from JSON, provides the built-in sample camps,
/// and generates seeded random scenarios for strategy comparison

use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Normal;
use serde::Deserialize;
use crate::error::ScenarioError;
use crate::models::{Quantity, SupplyBudget, Zone, DEFAULT_RESOURCE};
use crate::validation::Limits;

/// Zones, supply and input limits for one allocation run
#[derive(Clone, Debug, PartialEq)]
pub struct Scenario {
    pub supply: SupplyBudget,
    pub zones: Vec<Zone>,
    pub limits: Limits,
}

/// A single number or one number per resource
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Amounts {
    One(Quantity),
    Many(Vec<Quantity>),
}

impl Amounts {
    fn into_vec(self) -> Vec<Quantity> {
        match self {
            Amounts::One(v) => vec![v],
            Amounts::Many(v) => v,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ZoneRecord {
    id: i64,
    demand: Amounts,
    urgency: f64,
    #[serde(default)]
    distance: f64,
}

#[derive(Debug, Deserialize)]
struct ScenarioFile {
    #[serde(default)]
    resources: Vec<String>,
    supply: Amounts,
    zones: Vec<ZoneRecord>,
    limits: Option<Limits>,
}

impl Scenario {
    /// Parse a scenario document. `resources` defaults to a single resource;
    /// `limits` defaults to the preset for the resource count.
    pub fn from_json_str(json: &str) -> Result<Self, ScenarioError> {
        let file: ScenarioFile = serde_json::from_str(json)?;

        let supplies = file.supply.into_vec();
        let resources = if file.resources.is_empty() && supplies.len() == 1 {
            vec![DEFAULT_RESOURCE.to_string()]
        } else {
            file.resources
        };

        if resources.len() != supplies.len() {
            return Err(ScenarioError::SupplyMismatch {
                resources: resources.len(),
                supplies: supplies.len(),
            });
        }

        let supply = resources
            .into_iter()
            .zip(supplies)
            .fold(SupplyBudget::default(), |budget, (name, amount)| budget.with_resource(name, amount));

        let zones = file
            .zones
            .into_iter()
            .map(|z| Zone::new(z.id, z.demand.into_vec(), z.urgency, z.distance))
            .collect();

        let limits = file.limits.unwrap_or_else(|| Limits::for_resources(supply.len()));

        Ok(Scenario { supply, zones, limits })
    }

    pub fn from_file(path: &Path) -> Result<Self, ScenarioError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// The default single-resource camp: three zones, 100 units of supply
    pub fn sample_single() -> Self {
        Scenario {
            supply: SupplyBudget::single(100.0),
            zones: vec![
                Zone::single(1, 40.0, 90.0, 10.0),
                Zone::single(2, 30.0, 60.0, 10.0),
                Zone::single(3, 50.0, 80.0, 10.0),
            ],
            limits: Limits::default(),
        }
    }

    /// The default food and water camp
    pub fn sample_two_resource() -> Self {
        Scenario {
            supply: SupplyBudget::default()
                .with_resource("food", 100.0)
                .with_resource("water", 50.0),
            zones: vec![
                Zone::new(1, vec![40.0, 20.0], 90.0, 10.0),
                Zone::new(2, vec![30.0, 30.0], 60.0, 10.0),
                Zone::new(3, vec![50.0, 10.0], 80.0, 10.0),
            ],
            limits: Limits::two_resource(),
        }
    }

    /// Replace every resource's supply amount, keeping names
    pub fn with_supply(mut self, amounts: &[Quantity]) -> Result<Self, ScenarioError> {
        if amounts.len() != self.supply.len() {
            return Err(ScenarioError::SupplyMismatch {
                resources: self.supply.len(),
                supplies: amounts.len(),
            });
        }
        for (resource, amount) in self.supply.resources.iter_mut().zip(amounts) {
            resource.amount = *amount;
        }
        Ok(self)
    }
}

/// Parameters for random scenario generation
#[derive(Clone, Debug)]
pub struct RandomScenarioParams {
    pub zone_count: usize,
    pub resources: Vec<String>,
    pub mean_demand: f64,
    pub std_dev_demand: f64,
    /// Supply per resource as a fraction of that resource's total demand
    pub supply_ratio: f64,
    pub limits: Limits,
}

impl Default for RandomScenarioParams {
    fn default() -> Self {
        Self {
            zone_count: 8,
            resources: vec![DEFAULT_RESOURCE.to_string()],
            mean_demand: 40.0,
            std_dev_demand: 15.0,
            supply_ratio: 0.6,
            limits: Limits::default(),
        }
    }
}

/// Generate a reproducible random scenario.
/// Demand is sampled per zone and resource from a normal distribution and
/// rounded to whole units within `[0, max_demand]`; urgency is uniform over
/// whole numbers in `[0, max_urgency]`.
pub fn random_scenario(params: &RandomScenarioParams, seed: u64) -> Result<Scenario, ScenarioError> {
    check_params(params)?;
    let mut rng = StdRng::seed_from_u64(seed);

    let normal = Normal::new(params.mean_demand, params.std_dev_demand)
        .map_err(|e| ScenarioError::Distribution(e.to_string()))?;

    let max_demand = params.limits.max_demand;
    let max_urgency = params.limits.max_urgency.max(0.0) as u32;
    let max_distance = params.limits.max_distance.unwrap_or(50.0).max(1.0) as u32;

    let zones: Vec<Zone> = (0..params.zone_count)
        .map(|i| {
            let demand = params
                .resources
                .iter()
                .map(|_| rng.sample(normal).max(0.0).min(max_demand).round())
                .collect();
            let urgency = rng.gen_range(0..=max_urgency) as f64;
            let distance = rng.gen_range(1..=max_distance) as f64;
            Zone::new(i as i64 + 1, demand, urgency, distance)
        })
        .collect();

    let supply = params
        .resources
        .iter()
        .enumerate()
        .fold(SupplyBudget::default(), |budget, (resource, name)| {
            let total: Quantity = zones.iter().map(|z| z.demand_for(resource)).sum();
            let amount = (total * params.supply_ratio).round().max(0.0).min(params.limits.max_supply);
            budget.with_resource(name.clone(), amount)
        });

    Ok(Scenario {
        supply,
        zones,
        limits: params.limits,
    })
}

fn check_params(params: &RandomScenarioParams) -> Result<(), ScenarioError> {
    let limits = &params.limits;
    let bounds = [
        ("supply_ratio", Some(params.supply_ratio)),
        ("max_demand", Some(limits.max_demand)),
        ("max_urgency", Some(limits.max_urgency)),
        ("max_supply", Some(limits.max_supply)),
        ("max_distance", limits.max_distance),
    ];

    for (name, value) in bounds {
        if let Some(value) = value {
            if value.is_nan() || value < 0.0 {
                return Err(ScenarioError::InvalidParameter { name, value });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_resource_scenario() {
        let json = r#"{
            "supply": 60,
            "zones": [
                {"id": 1, "demand": 40, "urgency": 90, "distance": 12},
                {"id": 2, "demand": 30, "urgency": 60}
            ]
        }"#;
        let scenario = Scenario::from_json_str(json).unwrap();

        assert_eq!(scenario.supply, SupplyBudget::single(60.0));
        assert_eq!(scenario.zones[0], Zone::single(1, 40.0, 90.0, 12.0));
        assert_eq!(scenario.zones[1].distance, 0.0);
        assert_eq!(scenario.limits, Limits::default());
    }

    #[test]
    fn test_parse_two_resource_scenario_with_limits() {
        let json = r#"{
            "resources": ["food", "water"],
            "supply": [80, 40],
            "limits": {"max_demand": 250},
            "zones": [{"id": 7, "demand": [200, 10], "urgency": 5}]
        }"#;
        let scenario = Scenario::from_json_str(json).unwrap();

        assert_eq!(scenario.supply.names(), vec!["food", "water"]);
        assert_eq!(scenario.zones[0].demand, vec![200.0, 10.0]);
        assert_eq!(scenario.limits.max_demand, 250.0);
        assert_eq!(scenario.limits.max_urgency, 300.0);
    }

    #[test]
    fn test_supply_count_must_match_resources() {
        let json = r#"{"resources": ["food", "water"], "supply": 80, "zones": []}"#;
        assert!(matches!(
            Scenario::from_json_str(json),
            Err(ScenarioError::SupplyMismatch { resources: 2, supplies: 1 })
        ));
    }

    #[test]
    fn test_malformed_json_reports_parse_error() {
        assert!(matches!(Scenario::from_json_str("{\"zones\": 3"), Err(ScenarioError::Parse(_))));
    }

    #[test]
    fn test_with_supply_overrides_amounts() {
        let scenario = Scenario::sample_two_resource().with_supply(&[10.0, 20.0]).unwrap();
        assert_eq!(scenario.supply.amounts(), vec![10.0, 20.0]);
        assert!(Scenario::sample_single().with_supply(&[1.0, 2.0]).is_err());
    }

    #[test]
    fn test_random_scenario_is_reproducible() {
        let params = RandomScenarioParams::default();
        let a = random_scenario(&params, 7).unwrap();
        let b = random_scenario(&params, 7).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_scenario_respects_limits() {
        let params = RandomScenarioParams {
            zone_count: 50,
            resources: vec!["food".to_string(), "water".to_string()],
            mean_demand: 90.0,
            std_dev_demand: 40.0,
            supply_ratio: 0.5,
            limits: Limits::two_resource(),
        };
        let scenario = random_scenario(&params, 11).unwrap();

        assert_eq!(scenario.zones.len(), 50);
        for zone in &scenario.zones {
            assert_eq!(zone.demand.len(), 2);
            assert!(zone.demand.iter().all(|d| (0.0..=100.0).contains(d)));
            assert!((0.0..=100.0).contains(&zone.urgency));
        }
        assert!(scenario.supply.amounts().iter().all(|s| (0.0..=100.0).contains(s)));
    }

    #[test]
    fn test_invalid_distribution_rejected() {
        let params = RandomScenarioParams {
            std_dev_demand: -1.0,
            ..RandomScenarioParams::default()
        };
        assert!(matches!(random_scenario(&params, 1), Err(ScenarioError::Distribution(_))));
    }

    #[test]
    fn test_bad_random_bounds_rejected() {
        let negative_supply = RandomScenarioParams {
            limits: Limits { max_supply: -5.0, ..Limits::default() },
            ..RandomScenarioParams::default()
        };
        assert!(matches!(
            random_scenario(&negative_supply, 3),
            Err(ScenarioError::InvalidParameter { name: "max_supply", .. })
        ));

        let nan_demand = RandomScenarioParams {
            limits: Limits { max_demand: f64::NAN, ..Limits::default() },
            ..RandomScenarioParams::default()
        };
        assert!(matches!(
            random_scenario(&nan_demand, 3),
            Err(ScenarioError::InvalidParameter { name: "max_demand", .. })
        ));

        let nan_ratio = RandomScenarioParams {
            supply_ratio: f64::NAN,
            ..RandomScenarioParams::default()
        };
        assert!(random_scenario(&nan_ratio, 3).is_err());
    }

    #[test]
    fn test_zero_supply_cap_gives_zero_supply() {
        let params = RandomScenarioParams {
            limits: Limits { max_supply: 0.0, ..Limits::default() },
            ..RandomScenarioParams::default()
        };
        let scenario = random_scenario(&params, 9).unwrap();
        assert_eq!(scenario.supply.amounts(), vec![0.0]);
    }
}
