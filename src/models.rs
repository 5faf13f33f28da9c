/// Zone, supply budget and allocation result data structures
/// A single-resource run is a budget with exactly one resource dimension

use serde::Serialize;
use crate::strategy::Strategy;

/// Amount of a resource: demand, supply or quantity sent
pub type Quantity = f64;

/// Name used for the dimension of a single-resource budget
pub const DEFAULT_RESOURCE: &str = "supply";

/// A demand point requesting one amount per resource dimension
#[derive(Clone, Debug, PartialEq)]
pub struct Zone {
    pub id: i64,
    /// Indexed like the resources of the supply budget
    pub demand: Vec<Quantity>,
    /// Higher = more urgent; only used for ordering
    pub urgency: f64,
    /// Distance from camp; display only, never affects allocation
    pub distance: f64,
}

impl Zone {
    pub fn new(id: i64, demand: Vec<Quantity>, urgency: f64, distance: f64) -> Self {
        Zone { id, demand, urgency, distance }
    }

    /// Zone requesting a single resource
    pub fn single(id: i64, demand: Quantity, urgency: f64, distance: f64) -> Self {
        Zone::new(id, vec![demand], urgency, distance)
    }

    pub fn demand_for(&self, resource: usize) -> Quantity {
        self.demand.get(resource).copied().unwrap_or(0.0)
    }
}

/// Amount of one named resource available at the camp
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResourceBudget {
    pub name: String,
    pub amount: Quantity,
}

/// Supply available for one allocation run, one entry per resource dimension
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SupplyBudget {
    pub resources: Vec<ResourceBudget>,
}

impl SupplyBudget {
    /// Budget for a single unnamed resource
    pub fn single(amount: Quantity) -> Self {
        SupplyBudget::default().with_resource(DEFAULT_RESOURCE, amount)
    }

    pub fn with_resource(mut self, name: impl Into<String>, amount: Quantity) -> Self {
        self.resources.push(ResourceBudget { name: name.into(), amount });
        self
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.resources.iter().map(|r| r.name.clone()).collect()
    }

    pub fn amounts(&self) -> Vec<Quantity> {
        self.resources.iter().map(|r| r.amount).collect()
    }

    pub fn amount(&self, resource: usize) -> Quantity {
        self.resources.get(resource).map(|r| r.amount).unwrap_or(0.0)
    }
}

/// Allocation outcome for one zone
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ZoneResult {
    pub id: i64,
    pub demand: Vec<Quantity>,
    pub sent: Vec<Quantity>,
    pub urgency: f64,
    pub distance: f64,
}

impl ZoneResult {
    /// Owned copy of the zone with nothing sent yet
    pub fn from_zone(zone: &Zone) -> Self {
        ZoneResult {
            id: zone.id,
            demand: zone.demand.clone(),
            sent: vec![0.0; zone.demand.len()],
            urgency: zone.urgency,
            distance: zone.distance,
        }
    }

    pub fn demand_for(&self, resource: usize) -> Quantity {
        self.demand.get(resource).copied().unwrap_or(0.0)
    }

    pub fn sent_for(&self, resource: usize) -> Quantity {
        self.sent.get(resource).copied().unwrap_or(0.0)
    }
}

/// Result of one strategy invocation
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Allocation {
    pub strategy: Strategy,
    pub resources: Vec<String>,
    /// One row per input zone, in the order defined by the strategy
    pub results: Vec<ZoneResult>,
    /// Leftover supply per resource dimension
    pub remaining: Vec<Quantity>,
}

impl Allocation {
    pub fn total_sent(&self, resource: usize) -> Quantity {
        self.results.iter().map(|r| r.sent_for(resource)).sum()
    }

    pub fn remaining_for(&self, resource: usize) -> Quantity {
        self.remaining.get(resource).copied().unwrap_or(0.0)
    }

    pub fn result_for(&self, zone_id: i64) -> Option<&ZoneResult> {
        self.results.iter().find(|r| r.id == zone_id)
    }

    /// Zone ids in result order
    pub fn order(&self) -> Vec<i64> {
        self.results.iter().map(|r| r.id).collect()
    }
}
