use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use crate::error::AllocationError;

/// Allocation policy applied to a set of zones
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Neediest first: greedy fill in descending urgency
    Urgency,
    /// Largest requests first: greedy fill in descending demand
    Demand,
    /// Spread scarcity evenly, one unit per zone per pass
    RoundRobin,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Urgency, Strategy::Demand, Strategy::RoundRobin];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Urgency => "urgency",
            Strategy::Demand => "demand",
            Strategy::RoundRobin => "roundrobin",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Strategy::Urgency => "Urgency priority",
            Strategy::Demand => "Demand priority",
            Strategy::RoundRobin => "Round robin",
        }
    }

    /// Demand priority and round robin are defined for one resource only
    pub fn supports_resources(&self, resources: usize) -> bool {
        match self {
            Strategy::Urgency => true,
            Strategy::Demand | Strategy::RoundRobin => resources == 1,
        }
    }

    /// Strategies that can run against a budget with this many resources
    pub fn applicable(resources: usize) -> Vec<Strategy> {
        Strategy::ALL
            .iter()
            .copied()
            .filter(|s| s.supports_resources(resources))
            .collect()
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = AllocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "urgency" => Ok(Strategy::Urgency),
            "demand" => Ok(Strategy::Demand),
            "roundrobin" | "round-robin" => Ok(Strategy::RoundRobin),
            other => Err(AllocationError::UnknownStrategy(other.to_string())),
        }
    }
}
