/// Error types for the allocation core and its input layer

use thiserror::Error;

/// Errors raised by the allocation engine for input outside its domain.
/// Negative and non-finite quantities are rejected rather than clamped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AllocationError {
    #[error("invalid input: {field} of zone {zone_id} is {value} (must be finite and non-negative)")]
    InvalidZoneValue {
        zone_id: i64,
        field: String,
        value: f64,
    },
    #[error("invalid input: supply of {resource} is {value} (must be finite and non-negative)")]
    InvalidSupply { resource: String, value: f64 },
    #[error("zone {zone_id} has {found} demand values but the budget has {expected} resources")]
    DimensionMismatch {
        zone_id: i64,
        expected: usize,
        found: usize,
    },
    #[error("supply budget has no resources")]
    EmptyBudget,
    #[error("strategy '{strategy}' supports a single resource, budget has {resources}")]
    UnsupportedDimensions { strategy: String, resources: usize },
    #[error("unknown strategy '{0}' (expected urgency, demand or roundrobin)")]
    UnknownStrategy(String),
}

/// Range-check failures reported by the input layer before the core runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("supply of {resource} must be between 0 and {max}, got {value}")]
    SupplyOutOfRange { resource: String, value: f64, max: f64 },
    #[error("please add at least one zone")]
    NoZones,
    #[error("{field} for zone {zone_id} must be between 0 and {max}, got {value}")]
    OutOfRange {
        zone_id: i64,
        field: String,
        value: f64,
        max: f64,
    },
    #[error("{field} for zone {zone_id} is not a finite number")]
    NotFinite { zone_id: i64, field: String },
}

/// Failures while loading, generating or running a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse scenario: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("scenario lists {resources} resources but {supplies} supply amounts")]
    SupplyMismatch { resources: usize, supplies: usize },
    #[error("invalid demand distribution: {0}")]
    Distribution(String),
    #[error("{name} must be a non-negative number, got {value}")]
    InvalidParameter { name: &'static str, value: f64 },
    #[error(transparent)]
    Allocation(#[from] AllocationError),
}
