//! Relief supply allocation.
//!
//! Distributes a camp's limited supply of one or more resources across demand
//! zones using one of three deterministic strategies, and derives coverage
//! metrics from the result. The CLI in `main.rs` is the presentation layer on
//! top of [`allocate`] and [`compute_metrics`].

pub mod allocation;
pub mod chart;
pub mod diagram;
pub mod error;
pub mod metrics;
pub mod models;
pub mod monte_carlo;
pub mod reporting;
pub mod scenario;
pub mod strategy;
pub mod validation;

pub use allocation::allocate;
pub use error::{AllocationError, ScenarioError, ValidationError};
pub use metrics::{compute_metrics, DimensionMetrics, Metrics};
pub use models::{Allocation, Quantity, ResourceBudget, SupplyBudget, Zone, ZoneResult};
pub use scenario::Scenario;
pub use strategy::Strategy;
pub use validation::{validate_request, Limits};
