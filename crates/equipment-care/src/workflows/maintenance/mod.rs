//! Status derivation, service scheduling, and alerting for the equipment fleet.
//!
//! Everything in here is synchronous and takes `now` explicitly; the HTTP router is the
//! only place a [`crate::clock::Clock`] is consulted.

pub mod catalog;
pub mod domain;
pub mod export;
pub mod generator;
pub mod report;
pub mod router;
pub mod schedule;
pub mod status;

pub use catalog::{recommendations_for_product, MaintenanceCatalog};
pub use domain::{
    Contact, Contractor, HealthStatus, Location, MaintenanceRecommendation, MaintenanceRecord,
    MaintenanceType, PerformanceMetrics, Product, ProductType, ValidationError,
};
pub use export::{write_fleet_csv, ExportError};
pub use generator::{fleet_rng, generate_fixture, FleetSnapshot};
pub use report::{
    maintenance_tasks, products_for_contractor, products_for_installer, FleetSummary,
    MaintenanceTask, PredictiveSummary,
};
pub use router::{fleet_router, FleetState};
pub use schedule::{calculate_next_maintenance, MaintenanceProjection};
pub use status::{determine_health_status, generate_alert_message};
