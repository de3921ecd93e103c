//! Deterministic city-builder rules and data types.
//!
//! `city-core` defines the simulation model (streets, buildings, resource
//! ledgers, the building registry) and exposes pure APIs reused by the
//! content loaders and the client. All city mutation flows through
//! [`city::City`]; buildings are created through [`registry::BuildingRegistry`]
//! or the typed [`Building::new`] constructor.
pub mod building;
pub mod city;
pub mod config;
pub mod error;
pub mod registry;
pub mod resources;
pub mod slot;
pub mod street;

pub use building::{
    Building, BuildingKind, BuildingType, Commercial, Factory, Park, Residential, UpgradeOutcome,
    Utility, live_buildings,
};
pub use city::{City, CitySummary, PassEntry, StepResult, StreetSummary, UpgradeReport};
pub use config::CityConfig;
pub use error::{CityError, CityResult, ErrorSeverity};
pub use registry::{BuildingRegistry, Constructor};
pub use resources::{Quantity, ResourcePool};
pub use slot::{SharedBuilding, Slot};
pub use street::{RoadType, Street};
