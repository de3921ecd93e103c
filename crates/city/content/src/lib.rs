//! Scenario and configuration loaders.
//!
//! This crate turns data files into `city-core` values:
//! - Scenario files (whitespace-delimited `CITY`/`STREETS`/`RESOURCES`/`BUILDINGS` sections)
//! - City configuration (TOML)
//!
//! Loaders return [`loaders::LoadResult`]. Domain failures keep their
//! [`city_core::CityError`] in the error chain so callers can tell a rejected
//! scenario apart from an unreadable file.

pub mod loaders;

pub use loaders::{ConfigLoader, LoadResult, ScenarioLoader};
