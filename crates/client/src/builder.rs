//! Session builder.

use std::path::PathBuf;

use anyhow::{Context, Result};
use city_core::CityConfig;

use crate::config::SummaryFormat;
use crate::session::Session;

/// Builder for constructing a [`Session`] with validation.
///
/// # Design Principles
///
/// - **Required fields**: the scenario path must be provided
/// - **Optional fields**: city configuration and output format have defaults
/// - **Fail-fast validation**: missing required fields cause `build()` to fail
#[derive(Default)]
pub struct SessionBuilder {
    scenario: Option<PathBuf>,
    config: Option<CityConfig>,
    format: SummaryFormat,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scenario file (required).
    pub fn scenario(mut self, path: impl Into<PathBuf>) -> Self {
        self.scenario = Some(path.into());
        self
    }

    /// Set the city configuration (optional, defaults to [`CityConfig::default`]).
    pub fn config(mut self, config: CityConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn format(mut self, format: SummaryFormat) -> Self {
        self.format = format;
        self
    }

    /// Build the Session.
    ///
    /// # Errors
    ///
    /// Returns an error if the scenario path is not set.
    pub fn build(self) -> Result<Session> {
        let scenario = self
            .scenario
            .context("Scenario is required. Use .scenario() to set it.")?;

        Ok(Session {
            scenario,
            config: self.config.unwrap_or_default(),
            format: self.format,
        })
    }
}
