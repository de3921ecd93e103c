//! City configuration loader.

use std::path::Path;

use city_core::CityConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for city configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`CityConfig::default`].
    ///
    /// ```toml
    /// economy_ticks = 3
    /// run_slot_demo = false
    /// ```
    pub fn load(path: &Path) -> LoadResult<CityConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CityConfig> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))
    }
}
