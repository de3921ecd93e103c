//! One simulation run over a scenario file.
//!
//! The run follows a fixed script:
//! 1. load the scenario and print the initial state
//! 2. upgrade everything, then residential buildings only
//! 3. run the configured number of economy ticks
//! 4. optionally walk through shared slots and a direct insert
//! 5. copy the city, change the copy's money and print it

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use city_content::{ConfigLoader, ScenarioLoader};
use city_core::{
    Building, City, CityConfig, CityError, CitySummary, Residential, ResourcePool, Slot,
    UpgradeReport,
};
use tracing::info;

use crate::builder::SessionBuilder;
use crate::config::{ClientConfig, SummaryFormat};

/// Money the copied city is given to show it is independent.
const COPY_MONEY: i64 = 500;

/// Exit code when the simulation rejected the input or a building.
pub const EXIT_CITY_ERROR: u8 = 1;
/// Exit code for I/O, configuration and setup failures.
pub const EXIT_FAILURE: u8 = 2;

/// Maps a failed run to its process exit code.
///
/// Any [`CityError`] in the chain, even under added context, counts as a
/// simulation error.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    match city_error(err) {
        Some(_) => EXIT_CITY_ERROR,
        None => EXIT_FAILURE,
    }
}

/// First [`CityError`] in the error chain.
pub fn city_error(err: &anyhow::Error) -> Option<&CityError> {
    err.chain().find_map(|cause| cause.downcast_ref::<CityError>())
}

#[derive(Debug)]
pub struct Session {
    pub(crate) scenario: PathBuf,
    pub(crate) config: CityConfig,
    pub(crate) format: SummaryFormat,
}

impl Session {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    /// Resolves the city configuration (file, then overrides) for `client`.
    pub fn from_client_config(client: &ClientConfig) -> Result<Self> {
        let mut config = match &client.config_file {
            Some(path) => ConfigLoader::load(path)?,
            None => CityConfig::default(),
        };
        if let Some(ticks) = client.economy_ticks {
            config.economy_ticks = ticks;
        }
        if let Some(demo) = client.run_slot_demo {
            config.run_slot_demo = demo;
        }

        Self::builder()
            .scenario(&client.input)
            .config(config)
            .format(client.format)
            .build()
    }

    pub fn scenario(&self) -> &Path {
        &self.scenario
    }

    pub fn config(&self) -> &CityConfig {
        &self.config
    }

    /// Runs the script, writing progress to `out`. Returns the final city.
    pub fn run<W: Write>(&self, out: &mut W) -> Result<City> {
        let mut city = ScenarioLoader::load(&self.scenario)?;

        writeln!(out, "--- INITIAL CITY STATE ---")?;
        self.write_summary(out, &city.summary())?;

        writeln!(out, "\n--- Upgrading all buildings ---")?;
        let report = city.upgrade_all_buildings()?;
        write_report(out, &report)?;

        writeln!(out, "\n--- Upgrading residential buildings only ---")?;
        let report = city.upgrade_residential_only()?;
        write_report(out, &report)?;

        writeln!(out, "\n--- CITY STATE AFTER UPGRADES ---")?;
        self.write_summary(out, &city.summary())?;
        writeln!(out, "Total capacity: {}", city.total_capacity())?;

        for tick in 1..=self.config.economy_ticks {
            writeln!(out, "\n--- ECONOMY TICK {tick} ---")?;
            let report = city.economy_tick()?;
            write_report(out, &report)?;
            writeln!(
                out,
                "Money={}, factories run={}",
                city.money(),
                report.produced()
            )?;
        }

        if self.config.run_slot_demo {
            self.slot_walkthrough(out, &mut city)?;
        }

        let mut copy = city.clone();
        copy.set_money(COPY_MONEY);
        writeln!(out, "\n--- COPIED CITY ---")?;
        self.write_summary(out, &copy.summary())?;

        info!(
            target: "city::session",
            city = city.name(),
            money = city.money(),
            capacity = city.total_capacity(),
            "Session finished"
        );
        Ok(city)
    }

    /// Shared slots upgraded from a side budget, then a direct insert.
    fn slot_walkthrough<W: Write>(&self, out: &mut W, city: &mut City) -> Result<()> {
        let needs = BTreeMap::from([("wood".to_string(), 5), ("stone".to_string(), 2)]);
        let mut extra_resources = ResourcePool::new();
        for (name, qty) in &needs {
            extra_resources.add(name, *qty)?;
        }
        let mut extra_money: i64 = 50;

        let home = Building::new("SlotHome", 1, Residential::new(5, needs.clone(), 10))?
            .with_street(city.street(0).cloned());
        let first = Slot::with_building(home);

        writeln!(out, "\nSlot1 info: {first}")?;
        writeln!(out, "Slot1 capacity: {}", first.capacity())?;
        first.upgrade(&mut extra_resources, &mut extra_money)?;
        writeln!(
            out,
            "After upgrade, Slot1 capacity: {}, extraMoney={}",
            first.capacity(),
            extra_money
        )?;

        let mut second = Slot::default();
        second.set_building(first.building());
        writeln!(out, "\nSlot2 info (shared with Slot1): {second}")?;
        writeln!(out, "Slot2 capacity: {}", second.capacity())?;

        let extra = Building::new("ExtraHome", 1, Residential::new(3, needs, 5))?
            .with_street(city.street(0).cloned());
        city.add_building_direct(extra)?;

        writeln!(out, "\n--- CITY STATE AFTER DIRECT INSERT ---")?;
        self.write_summary(out, &city.summary())?;
        writeln!(out, "Total capacity after ExtraHome: {}", city.total_capacity())?;
        Ok(())
    }

    fn write_summary<W: Write>(&self, out: &mut W, summary: &CitySummary) -> Result<()> {
        match self.format {
            SummaryFormat::Text => write!(out, "{summary}")?,
            SummaryFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(summary)?)?,
        }
        Ok(())
    }
}

fn write_report<W: Write>(out: &mut W, report: &UpgradeReport) -> Result<()> {
    for name in report.upgraded() {
        writeln!(out, "Upgraded {name}")?;
    }
    for (name, err) in report.failures() {
        writeln!(out, "Resource error while upgrading {name}: {err}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_file(text: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    const TOWN: &str = "\
CITY Town 100
STREETS 1
STREET 1 3 1 2 3
RESOURCES 2
RESOURCE wood 10
RESOURCE stone 5
BUILDINGS 2
BUILDING residential Home 0 0
BUILDING factory Mill 0 3 wood 20 30
";

    fn session(file: &tempfile::NamedTempFile, config: CityConfig) -> Session {
        Session::builder()
            .scenario(file.path())
            .config(config)
            .build()
            .unwrap()
    }

    #[test]
    fn full_script_runs() {
        let file = scenario_file(TOWN);
        let mut out = Vec::new();

        let city = session(&file, CityConfig::default()).run(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("--- INITIAL CITY STATE ---"));
        assert!(text.contains("Upgraded Home"));
        // the residential-only pass finds no materials left
        assert!(text.contains("Resource error while upgrading Home: insufficient resource"));
        assert!(text.contains("After upgrade, Slot1 capacity: 10, extraMoney=60"));
        assert!(text.contains("Slot2 capacity: 10"));
        assert!(text.contains("--- COPIED CITY ---"));
        assert!(text.contains("City: Town (Money=500,"));

        assert_eq!(city.money(), 120);
        assert_eq!(city.building_count(), 3);
    }

    #[test]
    fn economy_ticks_run_factories() {
        let file = scenario_file(TOWN);
        let mut config = CityConfig::with_economy_ticks(2);
        config.run_slot_demo = false;
        let mut out = Vec::new();

        let city = session(&file, config).run(&mut out).unwrap();

        // 120 after upgrades, two production rounds at 30 each
        assert_eq!(city.money(), 60);
        assert_eq!(city.production_stats().get("wood"), 40);
        assert_eq!(city.building_count(), 2);
    }

    #[test]
    fn json_summaries() {
        let file = scenario_file(TOWN);
        let mut config = CityConfig::default();
        config.run_slot_demo = false;
        let session = Session::builder()
            .scenario(file.path())
            .config(config)
            .format(SummaryFormat::Json)
            .build()
            .unwrap();
        let mut out = Vec::new();

        session.run(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\"name\": \"Town\""));
        assert!(text.contains("\"max_buildings\": 6"));
    }

    #[test]
    fn domain_failure_surfaces_city_error() {
        let file = scenario_file("CITY Town 100\nSTREET 1\n");
        let mut out = Vec::new();

        let err = session(&file, CityConfig::default())
            .run(&mut out)
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CityError>(),
            Some(CityError::InvalidInput(_))
        ));
    }

    #[test]
    fn client_overrides_reach_city_config() {
        let client = ClientConfig {
            economy_ticks: Some(4),
            run_slot_demo: Some(false),
            ..ClientConfig::default()
        };
        let session = Session::from_client_config(&client).unwrap();
        assert_eq!(session.config().economy_ticks, 4);
        assert!(!session.config().run_slot_demo);
        assert_eq!(session.scenario(), Path::new(ClientConfig::DEFAULT_INPUT));
    }

    #[test]
    fn unknown_building_exits_with_city_error() {
        let file = scenario_file(
            "CITY Town 10 STREETS 1 STREET 1 1 7 RESOURCES 0 \
             BUILDINGS 1 BUILDING castle Keep 0 0",
        );
        let mut out = Vec::new();

        let err = session(&file, CityConfig::default())
            .run(&mut out)
            .unwrap_err();
        assert_eq!(exit_code(&err), EXIT_CITY_ERROR);
        assert_eq!(
            city_error(&err),
            Some(&CityError::UnknownType("castle".into()))
        );
    }

    #[test]
    fn missing_scenario_exits_with_failure() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::builder()
            .scenario(dir.path().join("missing.txt"))
            .build()
            .unwrap();
        let mut out = Vec::new();

        let err = session.run(&mut out).unwrap_err();
        assert_eq!(exit_code(&err), EXIT_FAILURE);
        assert!(city_error(&err).is_none());
    }

    #[test]
    fn bad_config_file_exits_with_failure() {
        let mut config = tempfile::NamedTempFile::new().unwrap();
        config.write_all(b"economy_ticks = \"many\"").unwrap();
        let client = ClientConfig {
            config_file: Some(config.path().to_path_buf()),
            ..ClientConfig::default()
        };

        let err = Session::from_client_config(&client).err().unwrap();
        assert_eq!(exit_code(&err), EXIT_FAILURE);
    }
}
