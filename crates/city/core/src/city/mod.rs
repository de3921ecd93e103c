//! City aggregate: streets, ledgers, money and the building list.
//!
//! The city owns its buildings exclusively. Cloning a city deep-copies every
//! building; streets are immutable once added and are shared between copies.
//!
//! Bulk passes ([`City::upgrade_all_buildings`], [`City::upgrade_residential_only`],
//! [`City::economy_tick`]) visit buildings in insertion order. A building that
//! fails with [`CityError::InsufficientResource`] is logged, recorded in the
//! returned [`UpgradeReport`] and skipped; any other error aborts the pass.
//! Buildings visited before the abort keep their upgrades.

mod report;
mod summary;

use std::sync::Arc;

use tracing::{debug, info, warn};

pub use report::{PassEntry, StepResult, UpgradeReport};
pub use summary::{CitySummary, StreetSummary};

use crate::building::{Building, live_buildings};
use crate::config::CityConfig;
use crate::error::{CityError, CityResult};
use crate::registry::BuildingRegistry;
use crate::resources::ResourcePool;
use crate::street::Street;

#[derive(Clone, Debug, PartialEq)]
pub struct City {
    name: String,
    money: i64,
    resources: ResourcePool<i32>,
    production_stats: ResourcePool<i64>,
    streets: Vec<Arc<Street>>,
    buildings: Vec<Building>,
}

impl City {
    pub fn new(name: impl Into<String>, starting_money: i64) -> Self {
        Self {
            name: name.into(),
            money: starting_money,
            resources: ResourcePool::new(),
            production_stats: ResourcePool::new(),
            streets: Vec::new(),
            buildings: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn money(&self) -> i64 {
        self.money
    }

    pub fn set_money(&mut self, money: i64) {
        self.money = money;
    }

    pub fn add_street(&mut self, street: Street) {
        self.streets.push(Arc::new(street));
    }

    /// Street at `index`, or `None` when out of range.
    pub fn street(&self, index: usize) -> Option<&Arc<Street>> {
        self.streets.get(index)
    }

    pub fn streets(&self) -> &[Arc<Street>] {
        &self.streets
    }

    pub fn add_resource(&mut self, name: &str, amount: i32) -> CityResult<()> {
        self.resources.add(name, amount)
    }

    pub fn resources(&self) -> &ResourcePool<i32> {
        &self.resources
    }

    /// Lifetime totals of everything factories produced in this city.
    pub fn production_stats(&self) -> &ResourcePool<i64> {
        &self.production_stats
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn building_count(&self) -> usize {
        self.buildings.len()
    }

    /// Two building slots per street segment.
    pub fn max_buildings(&self) -> usize {
        self.streets.iter().map(|street| street.length()).sum::<usize>()
            * CityConfig::BUILDINGS_PER_SEGMENT
    }

    pub fn remaining_slots(&self) -> usize {
        self.max_buildings().saturating_sub(self.buildings.len())
    }

    pub fn total_capacity(&self) -> i64 {
        self.buildings.iter().map(Building::capacity_effect).sum()
    }

    /// Builds a building through the global registry and appends it.
    ///
    /// An out-of-range `street_index` leaves the building without a street.
    /// A park's construction cost is charged here; on any error the building
    /// list and money are unchanged.
    pub fn add_building(
        &mut self,
        type_id: &str,
        name: &str,
        params: &[String],
        street_index: usize,
    ) -> CityResult<()> {
        self.add_building_from(BuildingRegistry::global(), type_id, name, params, street_index)
    }

    /// Same as [`City::add_building`] with an explicit registry.
    pub fn add_building_from(
        &mut self,
        registry: &BuildingRegistry,
        type_id: &str,
        name: &str,
        params: &[String],
        street_index: usize,
    ) -> CityResult<()> {
        self.ensure_slot()?;

        let street = self.street(street_index).cloned();
        let building = registry.create(type_id, name, params, street)?;

        let cost = building.construction_cost();
        if self.money < cost {
            return Err(CityError::funds(cost, self.money));
        }
        self.money -= cost;

        info!(
            target: "city::build",
            city = %self.name,
            building = %building,
            cost,
            "Building added"
        );
        self.buildings.push(building);
        Ok(())
    }

    /// Appends a pre-built building without going through the registry.
    pub fn add_building_direct(&mut self, building: Building) -> CityResult<()> {
        self.ensure_slot()?;
        info!(
            target: "city::build",
            city = %self.name,
            building = %building,
            "Building inserted directly"
        );
        self.buildings.push(building);
        Ok(())
    }

    fn ensure_slot(&self) -> CityResult<()> {
        let max = self.max_buildings();
        if self.buildings.len() >= max {
            return Err(CityError::LimitExceeded { max });
        }
        Ok(())
    }

    /// Upgrades every building once.
    pub fn upgrade_all_buildings(&mut self) -> CityResult<UpgradeReport> {
        self.run_pass("upgrade_all", |_| true, |building, ctx| {
            building
                .upgrade(ctx.resources, ctx.money)
                .map(StepResult::Upgrade)
        })
    }

    /// Upgrades residential buildings once, leaving the rest untouched.
    pub fn upgrade_residential_only(&mut self) -> CityResult<UpgradeReport> {
        self.run_pass("upgrade_residential", Building::is_residential, |building, ctx| {
            building
                .upgrade(ctx.resources, ctx.money)
                .map(StepResult::Upgrade)
        })
    }

    /// One economy round: factories produce into the stock and the lifetime
    /// statistics, every other building upgrades.
    pub fn economy_tick(&mut self) -> CityResult<UpgradeReport> {
        self.run_pass("economy_tick", |_| true, |building, ctx| {
            match building.as_factory() {
                Some(factory) => factory
                    .produce_tracked(ctx.resources, ctx.money, ctx.stats)
                    .map(|()| StepResult::Produced),
                None => building
                    .upgrade(ctx.resources, ctx.money)
                    .map(StepResult::Upgrade),
            }
        })
    }

    fn run_pass<F, S>(
        &mut self,
        pass: &'static str,
        filter: F,
        mut step: S,
    ) -> CityResult<UpgradeReport>
    where
        F: Fn(&Building) -> bool,
        S: FnMut(&mut Building, &mut PassContext<'_>) -> CityResult<StepResult>,
    {
        let Self {
            name,
            money,
            resources,
            production_stats,
            buildings,
            ..
        } = self;
        let mut ctx = PassContext {
            resources,
            money,
            stats: production_stats,
        };
        let mut report = UpgradeReport::default();

        for building in buildings.iter_mut().filter(|building| filter(building)) {
            match step(building, &mut ctx) {
                Ok(result) => {
                    debug!(
                        target: "city::upgrade",
                        pass,
                        building = building.name(),
                        level = building.level(),
                        result = ?result,
                        "Building processed"
                    );
                    report.record(building.name(), result);
                }
                Err(err @ CityError::InsufficientResource(_)) => {
                    warn!(
                        target: "city::upgrade",
                        pass,
                        building = building.name(),
                        error_code = err.error_code(),
                        "Resource error while upgrading {}: {}",
                        building.name(),
                        err
                    );
                    report.record(building.name(), StepResult::Skipped(err));
                }
                Err(err) => {
                    warn!(
                        target: "city::upgrade",
                        pass,
                        city = %name,
                        building = building.name(),
                        error_code = err.error_code(),
                        "Pass aborted: {}",
                        err
                    );
                    return Err(err);
                }
            }
        }

        Ok(report)
    }

    pub fn summary(&self) -> CitySummary {
        CitySummary {
            name: self.name.clone(),
            money: self.money,
            live_buildings: live_buildings(),
            max_buildings: self.max_buildings(),
            remaining_slots: self.remaining_slots(),
            total_capacity: self.total_capacity(),
            resources: self
                .resources
                .iter()
                .map(|(name, qty)| (name.to_string(), qty))
                .collect(),
            production: self
                .production_stats
                .iter()
                .map(|(name, qty)| (name.to_string(), qty))
                .collect(),
            streets: self
                .streets
                .iter()
                .enumerate()
                .map(|(index, street)| StreetSummary {
                    index,
                    level: street.level(),
                    length: street.length(),
                    road_type: street.road_type(),
                })
                .collect(),
            buildings: self.buildings.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Mutable city state lent to a pass step.
struct PassContext<'a> {
    resources: &'a mut ResourcePool<i32>,
    money: &'a mut i64,
    stats: &'a mut ResourcePool<i64>,
}
