//! Factories turn money into resources. They never level up.

use std::collections::BTreeMap;

use crate::error::{CityError, CityResult};
use crate::resources::ResourcePool;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Factory {
    /// Resources added to the city per production round.
    pub production: BTreeMap<String, i32>,
    pub cost_per_production: i64,
}

impl Factory {
    pub const DEFAULT_RESOURCE: &'static str = "wood";
    pub const DEFAULT_AMOUNT: i32 = 5;
    pub const DEFAULT_COST: i64 = 20;

    pub fn new(production: BTreeMap<String, i32>, cost_per_production: i64) -> Self {
        Self {
            production,
            cost_per_production,
        }
    }

    /// Convenience constructor for the common one-resource factory.
    pub fn single(resource: impl Into<String>, amount: i32, cost_per_production: i64) -> Self {
        Self::new(
            BTreeMap::from([(resource.into(), amount)]),
            cost_per_production,
        )
    }

    pub(crate) fn validate(&self) -> CityResult<()> {
        if self.production.is_empty() {
            return Err(CityError::InvalidBuilding(
                "factory must produce at least one resource".into(),
            ));
        }
        if self.production.values().any(|qty| *qty < 0) {
            return Err(CityError::InvalidBuilding(
                "factory production must be non-negative".into(),
            ));
        }
        if self.cost_per_production <= 0 {
            return Err(CityError::InvalidBuilding(
                "factory must have a positive production cost".into(),
            ));
        }
        Ok(())
    }

    /// Runs one production round: pays the cost, then stocks every output.
    /// On error neither money nor stock change.
    pub fn produce(&self, resources: &mut ResourcePool<i32>, money: &mut i64) -> CityResult<()> {
        self.check_outputs(resources, None)?;
        self.charge(money)?;
        for (name, qty) in &self.production {
            resources.add(name, *qty)?;
        }
        Ok(())
    }

    /// Like [`Factory::produce`], also recording output in a lifetime ledger.
    pub fn produce_tracked(
        &self,
        resources: &mut ResourcePool<i32>,
        money: &mut i64,
        stats: &mut ResourcePool<i64>,
    ) -> CityResult<()> {
        self.check_outputs(resources, Some(stats))?;
        self.charge(money)?;
        for (name, qty) in &self.production {
            resources.add(name, *qty)?;
            stats.add(name, *qty as i64)?;
        }
        Ok(())
    }

    fn check_outputs(
        &self,
        resources: &ResourcePool<i32>,
        stats: Option<&ResourcePool<i64>>,
    ) -> CityResult<()> {
        for (name, qty) in &self.production {
            let fits_stock = resources.can_add(name, *qty);
            let fits_stats = stats.is_none_or(|stats| stats.can_add(name, *qty as i64));
            if !(fits_stock && fits_stats) {
                return Err(CityError::overflow(name));
            }
        }
        Ok(())
    }

    fn charge(&self, money: &mut i64) -> CityResult<()> {
        if *money < self.cost_per_production {
            return Err(CityError::funds(self.cost_per_production, *money));
        }
        *money -= self.cost_per_production;
        Ok(())
    }

    /// Total output per round, independent of level.
    pub fn capacity(&self) -> i64 {
        self.production.values().map(|qty| *qty as i64).sum()
    }
}
