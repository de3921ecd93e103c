//! Utilities (water, power, ...): upgrades are paid in money.

use crate::error::{CityError, CityResult};

#[derive(Clone, Debug, PartialEq)]
pub struct Utility {
    /// Free-form label such as "Water" or "Power".
    pub utility_type: String,
    pub coverage: f64,
    pub upgrade_cost: i64,
}

impl Utility {
    pub const DEFAULT_TYPE: &'static str = "Water";
    pub const DEFAULT_COVERAGE: f64 = 100.0;
    pub const DEFAULT_UPGRADE_COST: i64 = 50;

    pub fn new(utility_type: impl Into<String>, coverage: f64, upgrade_cost: i64) -> Self {
        Self {
            utility_type: utility_type.into(),
            coverage,
            upgrade_cost,
        }
    }

    pub(crate) fn validate(&self) -> CityResult<()> {
        if !self.coverage.is_finite() {
            return Err(CityError::InvalidBuilding(
                "utility coverage must be finite".into(),
            ));
        }
        if self.upgrade_cost < 0 {
            return Err(CityError::InvalidBuilding(
                "utility upgrade cost must be non-negative".into(),
            ));
        }
        Ok(())
    }

    pub(crate) fn pay_upgrade(&self, money: &mut i64) -> CityResult<()> {
        if *money < self.upgrade_cost {
            return Err(CityError::funds(self.upgrade_cost, *money));
        }
        *money -= self.upgrade_cost;
        Ok(())
    }

    pub fn capacity(&self, level: u32) -> i64 {
        self.coverage.floor() as i64 * level as i64
    }
}
