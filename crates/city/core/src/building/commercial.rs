//! Commercial buildings: upgrade cost grows with the current level.

use crate::config::CityConfig;
use crate::error::{CityError, CityResult};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Commercial {
    pub customers_per_level: i32,
}

impl Commercial {
    pub const DEFAULT_CUSTOMERS: i32 = 50;

    pub fn new(customers_per_level: i32) -> Self {
        Self {
            customers_per_level,
        }
    }

    pub(crate) fn validate(&self) -> CityResult<()> {
        if self.customers_per_level < 0 {
            return Err(CityError::InvalidBuilding(
                "commercial base customers must be non-negative".into(),
            ));
        }
        Ok(())
    }

    /// Cost of upgrading away from `level`.
    pub fn upgrade_cost(level: u32) -> i64 {
        CityConfig::COMMERCIAL_COST_PER_LEVEL * level as i64
    }

    pub(crate) fn pay_upgrade(&self, level: u32, money: &mut i64) -> CityResult<()> {
        let cost = Self::upgrade_cost(level);
        if *money < cost {
            return Err(CityError::funds(cost, *money));
        }
        *money -= cost;
        Ok(())
    }

    pub fn capacity(&self, level: u32) -> i64 {
        self.customers_per_level as i64 * level as i64
    }
}
