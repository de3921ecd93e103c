//! Parks: paid for once at construction, upgraded for free.

use crate::error::{CityError, CityResult};

#[derive(Clone, Debug, PartialEq)]
pub struct Park {
    pub population_boost: f64,
    /// One-time cost charged when the park is added to a city. Never refunded.
    pub construction_cost: i64,
}

impl Park {
    pub const DEFAULT_BOOST: f64 = 10.0;
    pub const DEFAULT_COST: i64 = 30;

    pub fn new(population_boost: f64, construction_cost: i64) -> Self {
        Self {
            population_boost,
            construction_cost,
        }
    }

    pub(crate) fn validate(&self) -> CityResult<()> {
        if !self.population_boost.is_finite() {
            return Err(CityError::InvalidBuilding(
                "park boost must be finite".into(),
            ));
        }
        if self.construction_cost < 0 {
            return Err(CityError::InvalidBuilding(
                "park cost must be non-negative".into(),
            ));
        }
        Ok(())
    }

    pub fn capacity(&self, level: u32) -> i64 {
        self.population_boost.floor() as i64 * level as i64
    }
}
