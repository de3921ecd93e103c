//! Residential housing: upgrades consume materials and pay out money.

use std::collections::BTreeMap;

use crate::error::{CityError, CityResult};
use crate::resources::ResourcePool;

/// Housing block whose capacity scales with its level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Residential {
    pub base_capacity: i32,
    /// Materials consumed by every upgrade.
    pub requirements: BTreeMap<String, i32>,
    /// Money credited to the city after each upgrade.
    pub money_per_upgrade: i64,
}

impl Residential {
    pub const DEFAULT_CAPACITY: i32 = 10;
    pub const DEFAULT_MONEY_PER_UPGRADE: i64 = 20;

    pub fn new(
        base_capacity: i32,
        requirements: BTreeMap<String, i32>,
        money_per_upgrade: i64,
    ) -> Self {
        Self {
            base_capacity,
            requirements,
            money_per_upgrade,
        }
    }

    /// Requirements attached to residential buildings built from parameters.
    pub fn default_requirements() -> BTreeMap<String, i32> {
        BTreeMap::from([("wood".to_string(), 10), ("stone".to_string(), 5)])
    }

    pub(crate) fn validate(&self) -> CityResult<()> {
        if self.base_capacity <= 0 {
            return Err(CityError::InvalidBuilding(
                "residential must have positive base capacity".into(),
            ));
        }
        if self.requirements.values().any(|qty| *qty < 0) {
            return Err(CityError::InvalidBuilding(
                "residential requirements must be non-negative".into(),
            ));
        }
        Ok(())
    }

    /// Checks every requirement and the payout before consuming anything.
    pub(crate) fn pay_upgrade(
        &self,
        resources: &mut ResourcePool<i32>,
        money: &mut i64,
    ) -> CityResult<()> {
        let credited = money
            .checked_add(self.money_per_upgrade)
            .ok_or_else(|| CityError::overflow("money"))?;
        if let Some((name, _)) = self
            .requirements
            .iter()
            .find(|(name, qty)| !resources.can_consume(name, **qty))
        {
            return Err(CityError::InsufficientResource(name.clone()));
        }
        for (name, qty) in &self.requirements {
            resources.consume(name, *qty)?;
        }
        *money = credited;
        Ok(())
    }

    pub fn capacity(&self, level: u32) -> i64 {
        self.base_capacity as i64 * level as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stocked(wood: i32, stone: i32) -> ResourcePool<i32> {
        let mut pool = ResourcePool::new();
        pool.add("wood", wood).unwrap();
        pool.add("stone", stone).unwrap();
        pool
    }

    #[test]
    fn payment_is_all_or_nothing() {
        let home = Residential::new(10, Residential::default_requirements(), 20);
        let mut pool = stocked(10, 4);
        let mut money = 0;

        let err = home.pay_upgrade(&mut pool, &mut money).unwrap_err();
        assert_eq!(err, CityError::InsufficientResource("stone".into()));
        assert_eq!(pool.get("wood"), 10);
        assert_eq!(pool.get("stone"), 4);
        assert_eq!(money, 0);
    }

    #[test]
    fn payment_consumes_and_credits() {
        let home = Residential::new(10, Residential::default_requirements(), 20);
        let mut pool = stocked(12, 5);
        let mut money = 100;

        home.pay_upgrade(&mut pool, &mut money).unwrap();
        assert_eq!(pool.get("wood"), 2);
        assert_eq!(pool.get("stone"), 0);
        assert_eq!(money, 120);
    }

    #[test]
    fn zero_capacity_is_invalid() {
        let home = Residential::new(0, BTreeMap::new(), 20);
        assert!(matches!(home.validate(), Err(CityError::InvalidBuilding(_))));
    }

    #[test]
    fn payout_overflow_consumes_nothing() {
        let home = Residential::new(10, Residential::default_requirements(), 20);
        let mut pool = stocked(10, 5);
        let mut money = i64::MAX - 5;

        let err = home.pay_upgrade(&mut pool, &mut money).unwrap_err();
        assert_eq!(err, CityError::overflow("money"));
        assert_eq!(pool.get("wood"), 10);
        assert_eq!(money, i64::MAX - 5);
    }
}
