//! Single-building containers with shared ownership.
//!
//! Two slots may point at the same building; an upgrade through one slot is
//! visible through the other. Clone the building first when the copies should
//! diverge.

use core::fmt;
use std::cell::RefCell;
use std::rc::Rc;

use crate::building::{Building, UpgradeOutcome};
use crate::error::{CityError, CityResult};
use crate::resources::ResourcePool;

/// Building handle shared between slots.
pub type SharedBuilding = Rc<RefCell<Building>>;

#[derive(Clone, Debug, Default)]
pub struct Slot {
    building: Option<SharedBuilding>,
}

impl Slot {
    pub fn new(building: Option<SharedBuilding>) -> Self {
        Self { building }
    }

    /// Wraps an owned building into a fresh shared handle.
    pub fn with_building(building: Building) -> Self {
        Self::new(Some(Rc::new(RefCell::new(building))))
    }

    pub fn set_building(&mut self, building: Option<SharedBuilding>) {
        self.building = building;
    }

    /// Returns another handle to the held building.
    pub fn building(&self) -> Option<SharedBuilding> {
        self.building.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.building.is_none()
    }

    /// Capacity of the held building, or 0 for an empty slot.
    pub fn capacity(&self) -> i64 {
        self.building
            .as_ref()
            .map_or(0, |building| building.borrow().capacity_effect())
    }

    pub fn upgrade(
        &self,
        resources: &mut ResourcePool<i32>,
        money: &mut i64,
    ) -> CityResult<UpgradeOutcome> {
        let building = self.building.as_ref().ok_or(CityError::EmptySlot)?;
        building.borrow_mut().upgrade(resources, money)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.building {
            Some(building) => write!(f, "{}", building.borrow()),
            None => f.write_str("Empty slot"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::building::Residential;
    use std::collections::BTreeMap;

    fn slot_home() -> Building {
        let needs = BTreeMap::from([("wood".to_string(), 5), ("stone".to_string(), 2)]);
        Building::new("SlotHome", 1, Residential::new(5, needs, 10)).unwrap()
    }

    #[test]
    fn empty_slot() {
        let slot = Slot::default();
        assert!(slot.is_empty());
        assert_eq!(slot.capacity(), 0);
        assert_eq!(slot.to_string(), "Empty slot");

        let mut pool = ResourcePool::new();
        let mut money = 0;
        assert_eq!(slot.upgrade(&mut pool, &mut money), Err(CityError::EmptySlot));
    }

    #[test]
    fn slots_share_upgrades() {
        let first = Slot::with_building(slot_home());
        let mut second = Slot::default();
        second.set_building(first.building());

        let mut pool = ResourcePool::new();
        pool.add("wood", 5).unwrap();
        pool.add("stone", 2).unwrap();
        let mut money = 50;

        assert_eq!(first.capacity(), 5);
        first.upgrade(&mut pool, &mut money).unwrap();

        assert_eq!(money, 60);
        assert_eq!(first.capacity(), 10);
        assert_eq!(second.capacity(), 10);
        assert_eq!(
            second.to_string(),
            "Residential(name=SlotHome, level=2, capacity=10)"
        );
    }

    #[test]
    fn cloning_the_building_breaks_sharing() {
        let first = Slot::with_building(slot_home());
        let copy = first
            .building()
            .map(|shared| shared.borrow().clone())
            .unwrap();
        let second = Slot::with_building(copy);

        let mut pool = ResourcePool::new();
        pool.add("wood", 5).unwrap();
        pool.add("stone", 2).unwrap();
        let mut money = 0;
        second.upgrade(&mut pool, &mut money).unwrap();

        assert_eq!(first.capacity(), 5);
        assert_eq!(second.capacity(), 10);
    }
}
