//! Read-only snapshot of a city for reporting.

use core::fmt;

use crate::street::RoadType;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StreetSummary {
    pub index: usize,
    pub level: u8,
    pub length: usize,
    pub road_type: RoadType,
}

/// Snapshot returned by [`City::summary`](super::City::summary).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CitySummary {
    pub name: String,
    pub money: i64,
    /// Live buildings across the whole process, not just this city.
    pub live_buildings: usize,
    pub max_buildings: usize,
    pub remaining_slots: usize,
    pub total_capacity: i64,
    pub resources: Vec<(String, i32)>,
    pub production: Vec<(String, i64)>,
    pub streets: Vec<StreetSummary>,
    pub buildings: Vec<String>,
}

impl fmt::Display for CitySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "City: {} (Money={}, BuildingsTotal={}, ",
            self.name, self.money, self.live_buildings
        )?;
        writeln!(
            f,
            "MaxBuildings={}, RemainingSlots={}, TotalCapacity={})",
            self.max_buildings, self.remaining_slots, self.total_capacity
        )?;
        writeln!(f, "Resources:")?;
        for (name, qty) in &self.resources {
            writeln!(f, "  {name}: {qty}")?;
        }
        if !self.production.is_empty() {
            writeln!(f, "Produced (lifetime):")?;
            for (name, qty) in &self.production {
                writeln!(f, "  {name}: {qty}")?;
            }
        }
        writeln!(f, "Streets:")?;
        for street in &self.streets {
            writeln!(
                f,
                " [{}] Street(segments={}, {}) (type={}, level={}, length={})",
                street.index,
                street.length,
                street.road_type,
                street.road_type,
                street.level,
                street.length
            )?;
        }
        writeln!(f, "Buildings:")?;
        for (index, building) in self.buildings.iter().enumerate() {
            writeln!(f, " [{index}] {building}")?;
        }
        Ok(())
    }
}
