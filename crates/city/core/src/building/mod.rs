//! Buildings and their upgrade rules.
//!
//! A [`Building`] carries the identity shared by every variant (name, level,
//! optional street back-reference) and a closed [`BuildingKind`] holding the
//! variant-specific values. All behavior dispatches with `match` on the kind:
//!
//! | kind        | max level | upgrade pays with          | capacity                 |
//! |-------------|-----------|----------------------------|--------------------------|
//! | Residential | 3         | resources (credits money)  | base × level             |
//! | Utility     | 3         | fixed money cost           | floor(coverage) × level  |
//! | Park        | 2         | nothing                    | floor(boost) × level     |
//! | Commercial  | 4         | 20 × current level         | customers × level        |
//! | Factory     | 1         | never upgrades             | sum of production        |
//!
//! Upgrading a building that is already at its max level is a no-op, not an
//! error.

mod commercial;
mod counter;
mod factory;
mod park;
mod residential;
mod utility;

use core::fmt;
use std::sync::Arc;

pub use commercial::Commercial;
pub use counter::live_buildings;
pub use factory::Factory;
pub use park::Park;
pub use residential::Residential;
pub use utility::Utility;

use crate::config::CityConfig;
use crate::error::CityResult;
use crate::resources::ResourcePool;
use crate::street::Street;
use counter::LiveToken;

/// Type tag of a building variant.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BuildingType {
    Residential,
    Utility,
    Park,
    Commercial,
    Factory,
}

impl BuildingType {
    pub const fn max_level(self) -> u32 {
        match self {
            Self::Residential => CityConfig::RESIDENTIAL_MAX_LEVEL,
            Self::Utility => CityConfig::UTILITY_MAX_LEVEL,
            Self::Park => CityConfig::PARK_MAX_LEVEL,
            Self::Commercial => CityConfig::COMMERCIAL_MAX_LEVEL,
            Self::Factory => CityConfig::FACTORY_MAX_LEVEL,
        }
    }
}

/// Variant-specific building data.
#[derive(Clone, Debug, PartialEq)]
pub enum BuildingKind {
    Residential(Residential),
    Utility(Utility),
    Park(Park),
    Commercial(Commercial),
    Factory(Factory),
}

impl BuildingKind {
    pub fn building_type(&self) -> BuildingType {
        match self {
            Self::Residential(_) => BuildingType::Residential,
            Self::Utility(_) => BuildingType::Utility,
            Self::Park(_) => BuildingType::Park,
            Self::Commercial(_) => BuildingType::Commercial,
            Self::Factory(_) => BuildingType::Factory,
        }
    }

    fn validate(&self) -> CityResult<()> {
        match self {
            Self::Residential(home) => home.validate(),
            Self::Utility(utility) => utility.validate(),
            Self::Park(park) => park.validate(),
            Self::Commercial(shop) => shop.validate(),
            Self::Factory(factory) => factory.validate(),
        }
    }
}

impl From<Residential> for BuildingKind {
    fn from(value: Residential) -> Self {
        Self::Residential(value)
    }
}

impl From<Utility> for BuildingKind {
    fn from(value: Utility) -> Self {
        Self::Utility(value)
    }
}

impl From<Park> for BuildingKind {
    fn from(value: Park) -> Self {
        Self::Park(value)
    }
}

impl From<Commercial> for BuildingKind {
    fn from(value: Commercial) -> Self {
        Self::Commercial(value)
    }
}

impl From<Factory> for BuildingKind {
    fn from(value: Factory) -> Self {
        Self::Factory(value)
    }
}

/// Result of a successful call to [`Building::upgrade`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpgradeOutcome {
    /// Level increased by one.
    Upgraded { from: u32, to: u32 },
    /// Already at max level; nothing was charged.
    AtMaxLevel,
    /// The variant never levels up (factories).
    Fixed,
}

impl UpgradeOutcome {
    pub fn is_upgraded(&self) -> bool {
        matches!(self, Self::Upgraded { .. })
    }
}

/// A city building.
///
/// `Clone` produces an independent deep copy; only the street back-reference
/// is shared. Equality compares field values.
#[derive(Clone, Debug, PartialEq)]
pub struct Building {
    name: String,
    level: u32,
    street: Option<Arc<Street>>,
    kind: BuildingKind,
    _live: LiveToken,
}

impl Building {
    /// Creates a building, validating variant values and clamping `level`
    /// into `[1, max_level]`.
    pub fn new(
        name: impl Into<String>,
        level: i64,
        kind: impl Into<BuildingKind>,
    ) -> CityResult<Self> {
        let kind = kind.into();
        kind.validate()?;
        let max = kind.building_type().max_level();
        Ok(Self {
            name: name.into(),
            level: level.clamp(1, max as i64) as u32,
            street: None,
            kind,
            _live: LiveToken::new(),
        })
    }

    /// Attaches a display-only street back-reference.
    #[must_use]
    pub fn with_street(mut self, street: Option<Arc<Street>>) -> Self {
        self.street = street;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn max_level(&self) -> u32 {
        self.building_type().max_level()
    }

    pub fn can_upgrade(&self) -> bool {
        self.level < self.max_level()
    }

    pub fn building_type(&self) -> BuildingType {
        self.kind.building_type()
    }

    pub fn kind(&self) -> &BuildingKind {
        &self.kind
    }

    pub fn street(&self) -> Option<&Arc<Street>> {
        self.street.as_ref()
    }

    pub fn is_residential(&self) -> bool {
        matches!(self.kind, BuildingKind::Residential(_))
    }

    pub fn as_park(&self) -> Option<&Park> {
        match &self.kind {
            BuildingKind::Park(park) => Some(park),
            _ => None,
        }
    }

    pub fn as_factory(&self) -> Option<&Factory> {
        match &self.kind {
            BuildingKind::Factory(factory) => Some(factory),
            _ => None,
        }
    }

    /// Money charged when this building is added to a city.
    pub fn construction_cost(&self) -> i64 {
        self.as_park().map_or(0, |park| park.construction_cost)
    }

    /// Upgrades one level, paying with `resources` or `money` as the variant
    /// requires. On error nothing is charged and the level is unchanged.
    pub fn upgrade(
        &mut self,
        resources: &mut ResourcePool<i32>,
        money: &mut i64,
    ) -> CityResult<UpgradeOutcome> {
        if let BuildingKind::Factory(_) = self.kind {
            return Ok(UpgradeOutcome::Fixed);
        }
        if !self.can_upgrade() {
            return Ok(UpgradeOutcome::AtMaxLevel);
        }

        match &self.kind {
            BuildingKind::Residential(home) => home.pay_upgrade(resources, money)?,
            BuildingKind::Utility(utility) => utility.pay_upgrade(money)?,
            BuildingKind::Commercial(shop) => shop.pay_upgrade(self.level, money)?,
            BuildingKind::Park(_) | BuildingKind::Factory(_) => {}
        }

        let from = self.level;
        self.level += 1;
        Ok(UpgradeOutcome::Upgraded {
            from,
            to: self.level,
        })
    }

    /// Capacity contributed to the city at the current level.
    pub fn capacity_effect(&self) -> i64 {
        match &self.kind {
            BuildingKind::Residential(home) => home.capacity(self.level),
            BuildingKind::Utility(utility) => utility.capacity(self.level),
            BuildingKind::Park(park) => park.capacity(self.level),
            BuildingKind::Commercial(shop) => shop.capacity(self.level),
            BuildingKind::Factory(factory) => factory.capacity(),
        }
    }
}

impl fmt::Display for Building {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = &self.name;
        let level = self.level;
        match &self.kind {
            BuildingKind::Residential(_) => write!(
                f,
                "Residential(name={name}, level={level}, capacity={})",
                self.capacity_effect()
            )?,
            BuildingKind::Utility(utility) => write!(
                f,
                "Utility(name={name}, type={}, level={level})",
                utility.utility_type
            )?,
            BuildingKind::Park(park) => write!(
                f,
                "Park(name={name}, level={level}, boost={})",
                park.population_boost
            )?,
            BuildingKind::Commercial(_) => {
                write!(f, "Commercial(name={name}, level={level})")?
            }
            BuildingKind::Factory(factory) => {
                write!(f, "Factory(name={name}, production={{")?;
                for (i, (resource, qty)) in factory.production.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{resource}:{qty}")?;
                }
                write!(f, "}}, cost={})", factory.cost_per_production)?;
            }
        }
        if let Some(street) = &self.street {
            write!(
                f,
                " [street level={}, segments={}]",
                street.level(),
                street.length()
            )?;
        }
        Ok(())
    }
}
