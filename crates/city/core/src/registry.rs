//! Building factory registry.
//!
//! Maps a type id (`"residential"`, `"park"`, ...) to a constructor that turns
//! a name, positional string parameters and an optional street into a
//! [`Building`]. The process-wide instance returned by
//! [`BuildingRegistry::global`] is seeded with the built-in types on first
//! access, so registration always completes before the first lookup.
//!
//! # Built-in parameters
//!
//! Missing trailing parameters fall back to defaults:
//!
//! | type id       | parameters (default)                                         |
//! |---------------|--------------------------------------------------------------|
//! | `residential` | capacity (10), level (1), money per upgrade (20)             |
//! | `utility`     | type label (Water), coverage (100.0), level (1), cost (50)   |
//! | `park`        | boost (10.0), construction cost (30)                         |
//! | `commercial`  | customers per level (50), level (1)                          |
//! | `factory`     | resource (wood), amount (5), cost per production (20)        |

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use strum::IntoEnumIterator;
use tracing::{debug, trace};

use crate::building::{
    Building, BuildingType, Commercial, Factory, Park, Residential, Utility,
};
use crate::error::{CityError, CityResult};
use crate::street::Street;

/// Constructor stored in the registry.
pub type Constructor =
    Arc<dyn Fn(&str, &[String], Option<Arc<Street>>) -> CityResult<Building> + Send + Sync>;

/// Registry of building constructors keyed by type id.
pub struct BuildingRegistry {
    table: RwLock<HashMap<String, Constructor>>,
}

impl BuildingRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            table: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a registry holding every built-in building type.
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        for kind in BuildingType::iter() {
            registry.register(kind.as_ref(), builtin(kind));
        }
        registry
    }

    /// Returns the process-wide registry.
    pub fn global() -> &'static Self {
        static REGISTRY: OnceLock<BuildingRegistry> = OnceLock::new();
        REGISTRY.get_or_init(Self::with_builtins)
    }

    /// Registers `ctor` under `id`, replacing any previous entry.
    pub fn register<F>(&self, id: impl Into<String>, ctor: F)
    where
        F: Fn(&str, &[String], Option<Arc<Street>>) -> CityResult<Building> + Send + Sync + 'static,
    {
        let id = id.into();
        trace!(target: "city::registry", type_id = %id, "Registering building constructor");
        self.table
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, Arc::new(ctor));
    }

    /// Builds a `id` building named `name` from positional `params`.
    pub fn create(
        &self,
        id: &str,
        name: &str,
        params: &[String],
        street: Option<Arc<Street>>,
    ) -> CityResult<Building> {
        let ctor = self
            .table
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
            .ok_or_else(|| CityError::UnknownType(id.to_string()))?;

        let building = ctor(name, params, street)?;
        debug!(
            target: "city::registry",
            type_id = id,
            name,
            level = building.level(),
            "Created building"
        );
        Ok(building)
    }

    pub fn is_registered(&self, id: &str) -> bool {
        self.table
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(id)
    }

    /// Registered type ids, sorted.
    pub fn type_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .table
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        ids.sort();
        ids
    }
}

impl Default for BuildingRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

/// Positional parameter reader with per-position defaults.
struct Params<'a> {
    type_id: BuildingType,
    values: &'a [String],
}

impl<'a> Params<'a> {
    fn new(type_id: BuildingType, values: &'a [String]) -> Self {
        Self { type_id, values }
    }

    fn parse<T: FromStr>(&self, index: usize, default: T) -> CityResult<T> {
        match self.values.get(index) {
            None => Ok(default),
            Some(raw) => raw.parse().map_err(|_| CityError::InvalidParameter {
                type_id: self.type_id.to_string(),
                index,
                value: raw.clone(),
            }),
        }
    }

    fn text(&self, index: usize, default: &str) -> String {
        self.values
            .get(index)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }
}

type BuiltinConstructor = fn(&str, &[String], Option<Arc<Street>>) -> CityResult<Building>;

fn builtin(kind: BuildingType) -> BuiltinConstructor {
    match kind {
        BuildingType::Residential => build_residential,
        BuildingType::Utility => build_utility,
        BuildingType::Park => build_park,
        BuildingType::Commercial => build_commercial,
        BuildingType::Factory => build_factory,
    }
}

fn build_residential(
    name: &str,
    params: &[String],
    street: Option<Arc<Street>>,
) -> CityResult<Building> {
    let params = Params::new(BuildingType::Residential, params);
    let capacity = params.parse(0, Residential::DEFAULT_CAPACITY)?;
    let level = params.parse(1, 1i64)?;
    let money = params.parse(2, Residential::DEFAULT_MONEY_PER_UPGRADE)?;
    let kind = Residential::new(capacity, Residential::default_requirements(), money);
    Ok(Building::new(name, level, kind)?.with_street(street))
}

fn build_utility(
    name: &str,
    params: &[String],
    street: Option<Arc<Street>>,
) -> CityResult<Building> {
    let params = Params::new(BuildingType::Utility, params);
    let label = params.text(0, Utility::DEFAULT_TYPE);
    let coverage = params.parse(1, Utility::DEFAULT_COVERAGE)?;
    let level = params.parse(2, 1i64)?;
    let cost = params.parse(3, Utility::DEFAULT_UPGRADE_COST)?;
    Ok(Building::new(name, level, Utility::new(label, coverage, cost))?.with_street(street))
}

fn build_park(name: &str, params: &[String], street: Option<Arc<Street>>) -> CityResult<Building> {
    let params = Params::new(BuildingType::Park, params);
    let boost = params.parse(0, Park::DEFAULT_BOOST)?;
    let cost = params.parse(1, Park::DEFAULT_COST)?;
    Ok(Building::new(name, 1, Park::new(boost, cost))?.with_street(street))
}

fn build_commercial(
    name: &str,
    params: &[String],
    street: Option<Arc<Street>>,
) -> CityResult<Building> {
    let params = Params::new(BuildingType::Commercial, params);
    let customers = params.parse(0, Commercial::DEFAULT_CUSTOMERS)?;
    let level = params.parse(1, 1i64)?;
    Ok(Building::new(name, level, Commercial::new(customers))?.with_street(street))
}

fn build_factory(
    name: &str,
    params: &[String],
    street: Option<Arc<Street>>,
) -> CityResult<Building> {
    let params = Params::new(BuildingType::Factory, params);
    let resource = params.text(0, Factory::DEFAULT_RESOURCE);
    let amount = params.parse(1, Factory::DEFAULT_AMOUNT)?;
    let cost = params.parse(2, Factory::DEFAULT_COST)?;
    Ok(Building::new(name, 1, Factory::single(resource, amount, cost))?.with_street(street))
}
