/// City configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CityConfig {
    /// Number of economy ticks to run after the scripted upgrade passes.
    pub economy_ticks: u32,
    /// Whether the client runs the shared-slot and direct-insert walkthrough.
    pub run_slot_demo: bool,
}

impl CityConfig {
    // ===== compile-time constants =====
    /// Maximum number of segments on a single street.
    pub const MAX_SEGMENTS: usize = 10;
    /// Building slots contributed by each street segment.
    pub const BUILDINGS_PER_SEGMENT: usize = 2;
    pub const MIN_STREET_LEVEL: u8 = 1;
    pub const MAX_STREET_LEVEL: u8 = 3;

    pub const RESIDENTIAL_MAX_LEVEL: u32 = 3;
    pub const UTILITY_MAX_LEVEL: u32 = 3;
    pub const PARK_MAX_LEVEL: u32 = 2;
    pub const COMMERCIAL_MAX_LEVEL: u32 = 4;
    pub const FACTORY_MAX_LEVEL: u32 = 1;

    /// Commercial upgrade cost is this factor times the current level.
    pub const COMMERCIAL_COST_PER_LEVEL: i64 = 20;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ECONOMY_TICKS: u32 = 0;

    pub fn new() -> Self {
        Self {
            economy_ticks: Self::DEFAULT_ECONOMY_TICKS,
            run_slot_demo: true,
        }
    }

    pub fn with_economy_ticks(economy_ticks: u32) -> Self {
        Self {
            economy_ticks,
            ..Self::new()
        }
    }
}

impl Default for CityConfig {
    fn default() -> Self {
        Self::new()
    }
}
