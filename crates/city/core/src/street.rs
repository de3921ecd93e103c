//! Streets: bounded segment lists that determine how many buildings fit.

use core::fmt;

use arrayvec::ArrayVec;

use crate::config::CityConfig;

/// Road classification derived from a street's level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoadType {
    #[strum(serialize = "Two lane")]
    TwoLane,
    #[strum(serialize = "Four lane")]
    FourLane,
    #[strum(serialize = "Six lane")]
    SixLane,
}

impl RoadType {
    /// Maps a clamped street level to its road type.
    pub const fn from_level(level: u8) -> Self {
        match level {
            0 | 1 => Self::TwoLane,
            2 => Self::FourLane,
            _ => Self::SixLane,
        }
    }
}

/// An ordered run of up to [`CityConfig::MAX_SEGMENTS`] segment ids.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Street {
    segments: ArrayVec<i32, { CityConfig::MAX_SEGMENTS }>,
    level: u8,
}

impl Street {
    /// Creates an empty street, clamping `level` into `[1, 3]`.
    pub fn new(level: i64) -> Self {
        let level = level.clamp(
            CityConfig::MIN_STREET_LEVEL as i64,
            CityConfig::MAX_STREET_LEVEL as i64,
        ) as u8;
        Self {
            segments: ArrayVec::new(),
            level,
        }
    }

    /// Appends a segment. Returns `false` once the street is full.
    pub fn add_segment(&mut self, segment: i32) -> bool {
        self.segments.try_push(segment).is_ok()
    }

    /// Builder-style variant of [`Street::add_segment`]; extra segments are dropped.
    #[must_use]
    pub fn with_segments(mut self, segments: impl IntoIterator<Item = i32>) -> Self {
        for segment in segments {
            if !self.add_segment(segment) {
                break;
            }
        }
        self
    }

    /// Number of segments on the street.
    pub fn length(&self) -> usize {
        self.segments.len()
    }

    pub fn segments(&self) -> &[i32] {
        &self.segments
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn road_type(&self) -> RoadType {
        RoadType::from_level(self.level)
    }

    pub fn is_full(&self) -> bool {
        self.segments.is_full()
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Street(segments={}, {})",
            self.segments.len(),
            self.road_type()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_is_clamped() {
        assert_eq!(Street::new(0).level(), 1);
        assert_eq!(Street::new(-7).level(), 1);
        assert_eq!(Street::new(2).level(), 2);
        assert_eq!(Street::new(42).level(), 3);
    }

    #[test]
    fn road_type_follows_level() {
        assert_eq!(Street::new(1).road_type().to_string(), "Two lane");
        assert_eq!(Street::new(2).road_type().to_string(), "Four lane");
        assert_eq!(Street::new(3).road_type().to_string(), "Six lane");
    }

    #[test]
    fn segments_are_capped() {
        let mut street = Street::new(1);
        for seg in 0..CityConfig::MAX_SEGMENTS as i32 {
            assert!(street.add_segment(seg));
        }
        assert!(street.is_full());
        assert!(!street.add_segment(99));
        assert_eq!(street.length(), CityConfig::MAX_SEGMENTS);
        assert_eq!(street.segments().last(), Some(&9));
    }

    #[test]
    fn display_shows_length_and_type() {
        let street = Street::new(2).with_segments([4, 5, 6]);
        assert_eq!(street.to_string(), "Street(segments=3, Four lane)");
    }
}
