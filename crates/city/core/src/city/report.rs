//! Outcome of a bulk pass over a city's buildings.

use crate::building::UpgradeOutcome;
use crate::error::CityError;

/// What happened to one building during a pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepResult {
    Upgrade(UpgradeOutcome),
    /// A factory ran one production round.
    Produced,
    /// A recoverable shortfall; the pass continued with the next building.
    Skipped(CityError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PassEntry {
    pub building: String,
    pub result: StepResult,
}

/// Per-building results of `upgrade_all_buildings`, `upgrade_residential_only`
/// or `economy_tick`, in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UpgradeReport {
    pub entries: Vec<PassEntry>,
}

impl UpgradeReport {
    pub(crate) fn record(&mut self, building: &str, result: StepResult) {
        self.entries.push(PassEntry {
            building: building.to_string(),
            result,
        });
    }

    /// Buildings that gained a level.
    pub fn upgraded(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().filter_map(|entry| match entry.result {
            StepResult::Upgrade(outcome) if outcome.is_upgraded() => Some(entry.building.as_str()),
            _ => None,
        })
    }

    /// Buildings skipped because of a resource shortfall, with the error.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &CityError)> + '_ {
        self.entries.iter().filter_map(|entry| match &entry.result {
            StepResult::Skipped(err) => Some((entry.building.as_str(), err)),
            _ => None,
        })
    }

    pub fn produced(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.result == StepResult::Produced)
            .count()
    }

    /// True when no building was skipped.
    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
