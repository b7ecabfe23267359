use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{duration_format::format_duration, effort_finder::SegmentExtremes};

/// Target distances evaluated for every activity, in meters.
pub const DEFAULT_TARGET_DISTANCES: [u32; 14] = [
    100, 200, 400, 800, 1000, 1500, 3000, 5000, 10000, 15000, 20000, 21097, 30000, 42195,
];

/// A distance threshold in whole meters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetDistance(pub u32);

impl TargetDistance {
    pub fn meters(self) -> f64 {
        f64::from(self.0)
    }

    pub fn defaults() -> Vec<TargetDistance> {
        DEFAULT_TARGET_DISTANCES
            .iter()
            .copied()
            .map(TargetDistance)
            .collect()
    }
}

impl fmt::Display for TargetDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}m", self.0)
    }
}

impl FromStr for TargetDistance {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(TargetDistance)
    }
}

/// Fastest and slowest effort for one target distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffortRecord {
    /// Seconds taken by the fastest segment.
    pub best_duration: f64,
    /// Distance stream value where the fastest segment starts.
    pub best_start_distance: f64,
    pub worst_duration: f64,
    pub worst_start_distance: f64,
}

impl From<SegmentExtremes> for EffortRecord {
    fn from(extremes: SegmentExtremes) -> Self {
        Self {
            best_duration: extremes.min_duration,
            best_start_distance: extremes.best_start_distance,
            worst_duration: extremes.max_duration,
            worst_start_distance: extremes.worst_start_distance,
        }
    }
}

/// Stored representation of an [`EffortRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredEffort {
    pub best: String,
    pub best_unix: f64,
    pub best_start: f64,
    pub worst: String,
    pub worst_unix: f64,
    pub worst_start: f64,
}

impl From<&EffortRecord> for StoredEffort {
    fn from(record: &EffortRecord) -> Self {
        Self {
            best: format_duration(record.best_duration),
            best_unix: record.best_duration,
            best_start: record.best_start_distance,
            worst: format_duration(record.worst_duration),
            worst_unix: record.worst_duration,
            worst_start: record.worst_start_distance,
        }
    }
}

impl From<&StoredEffort> for EffortRecord {
    fn from(stored: &StoredEffort) -> Self {
        Self {
            best_duration: stored.best_unix,
            best_start_distance: stored.best_start,
            worst_duration: stored.worst_unix,
            worst_start_distance: stored.worst_start,
        }
    }
}

/// Efforts for every reachable target distance of one activity.
#[derive(Debug, Clone, PartialEq)]
pub struct EffortReport {
    pub activity_id: i64,
    pub efforts: BTreeMap<TargetDistance, EffortRecord>,
}

impl EffortReport {
    pub fn new(activity_id: i64) -> Self {
        Self {
            activity_id,
            efforts: BTreeMap::new(),
        }
    }

    pub fn get(&self, target: TargetDistance) -> Option<&EffortRecord> {
        self.efforts.get(&target)
    }

    /// The stored JSON body, keyed by target distance in meters.
    pub fn to_stored(&self) -> BTreeMap<TargetDistance, StoredEffort> {
        self.efforts
            .iter()
            .map(|(target, record)| (*target, StoredEffort::from(record)))
            .collect()
    }

    pub fn from_stored(activity_id: i64, stored: &BTreeMap<TargetDistance, StoredEffort>) -> Self {
        Self {
            activity_id,
            efforts: stored
                .iter()
                .map(|(target, effort)| (*target, EffortRecord::from(effort)))
                .collect(),
        }
    }
}

/// A report as read back from storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredEffortReport {
    pub activity_id: i64,
    pub effort: BTreeMap<TargetDistance, StoredEffort>,
    pub created_at: OffsetDateTime,
}
