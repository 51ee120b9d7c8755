use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use crate::time::{Month, TimeOfDay};
use crate::types::Hemisphere;

/// One continuous catching interval within a day.
///
/// `start > end` wraps past midnight; `start == end` covers the whole day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl TimeWindow {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self { start, end }
    }

    /// The canonical `00:00`-`23:59` window.
    pub fn all_day() -> Self {
        Self::new(TimeOfDay::MIDNIGHT, TimeOfDay::LAST_MINUTE)
    }

    pub fn wraps_midnight(&self) -> bool {
        self.start > self.end
    }
}

/// A set of months paired with the daily windows that apply in them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonalWindow {
    pub months: BTreeSet<Month>,
    #[serde(rename = "time_ranges")]
    pub time_windows: Vec<TimeWindow>,
}

impl SeasonalWindow {
    pub fn new(months: impl IntoIterator<Item = Month>, time_windows: Vec<TimeWindow>) -> Self {
        Self {
            months: months.into_iter().collect(),
            time_windows,
        }
    }

    /// Structurally unable to match anything.
    pub fn is_degenerate(&self) -> bool {
        self.months.is_empty() || self.time_windows.is_empty()
    }
}

/// Display attributes carried through to the result untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureDisplay {
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub sell_price: u32,
    #[serde(default)]
    pub shadow_size: String,
    #[serde(default)]
    pub shadow_icon: String,
}

/// A catalog entry as exported by the storage layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureDefinition {
    #[serde(rename = "fish_id")]
    pub id: String,
    #[serde(flatten)]
    pub display: CreatureDisplay,
    #[serde(default)]
    pub location: String,
    #[serde(rename = "north_availability", default)]
    pub north: Vec<SeasonalWindow>,
    #[serde(rename = "south_availability", default)]
    pub south: Vec<SeasonalWindow>,
}

impl CreatureDefinition {
    pub fn windows(&self, hemisphere: Hemisphere) -> &[SeasonalWindow] {
        match hemisphere {
            Hemisphere::North => &self.north,
            Hemisphere::South => &self.south,
        }
    }
}

/// A creature that is available right now, with the user's capture state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedEntry {
    #[serde(rename = "fish_id")]
    pub id: String,
    #[serde(flatten)]
    pub display: CreatureDisplay,
    pub location: String,
    pub caught: bool,
}

impl ResolvedEntry {
    pub fn from_definition(creature: &CreatureDefinition, caught: bool) -> Self {
        Self {
            id: creature.id.clone(),
            display: creature.display.clone(),
            location: creature.location.clone(),
            caught,
        }
    }
}

/// A single user/creature capture row as kept by the storage layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureRecord {
    pub user_id: String,
    pub fish_id: String,
    pub caught: bool,
}

/// Point-in-time view of which creatures one user has caught.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaptureSnapshot(HashMap<String, bool>);

impl CaptureSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creatures missing from the snapshot count as not caught.
    pub fn is_caught(&self, creature_id: &str) -> bool {
        self.0.get(creature_id).copied().unwrap_or(false)
    }

    pub fn insert(&mut self, creature_id: impl Into<String>, caught: bool) {
        self.0.insert(creature_id.into(), caught);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn from_caught_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(ids.into_iter().map(|id| (id.into(), true)).collect())
    }
}

impl FromIterator<CaptureRecord> for CaptureSnapshot {
    fn from_iter<T: IntoIterator<Item = CaptureRecord>>(iter: T) -> Self {
        Self(iter.into_iter().map(|r| (r.fish_id, r.caught)).collect())
    }
}

impl From<HashMap<String, bool>> for CaptureSnapshot {
    fn from(map: HashMap<String, bool>) -> Self {
        Self(map)
    }
}
