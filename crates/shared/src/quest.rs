use crate::grid::SLOTS_PER_DAY;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum QuestKind {
    Meal,
    Activity,
}

/// Activity category, keyed to one interest score in the user preferences.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ActivityCategory {
    Sports,
    Arts,
    Outdoors,
    Education,
}

/// One generated candidate quest, pinned to a day and slot span.
///
/// Quests are regenerated fresh each session; an accepted quest is persisted
/// as this full snapshot, so the record stays meaningful after the generation
/// that produced it is gone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    pub id: String,
    pub title: String,
    pub kind: QuestKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ActivityCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_level: Option<u8>,
    /// 0 = Monday through 6 = Sunday.
    pub day: u8,
    /// 0 = 8 AM through 15 = 11 PM.
    pub start_slot: u8,
    pub duration_slots: u8,
    pub match_percent: u8,
}

impl Quest {
    pub fn is_meal(&self) -> bool {
        self.kind == QuestKind::Meal
    }

    /// The slot indices this quest spans on its day.
    pub fn slots(&self) -> std::ops::Range<u8> {
        self.start_slot..self.start_slot + self.duration_slots
    }

    /// Whether the span stays inside the day (slot 16 is midnight).
    pub fn in_bounds(&self) -> bool {
        self.duration_slots >= 1
            && (self.start_slot as usize + self.duration_slots as usize) <= SLOTS_PER_DAY
    }
}
