use crate::preferences::Preferences;
use serde::{Deserialize, Serialize};
use sidequest_shared::{Quest, WeekGrid, WeekId};
use std::collections::{BTreeMap, BTreeSet};

/// The full persisted user document.
///
/// Field names on the wire match the stored document: `schedule` is the
/// recurring availability template, `specificWeeks` the per-week override
/// grids, `acceptedQuestsByWeek` the accepted quest snapshots, and
/// `ignoredQuestIds` the globally ignored quest ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserDoc {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Stored as YYYY-MM-DD.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    pub city: String,
    pub social_score: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Preferences>,
    pub schedule: WeekGrid,
    pub specific_weeks: BTreeMap<WeekId, WeekGrid>,
    pub accepted_quests_by_week: BTreeMap<WeekId, Vec<Quest>>,
    pub ignored_quest_ids: BTreeSet<String>,
}

impl Default for UserDoc {
    fn default() -> Self {
        UserDoc {
            name: None,
            first_name: None,
            last_name: None,
            birthdate: None,
            gender: None,
            city: "Boston".to_string(),
            social_score: 100,
            preferences: None,
            schedule: WeekGrid::default(),
            specific_weeks: BTreeMap::new(),
            accepted_quests_by_week: BTreeMap::new(),
            ignored_quest_ids: BTreeSet::new(),
        }
    }
}

/// Partial profile update accepted from the client.
///
/// Personal-detail fields replace the stored value when present; the
/// `preferences` object is merged shallow-key-overwrite, never replaced
/// wholesale.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birthdate: Option<String>,
    pub gender: Option<String>,
    pub city: Option<String>,
    pub preferences: Option<Preferences>,
}

impl UserDoc {
    pub fn apply(&mut self, update: ProfileUpdate) {
        if update.name.is_some() {
            self.name = update.name;
        }
        if update.first_name.is_some() {
            self.first_name = update.first_name;
        }
        if update.last_name.is_some() {
            self.last_name = update.last_name;
        }
        if update.birthdate.is_some() {
            self.birthdate = update.birthdate;
        }
        if update.gender.is_some() {
            self.gender = update.gender;
        }
        if let Some(city) = update.city {
            self.city = city;
        }
        if let Some(patch) = update.preferences {
            self.preferences
                .get_or_insert_with(Preferences::default)
                .merge(&patch);
        }
    }
}
