use serde::{Deserialize, Serialize};
use sidequest_shared::ActivityCategory;

/// User preference scores driving quest compatibility.
///
/// All fields are optional on the wire; absent interest scores read as 1
/// (low) and an absent dining budget reads as 2 ($$), matching the defaults
/// the scorer applies. `age_gap` and `same_gender_only` are matchmaking
/// fields persisted alongside but not used by scoring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_gap: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub same_gender_only: Option<bool>,
    /// Dining budget tier, 1-3.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dining_price: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sports_interest: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arts_interest: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outdoors_vibe: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub educational_interest: Option<u8>,
}

impl Preferences {
    pub const DEFAULT_DINING_PRICE: u8 = 2;
    pub const DEFAULT_INTEREST: u8 = 1;

    /// Dining budget with the scorer's default applied.
    pub fn dining_budget(&self) -> u8 {
        self.dining_price.unwrap_or(Self::DEFAULT_DINING_PRICE)
    }

    /// Interest level (1-3) for an activity category, defaulting to low.
    pub fn interest_in(&self, category: ActivityCategory) -> u8 {
        let level = match category {
            ActivityCategory::Sports => self.sports_interest,
            ActivityCategory::Arts => self.arts_interest,
            ActivityCategory::Outdoors => self.outdoors_vibe,
            ActivityCategory::Education => self.educational_interest,
        };
        level.unwrap_or(Self::DEFAULT_INTEREST)
    }

    /// Shallow key-overwrite merge: keys present in `patch` replace the
    /// stored value, keys absent from `patch` are left untouched.
    pub fn merge(&mut self, patch: &Preferences) {
        if patch.age_gap.is_some() {
            self.age_gap = patch.age_gap;
        }
        if patch.same_gender_only.is_some() {
            self.same_gender_only = patch.same_gender_only;
        }
        if patch.dining_price.is_some() {
            self.dining_price = patch.dining_price;
        }
        if patch.sports_interest.is_some() {
            self.sports_interest = patch.sports_interest;
        }
        if patch.arts_interest.is_some() {
            self.arts_interest = patch.arts_interest;
        }
        if patch.outdoors_vibe.is_some() {
            self.outdoors_vibe = patch.outdoors_vibe;
        }
        if patch.educational_interest.is_some() {
            self.educational_interest = patch.educational_interest;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_scorer_expectations() {
        let prefs = Preferences::default();
        assert_eq!(prefs.dining_budget(), 2);
        assert_eq!(prefs.interest_in(ActivityCategory::Sports), 1);
        assert_eq!(prefs.interest_in(ActivityCategory::Education), 1);
    }

    #[test]
    fn merge_is_shallow_key_overwrite() {
        let mut stored = Preferences {
            dining_price: Some(3),
            sports_interest: Some(2),
            ..Default::default()
        };

        let patch = Preferences {
            sports_interest: Some(3),
            arts_interest: Some(2),
            ..Default::default()
        };
        stored.merge(&patch);

        // Patched keys overwrite, untouched keys survive.
        assert_eq!(stored.sports_interest, Some(3));
        assert_eq!(stored.arts_interest, Some(2));
        assert_eq!(stored.dining_price, Some(3));
    }

    #[test]
    fn wire_names_match_stored_document() {
        let prefs = Preferences {
            dining_price: Some(1),
            outdoors_vibe: Some(3),
            ..Default::default()
        };
        let value = serde_json::to_value(&prefs).unwrap();
        assert_eq!(value["diningPrice"], 1);
        assert_eq!(value["outdoorsVibe"], 3);
        assert!(value.get("sportsInterest").is_none());
    }
}
