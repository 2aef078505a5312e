use crate::catalog::{ActivityTemplate, MealTemplate};
use rand::Rng;
use sidequest_user::Preferences;

pub const MAX_SCORE: u8 = 99;

/// A template under scoring, before it becomes a display quest.
#[derive(Debug, Clone, Copy)]
pub enum TemplateRef<'a> {
    Meal(&'a MealTemplate),
    Activity(&'a ActivityTemplate),
}

/// Compatibility score in [0, 99] for a template against the user's
/// preferences.
///
/// Starts at a neutral 50. Meals compare price tier to the dining budget
/// (match +35, cheaper +20, pricier -30); activities map the category
/// interest level (3: +40, 2: +10, 1: -20). A small uniform jitter in
/// [-5, +5) breaks deterministic ties before clamping.
///
/// With no preferences loaded at all, falls back to a uniform draw in
/// [50, 89] rather than failing.
pub fn score(template: TemplateRef<'_>, prefs: Option<&Preferences>, rng: &mut impl Rng) -> u8 {
    let Some(prefs) = prefs else {
        return rng.random_range(50..90i32) as u8;
    };

    let mut score: i32 = 50;

    match template {
        TemplateRef::Meal(meal) => {
            let budget = prefs.dining_budget();
            if meal.price_level == budget {
                score += 35;
            } else if meal.price_level < budget {
                score += 20;
            } else {
                score -= 30;
            }
        }
        TemplateRef::Activity(activity) => {
            score += match prefs.interest_in(activity.category) {
                3 => 40,
                2 => 10,
                _ => -20,
            };
        }
    }

    score += rng.random_range(-5..5);

    score.clamp(0, MAX_SCORE as i32) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{MealTag, SlotRange};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use sidequest_shared::ActivityCategory;

    static STEAKHOUSE: MealTemplate = MealTemplate {
        title: "Steakhouse Dinner",
        price_level: 3,
        tags: &[MealTag::Dinner],
    };

    static BASKETBALL: ActivityTemplate = ActivityTemplate {
        title: "Pickup Basketball",
        category: ActivityCategory::Sports,
        duration: SlotRange::fixed(2),
        preferred_time: None,
    };

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn loved_activity_scores_in_band() {
        let prefs = Preferences {
            sports_interest: Some(3),
            ..Default::default()
        };
        let mut rng = rng();
        // 50 + 40 with jitter in [-5, +5).
        for _ in 0..50 {
            let s = score(TemplateRef::Activity(&BASKETBALL), Some(&prefs), &mut rng);
            assert!((85..=94).contains(&s), "score {} out of band", s);
        }
    }

    #[test]
    fn overpriced_meal_scores_in_band() {
        let prefs = Preferences {
            dining_price: Some(1),
            ..Default::default()
        };
        let mut rng = rng();
        // 50 - 30 with jitter.
        for _ in 0..50 {
            let s = score(TemplateRef::Meal(&STEAKHOUSE), Some(&prefs), &mut rng);
            assert!((15..=24).contains(&s), "score {} out of band", s);
        }
    }

    #[test]
    fn unset_interest_defaults_low() {
        let prefs = Preferences::default();
        let mut rng = rng();
        // 50 - 20 with jitter.
        for _ in 0..50 {
            let s = score(TemplateRef::Activity(&BASKETBALL), Some(&prefs), &mut rng);
            assert!((25..=34).contains(&s), "score {} out of band", s);
        }
    }

    #[test]
    fn missing_preferences_fall_back_to_random_band() {
        let mut rng = rng();
        for _ in 0..100 {
            let s = score(TemplateRef::Meal(&STEAKHOUSE), None, &mut rng);
            assert!((50..=89).contains(&s), "fallback score {} out of band", s);
        }
    }
}
