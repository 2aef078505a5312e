use crate::catalog::{ActivityTemplate, Catalog, MealTag, MealTemplate, TimeOfDay};
use crate::score::{TemplateRef, score};
use rand::Rng;
use rand::seq::IndexedRandom;
use sidequest_shared::{DAYS_PER_WEEK, Quest, QuestKind, SLOTS_PER_DAY};
use sidequest_user::Preferences;
use uuid::Uuid;

// Guaranteed slot placement per the grid mapping (8 AM = slot 0):
// breakfast lands at 8-9 AM, lunch at noon, dinner at 6 PM; activities get
// a morning, an afternoon and an evening window.
const LUNCH_SLOT: u8 = 4;
const DINNER_SLOT: u8 = 10;
const AFTERNOON_BASE: u8 = 5;
const EVENING_BASE: u8 = 11;

/// Generate one week's candidate quest pool.
///
/// Every day gets up to one breakfast, lunch and dinner candidate plus one
/// morning, afternoon and evening activity. A slot whose template pool is
/// empty is skipped silently; a drawn duration that would run past midnight
/// discards the candidate rather than clamping it. Randomness comes from the
/// injected `rng`, so generation is reproducible under a seeded source.
pub fn generate(catalog: &Catalog, prefs: Option<&Preferences>, rng: &mut impl Rng) -> Vec<Quest> {
    let mut quests = Vec::new();

    for day in 0..DAYS_PER_WEEK as u8 {
        // Guaranteed meals.
        if let Some(template) = pick_meal(catalog, MealTag::Morning, rng) {
            let slot = rng.random_range(0..2u8);
            quests.push(meal_quest(template, day, slot, prefs, rng));
        }
        if let Some(template) = pick_meal(catalog, MealTag::Lunch, rng) {
            quests.push(meal_quest(template, day, LUNCH_SLOT, prefs, rng));
        }
        if let Some(template) = pick_meal(catalog, MealTag::Dinner, rng) {
            quests.push(meal_quest(template, day, DINNER_SLOT, prefs, rng));
        }

        // Guaranteed time-bucketed activities.
        let morning: Vec<&ActivityTemplate> = catalog
            .activities
            .iter()
            .filter(|t| matches!(t.preferred_time, Some(TimeOfDay::Morning) | None))
            .collect();
        if let Some(template) = morning.choose(rng) {
            let slot = rng.random_range(0..3u8);
            quests.extend(activity_quest(template, day, slot, prefs, rng));
        }

        let afternoon: Vec<&ActivityTemplate> = catalog
            .activities
            .iter()
            .filter(|t| t.preferred_time != Some(TimeOfDay::Morning))
            .collect();
        if let Some(template) = afternoon.choose(rng) {
            let slot = AFTERNOON_BASE + rng.random_range(0..3u8);
            quests.extend(activity_quest(template, day, slot, prefs, rng));
        }

        let evening: Vec<&ActivityTemplate> = catalog
            .activities
            .iter()
            .filter(|t| matches!(t.preferred_time, Some(TimeOfDay::Evening) | None))
            .collect();
        if let Some(template) = evening.choose(rng) {
            let slot = EVENING_BASE + rng.random_range(0..3u8);
            quests.extend(activity_quest(template, day, slot, prefs, rng));
        }
    }

    quests
}

fn pick_meal<'a>(
    catalog: &'a Catalog,
    tag: MealTag,
    rng: &mut impl Rng,
) -> Option<&'a MealTemplate> {
    let pool: Vec<&MealTemplate> = catalog
        .meals
        .iter()
        .filter(|t| t.tags.contains(&tag))
        .collect();
    pool.choose(rng).copied()
}

fn meal_quest(
    template: &MealTemplate,
    day: u8,
    start_slot: u8,
    prefs: Option<&Preferences>,
    rng: &mut impl Rng,
) -> Quest {
    let symbols = "$".repeat(template.price_level as usize);
    Quest {
        id: new_id(),
        title: format!("{} ({})", template.title, symbols),
        kind: QuestKind::Meal,
        category: None,
        price_level: Some(template.price_level),
        day,
        start_slot,
        duration_slots: 1,
        match_percent: score(TemplateRef::Meal(template), prefs, rng),
    }
}

fn activity_quest(
    template: &ActivityTemplate,
    day: u8,
    start_slot: u8,
    prefs: Option<&Preferences>,
    rng: &mut impl Rng,
) -> Option<Quest> {
    let duration = template.duration.draw(rng);
    if start_slot as usize + duration as usize > SLOTS_PER_DAY {
        // Would run past midnight: discard, never clamp.
        return None;
    }

    Some(Quest {
        id: new_id(),
        title: template.title.to_string(),
        kind: QuestKind::Activity,
        category: Some(template.category),
        price_level: None,
        day,
        start_slot,
        duration_slots: duration,
        match_percent: score(TemplateRef::Activity(template), prefs, rng),
    })
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}
