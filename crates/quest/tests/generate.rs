//! Generator guarantees: per-day candidate structure, slot bounds, and the
//! skip/discard edge cases for degenerate catalogs.

use rand::SeedableRng;
use rand::rngs::StdRng;
use sidequest_quest::catalog::{
    ActivityTemplate, Catalog, MealTag, MealTemplate, SlotRange, TimeOfDay,
};
use sidequest_quest::generate;
use sidequest_shared::{ActivityCategory, Quest, QuestKind};
use sidequest_user::Preferences;

fn generate_seeded(catalog: &Catalog, seed: u64) -> Vec<Quest> {
    let mut rng = StdRng::seed_from_u64(seed);
    let prefs = Preferences {
        dining_price: Some(2),
        sports_interest: Some(3),
        arts_interest: Some(2),
        ..Default::default()
    };
    generate(catalog, Some(&prefs), &mut rng)
}

fn day_quests(quests: &[Quest], day: u8) -> Vec<&Quest> {
    quests.iter().filter(|q| q.day == day).collect()
}

#[test]
fn every_day_has_the_guaranteed_candidates() {
    let catalog = Catalog::builtin();
    let quests = generate_seeded(&catalog, 1);

    for day in 0..7 {
        let of_day = day_quests(&quests, day);

        let breakfasts = of_day
            .iter()
            .filter(|q| q.kind == QuestKind::Meal && q.start_slot <= 1)
            .count();
        let lunches = of_day
            .iter()
            .filter(|q| q.kind == QuestKind::Meal && q.start_slot == 4)
            .count();
        let dinners = of_day
            .iter()
            .filter(|q| q.kind == QuestKind::Meal && q.start_slot == 10)
            .count();
        assert_eq!(breakfasts, 1, "day {} breakfasts", day);
        assert_eq!(lunches, 1, "day {} lunches", day);
        assert_eq!(dinners, 1, "day {} dinners", day);

        let morning = of_day
            .iter()
            .filter(|q| q.kind == QuestKind::Activity && (0..=2).contains(&q.start_slot))
            .count();
        let afternoon = of_day
            .iter()
            .filter(|q| q.kind == QuestKind::Activity && (5..=7).contains(&q.start_slot))
            .count();
        let evening = of_day
            .iter()
            .filter(|q| q.kind == QuestKind::Activity && (11..=13).contains(&q.start_slot))
            .count();
        assert_eq!(morning, 1, "day {} morning activities", day);
        assert_eq!(afternoon, 1, "day {} afternoon activities", day);
        assert_eq!(evening, 1, "day {} evening activities", day);
    }
}

#[test]
fn all_quests_stay_inside_the_grid() {
    let catalog = Catalog::builtin();
    for seed in 0..20 {
        for quest in generate_seeded(&catalog, seed) {
            assert!(quest.day < 7);
            assert!(quest.in_bounds(), "quest {:?} escapes the grid", quest);
            assert!(quest.match_percent <= 99);
        }
    }
}

#[test]
fn ids_are_unique_within_a_generation() {
    let catalog = Catalog::builtin();
    let quests = generate_seeded(&catalog, 3);
    let mut ids: Vec<&str> = quests.iter().map(|q| q.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), quests.len());
}

#[test]
fn meal_titles_carry_the_price_annotation() {
    let catalog = Catalog::builtin();
    for quest in generate_seeded(&catalog, 4) {
        match quest.kind {
            QuestKind::Meal => {
                let tier = quest.price_level.unwrap() as usize;
                let suffix = format!("({})", "$".repeat(tier));
                assert!(
                    quest.title.ends_with(&suffix),
                    "meal title {:?} missing tier suffix",
                    quest.title
                );
            }
            QuestKind::Activity => {
                assert!(quest.price_level.is_none());
                assert!(quest.category.is_some());
            }
        }
    }
}

#[test]
fn empty_meal_pool_skips_the_slot_silently() {
    // No dinner-tagged meals at all: every other guarantee still holds.
    static BREAKFAST_ONLY: &[MealTemplate] = &[MealTemplate {
        title: "Bagels & Coffee Run",
        price_level: 1,
        tags: &[MealTag::Morning, MealTag::Lunch],
    }];
    static ONE_ACTIVITY: &[ActivityTemplate] = &[ActivityTemplate {
        title: "Pickup Basketball",
        category: ActivityCategory::Sports,
        duration: SlotRange::fixed(2),
        preferred_time: None,
    }];

    let catalog = Catalog {
        meals: BREAKFAST_ONLY,
        activities: ONE_ACTIVITY,
    };
    let quests = generate_seeded(&catalog, 5);

    assert!(
        quests
            .iter()
            .all(|q| !(q.kind == QuestKind::Meal && q.start_slot == 10))
    );
    // Breakfast and lunch still present for each day.
    for day in 0..7 {
        let of_day = day_quests(&quests, day);
        assert!(of_day.iter().any(|q| q.kind == QuestKind::Meal && q.start_slot <= 1));
        assert!(of_day.iter().any(|q| q.kind == QuestKind::Meal && q.start_slot == 4));
    }
}

#[test]
fn fully_empty_catalog_generates_nothing() {
    let catalog = Catalog {
        meals: &[],
        activities: &[],
    };
    assert!(generate_seeded(&catalog, 6).is_empty());
}

#[test]
fn oversized_durations_are_discarded_not_clamped() {
    // A six-hour evening activity cannot fit between 7 PM and midnight, so
    // evening slots must simply produce nothing.
    static MARATHON: &[ActivityTemplate] = &[ActivityTemplate {
        title: "Board Game Marathon",
        category: ActivityCategory::Arts,
        duration: SlotRange::fixed(6),
        preferred_time: Some(TimeOfDay::Evening),
    }];

    let catalog = Catalog {
        meals: &[],
        activities: MARATHON,
    };
    for seed in 0..10 {
        for quest in generate_seeded(&catalog, seed) {
            assert!(quest.in_bounds(), "clamped or escaping quest {:?}", quest);
            // Evening placements (11-13) would always overflow with 6 slots.
            assert!(quest.start_slot + quest.duration_slots <= 16);
            assert!(!(11..=13).contains(&quest.start_slot));
        }
    }
}
