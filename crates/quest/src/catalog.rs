//! The static quest template catalog.
//!
//! Loaded once, never mutated: meal templates carry a price tier and the
//! meal windows they suit, activity templates carry an interest category, a
//! duration range in hourly slots, and an optional time-of-day affinity.

use rand::Rng;
use sidequest_shared::ActivityCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MealTag {
    Morning,
    Lunch,
    Dinner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOfDay {
    Morning,
    Evening,
}

/// Inclusive duration range in slots; a fixed duration has `min == max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotRange {
    pub min: u8,
    pub max: u8,
}

impl SlotRange {
    pub const fn fixed(slots: u8) -> Self {
        SlotRange {
            min: slots,
            max: slots,
        }
    }

    pub const fn range(min: u8, max: u8) -> Self {
        SlotRange { min, max }
    }

    /// Draw a duration uniformly from the range.
    pub fn draw(&self, rng: &mut impl Rng) -> u8 {
        if self.min >= self.max {
            self.min
        } else {
            rng.random_range(self.min..=self.max)
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MealTemplate {
    pub title: &'static str,
    /// Price tier 1-3, compared against the user's dining budget.
    pub price_level: u8,
    pub tags: &'static [MealTag],
}

#[derive(Debug, Clone, Copy)]
pub struct ActivityTemplate {
    pub title: &'static str,
    pub category: ActivityCategory,
    pub duration: SlotRange,
    pub preferred_time: Option<TimeOfDay>,
}

/// An immutable view over the template tables the generator samples from.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    pub meals: &'static [MealTemplate],
    pub activities: &'static [ActivityTemplate],
}

impl Catalog {
    /// The built-in production catalog.
    pub const fn builtin() -> Self {
        Catalog {
            meals: MEAL_TEMPLATES,
            activities: ACTIVITY_TEMPLATES,
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

const fn meal(title: &'static str, price_level: u8, tags: &'static [MealTag]) -> MealTemplate {
    MealTemplate {
        title,
        price_level,
        tags,
    }
}

const fn activity(
    title: &'static str,
    category: ActivityCategory,
    duration: SlotRange,
    preferred_time: Option<TimeOfDay>,
) -> ActivityTemplate {
    ActivityTemplate {
        title,
        category,
        duration,
        preferred_time,
    }
}

pub static MEAL_TEMPLATES: &[MealTemplate] = &[
    // Price tier 1 ($)
    meal("Bagels & Coffee Run", 1, &[MealTag::Morning]),
    meal("Street Tacos Stand", 1, &[MealTag::Lunch, MealTag::Dinner]),
    meal("Grab & Go Pizza Slice", 1, &[MealTag::Lunch, MealTag::Dinner]),
    meal("Food Court Meetup", 1, &[MealTag::Lunch]),
    meal("Breakfast Burrito Spot", 1, &[MealTag::Morning]),
    meal("Late Night Diner", 1, &[MealTag::Dinner]),
    meal("Donut Shop Stop", 1, &[MealTag::Morning]),
    // Price tier 2 ($$)
    meal("Trendy Ramen Spot", 2, &[MealTag::Lunch, MealTag::Dinner]),
    meal("Sunday Brunch", 2, &[MealTag::Morning, MealTag::Lunch]),
    meal("Korean BBQ Group", 2, &[MealTag::Dinner]),
    meal("Artisan Burger Bar", 2, &[MealTag::Lunch, MealTag::Dinner]),
    meal("Dim Sum Cart", 2, &[MealTag::Morning, MealTag::Lunch]),
    meal("Italian Bistro", 2, &[MealTag::Dinner]),
    meal("Sushi Lunch Special", 2, &[MealTag::Lunch]),
    // Price tier 3 ($$$)
    meal("Omakase Experience", 3, &[MealTag::Dinner]),
    meal("Steakhouse Dinner", 3, &[MealTag::Dinner]),
    meal("French Fine Dining", 3, &[MealTag::Dinner]),
    meal("Rooftop Cocktails & Apps", 3, &[MealTag::Dinner]),
    meal("Seafood Tower Feast", 3, &[MealTag::Dinner]),
];

pub static ACTIVITY_TEMPLATES: &[ActivityTemplate] = &[
    // Sports
    activity(
        "Pickup Basketball",
        ActivityCategory::Sports,
        SlotRange::fixed(2),
        None,
    ),
    activity(
        "Morning Run Club",
        ActivityCategory::Sports,
        SlotRange::fixed(1),
        Some(TimeOfDay::Morning),
    ),
    activity(
        "Tennis Doubles",
        ActivityCategory::Sports,
        SlotRange::fixed(2),
        None,
    ),
    activity(
        "Rock Climbing Gym",
        ActivityCategory::Sports,
        SlotRange::range(2, 3),
        None,
    ),
    activity(
        "Yoga in the Park",
        ActivityCategory::Sports,
        SlotRange::fixed(1),
        Some(TimeOfDay::Morning),
    ),
    activity(
        "Ultimate Frisbee",
        ActivityCategory::Sports,
        SlotRange::fixed(2),
        None,
    ),
    activity(
        "Spikeball Tournament",
        ActivityCategory::Sports,
        SlotRange::fixed(2),
        None,
    ),
    activity(
        "Lap Swimming",
        ActivityCategory::Sports,
        SlotRange::fixed(1),
        Some(TimeOfDay::Morning),
    ),
    activity(
        "Bouldering Session",
        ActivityCategory::Sports,
        SlotRange::fixed(2),
        None,
    ),
    // Arts & music
    activity(
        "Modern Art Gallery Tour",
        ActivityCategory::Arts,
        SlotRange::fixed(2),
        None,
    ),
    activity(
        "Pottery Workshop",
        ActivityCategory::Arts,
        SlotRange::fixed(3),
        None,
    ),
    activity(
        "Indie Film Screening",
        ActivityCategory::Arts,
        SlotRange::fixed(2),
        None,
    ),
    activity(
        "Live Jazz Night",
        ActivityCategory::Arts,
        SlotRange::fixed(3),
        Some(TimeOfDay::Evening),
    ),
    activity(
        "Sketching in the Park",
        ActivityCategory::Arts,
        SlotRange::fixed(2),
        None,
    ),
    activity(
        "Open Mic Night",
        ActivityCategory::Arts,
        SlotRange::fixed(3),
        Some(TimeOfDay::Evening),
    ),
    activity(
        "Bedroom Pop Jam Session",
        ActivityCategory::Arts,
        SlotRange::fixed(2),
        None,
    ),
    activity(
        "Symphony Orchestra",
        ActivityCategory::Arts,
        SlotRange::fixed(3),
        Some(TimeOfDay::Evening),
    ),
    activity(
        "Photography Walk",
        ActivityCategory::Arts,
        SlotRange::fixed(2),
        Some(TimeOfDay::Morning),
    ),
    activity(
        "Vinyl Record Hunting",
        ActivityCategory::Arts,
        SlotRange::fixed(2),
        None,
    ),
    // Outdoors
    activity(
        "Hiking the Fells",
        ActivityCategory::Outdoors,
        SlotRange::range(2, 3),
        None,
    ),
    activity(
        "Charles River Kayaking",
        ActivityCategory::Outdoors,
        SlotRange::fixed(2),
        None,
    ),
    activity(
        "Community Garden Help",
        ActivityCategory::Outdoors,
        SlotRange::fixed(2),
        Some(TimeOfDay::Morning),
    ),
    activity(
        "Sunset Beach Walk",
        ActivityCategory::Outdoors,
        SlotRange::fixed(2),
        Some(TimeOfDay::Evening),
    ),
    activity(
        "Arboretum Picnic",
        ActivityCategory::Outdoors,
        SlotRange::fixed(2),
        None,
    ),
    activity(
        "Sunrise Meditation",
        ActivityCategory::Outdoors,
        SlotRange::fixed(1),
        Some(TimeOfDay::Morning),
    ),
    activity(
        "Urban Foraging Walk",
        ActivityCategory::Outdoors,
        SlotRange::fixed(2),
        None,
    ),
    activity(
        "Bike Path Cruise",
        ActivityCategory::Outdoors,
        SlotRange::fixed(2),
        None,
    ),
    // Educational
    activity(
        "History Museum Tour",
        ActivityCategory::Education,
        SlotRange::fixed(3),
        None,
    ),
    activity(
        "Tech Startup Lecture",
        ActivityCategory::Education,
        SlotRange::fixed(2),
        None,
    ),
    activity(
        "Book Club Meeting",
        ActivityCategory::Education,
        SlotRange::fixed(2),
        None,
    ),
    activity(
        "Physics Study Group",
        ActivityCategory::Education,
        SlotRange::fixed(2),
        None,
    ),
    activity(
        "Language Exchange",
        ActivityCategory::Education,
        SlotRange::fixed(1),
        None,
    ),
    activity(
        "Code & Coffee",
        ActivityCategory::Education,
        SlotRange::fixed(2),
        Some(TimeOfDay::Morning),
    ),
    activity(
        "Science Museum Visit",
        ActivityCategory::Education,
        SlotRange::fixed(3),
        None,
    ),
    activity(
        "Creative Writing Workshop",
        ActivityCategory::Education,
        SlotRange::fixed(2),
        None,
    ),
];
