pub mod catalog;
pub mod generate;
pub mod score;

pub use catalog::{ActivityTemplate, Catalog, MealTag, MealTemplate, SlotRange, TimeOfDay};
pub use generate::generate;
pub use score::{TemplateRef, score};
