pub mod grid;
pub mod quest;
pub mod week;

pub use grid::{DAYS_PER_WEEK, GridCell, SLOTS_PER_DAY, WeekGrid};
pub use quest::{ActivityCategory, Quest, QuestKind};
pub use week::{WeekId, WeekIdError};
