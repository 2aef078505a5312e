pub mod engine;
pub mod error;
pub mod layers;

pub use engine::{PlannerState, QuestFilters, RecurringSaveReport, quest_fits};
pub use error::ScheduleError;
pub use layers::{WeekSchedule, cycle_cell};
