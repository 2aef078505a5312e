use sidequest_shared::WeekId;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("week {0} is in the past")]
    PastWeek(WeekId),

    #[error("cell {day}/{slot} is occupied by an accepted quest; cancel it first")]
    CellOccupied { day: u8, slot: u8 },

    #[error("quest {0} does not fit the week's grid")]
    DoesNotFit(String),

    #[error("quest {0} is already accepted for this week")]
    AlreadyAccepted(String),

    #[error("no accepted quest {0} for this week")]
    UnknownQuest(String),

    #[error("{} future week override(s) would be discarded; confirmation required", .0.len())]
    FutureOverridesExist(Vec<WeekId>),
}
