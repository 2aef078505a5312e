use serde::{Deserialize, Serialize};

pub const DAYS_PER_WEEK: usize = 7;
/// Hourly columns from 8 AM (index 0) through 11 PM (index 15).
pub const SLOTS_PER_DAY: usize = 16;

/// State of one day/hour cell in the availability grid.
///
/// Wire representation is the small integer in braces, matching the stored
/// document format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum GridCell {
    /// Unavailable (the default).
    #[default]
    Busy,
    /// Available for any quest.
    Free,
    /// Available for meal quests only.
    MealOnly,
    /// Consumed by an accepted quest. Never produced by manual editing.
    QuestOccupied,
}

impl From<GridCell> for u8 {
    fn from(cell: GridCell) -> u8 {
        match cell {
            GridCell::Busy => 0,
            GridCell::Free => 1,
            GridCell::MealOnly => 2,
            GridCell::QuestOccupied => 3,
        }
    }
}

impl TryFrom<u8> for GridCell {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(GridCell::Busy),
            1 => Ok(GridCell::Free),
            2 => Ok(GridCell::MealOnly),
            3 => Ok(GridCell::QuestOccupied),
            other => Err(format!("invalid grid cell value: {}", other)),
        }
    }
}

impl GridCell {
    /// Next state in the manual-edit cycle Busy -> Free -> MealOnly -> Busy.
    ///
    /// Returns `None` for an occupied cell: those are only released by
    /// cancelling the quest that occupies them.
    pub fn cycled(self) -> Option<GridCell> {
        match self {
            GridCell::Busy => Some(GridCell::Free),
            GridCell::Free => Some(GridCell::MealOnly),
            GridCell::MealOnly => Some(GridCell::Busy),
            GridCell::QuestOccupied => None,
        }
    }

    pub fn is_editable(self) -> bool {
        self != GridCell::QuestOccupied
    }
}

/// A 7x16 week of availability cells, indexed `[day][slot]` with Monday = 0.
///
/// Wire representation is a 7-element array of 16-element arrays of small
/// integers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeekGrid {
    cells: [[GridCell; SLOTS_PER_DAY]; DAYS_PER_WEEK],
}

impl Default for WeekGrid {
    fn default() -> Self {
        WeekGrid {
            cells: [[GridCell::Busy; SLOTS_PER_DAY]; DAYS_PER_WEEK],
        }
    }
}

impl WeekGrid {
    /// An all-Busy grid.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cell(&self, day: u8, slot: u8) -> GridCell {
        self.cells[day as usize][slot as usize]
    }

    pub fn set(&mut self, day: u8, slot: u8, cell: GridCell) {
        self.cells[day as usize][slot as usize] = cell;
    }

    pub fn rows(&self) -> &[[GridCell; SLOTS_PER_DAY]; DAYS_PER_WEEK] {
        &self.cells
    }

    /// Iterate every `(day, slot, cell)` triple.
    pub fn iter_cells(&self) -> impl Iterator<Item = (u8, u8, GridCell)> + '_ {
        self.cells.iter().enumerate().flat_map(|(day, row)| {
            row.iter()
                .enumerate()
                .map(move |(slot, cell)| (day as u8, slot as u8, *cell))
        })
    }
}
