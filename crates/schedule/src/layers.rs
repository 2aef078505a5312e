use crate::error::ScheduleError;
use sidequest_shared::{GridCell, WeekGrid, WeekId};
use std::collections::BTreeMap;
use std::ops::Bound::{Excluded, Unbounded};

/// The two-tier availability schedule: a recurring template grid plus
/// per-week override grids keyed by week id.
///
/// The grid in effect for a week is the override if one exists, else the
/// recurring template. The recurring grid never contains `QuestOccupied`
/// cells; accepting a quest always materializes an override first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeekSchedule {
    pub recurring: WeekGrid,
    pub overrides: BTreeMap<WeekId, WeekGrid>,
}

impl WeekSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// The grid actually displayed/edited for `week`.
    pub fn display_grid(&self, week: WeekId) -> &WeekGrid {
        self.overrides.get(&week).unwrap_or(&self.recurring)
    }

    pub fn has_override(&self, week: WeekId) -> bool {
        self.overrides.contains_key(&week)
    }

    /// Mutable override grid for `week`, materialized from the recurring
    /// template if the week had none.
    pub fn override_for_edit(&mut self, week: WeekId) -> &mut WeekGrid {
        let recurring = &self.recurring;
        self.overrides
            .entry(week)
            .or_insert_with(|| recurring.clone())
    }

    /// Week ids of overrides strictly after `week`, in order.
    pub fn overrides_after(&self, week: WeekId) -> Vec<WeekId> {
        self.overrides
            .range((Excluded(week), Unbounded))
            .map(|(id, _)| *id)
            .collect()
    }
}

/// Cycle one cell of a scratch grid through the manual-edit states
/// Busy -> Free -> MealOnly -> Busy. Returns the new state.
///
/// An occupied cell is never cycled directly; the accepted quest holding it
/// has to be cancelled first.
pub fn cycle_cell(grid: &mut WeekGrid, day: u8, slot: u8) -> Result<GridCell, ScheduleError> {
    let next = grid
        .cell(day, slot)
        .cycled()
        .ok_or(ScheduleError::CellOccupied { day, slot })?;
    grid.set(day, slot, next);
    Ok(next)
}
