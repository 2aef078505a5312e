use crate::error::ScheduleError;
use crate::layers::WeekSchedule;
use serde::Serialize;
use sidequest_shared::{DAYS_PER_WEEK, GridCell, Quest, SLOTS_PER_DAY, WeekGrid, WeekId};
use sidequest_user::UserDoc;
use std::collections::{BTreeMap, BTreeSet};

/// Display-only filters applied to the available-quest list.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuestFilters {
    pub min_match_percent: u8,
    pub exclude_meals: bool,
}

/// Outcome of a save-as-recurring operation.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringSaveReport {
    /// Past weeks that received a frozen copy of the previous template.
    pub frozen: Vec<WeekId>,
    /// Overrides removed because the new template supersedes them.
    pub deleted: Vec<WeekId>,
}

/// Whether a candidate quest fits a grid: every spanned cell must be open,
/// and a meal-only cell admits meal quests alone. Pure; safe to re-run.
pub fn quest_fits(quest: &Quest, grid: &WeekGrid) -> bool {
    if quest.day as usize >= DAYS_PER_WEEK || !quest.in_bounds() {
        return false;
    }
    quest.slots().all(|slot| match grid.cell(quest.day, slot) {
        GridCell::Busy | GridCell::QuestOccupied => false,
        GridCell::MealOnly => quest.is_meal(),
        GridCell::Free => true,
    })
}

/// The quest/grid state for one user, with the mutation rules that keep the
/// displayed grid, accepted snapshots and ignored set mutually consistent.
///
/// Invariant maintained across every operation: a cell reads `QuestOccupied`
/// iff an accepted quest for that week spans it.
#[derive(Debug, Clone, Default)]
pub struct PlannerState {
    pub schedule: WeekSchedule,
    pub accepted_by_week: BTreeMap<WeekId, Vec<Quest>>,
    pub ignored_ids: BTreeSet<String>,
}

impl PlannerState {
    pub fn from_doc(doc: &UserDoc) -> Self {
        PlannerState {
            schedule: WeekSchedule {
                recurring: doc.schedule.clone(),
                overrides: doc.specific_weeks.clone(),
            },
            accepted_by_week: doc.accepted_quests_by_week.clone(),
            ignored_ids: doc.ignored_quest_ids.clone(),
        }
    }

    /// Move the state back into the persisted document.
    pub fn write_back(self, doc: &mut UserDoc) {
        doc.schedule = self.schedule.recurring;
        doc.specific_weeks = self.schedule.overrides;
        doc.accepted_quests_by_week = self.accepted_by_week;
        doc.ignored_quest_ids = self.ignored_ids;
    }

    pub fn display_grid(&self, week: WeekId) -> &WeekGrid {
        self.schedule.display_grid(week)
    }

    pub fn accepted(&self, week: WeekId) -> &[Quest] {
        self.accepted_by_week
            .get(&week)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The candidates currently offerable for `week`: not ignored, not
    /// already accepted this week, fitting the displayed grid, passing the
    /// display filters; sorted by match percent descending (stable).
    pub fn available(
        &self,
        week: WeekId,
        candidates: &[Quest],
        filters: &QuestFilters,
    ) -> Vec<Quest> {
        let grid = self.display_grid(week);
        let accepted_ids: BTreeSet<&str> =
            self.accepted(week).iter().map(|q| q.id.as_str()).collect();

        let mut out: Vec<Quest> = candidates
            .iter()
            .filter(|q| !self.ignored_ids.contains(&q.id))
            .filter(|q| !accepted_ids.contains(q.id.as_str()))
            .filter(|q| quest_fits(q, grid))
            .filter(|q| q.match_percent >= filters.min_match_percent)
            .filter(|q| !(filters.exclude_meals && q.is_meal()))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.match_percent.cmp(&a.match_percent));
        out
    }

    /// Accept a quest for `week`: every spanned cell becomes occupied and
    /// the snapshot joins the week's accepted list. Materializes a week
    /// override so the recurring template stays quest-free.
    pub fn accept(
        &mut self,
        current: WeekId,
        week: WeekId,
        quest: &Quest,
    ) -> Result<(), ScheduleError> {
        if week < current {
            return Err(ScheduleError::PastWeek(week));
        }
        if self.accepted(week).iter().any(|q| q.id == quest.id) {
            return Err(ScheduleError::AlreadyAccepted(quest.id.clone()));
        }
        if !quest_fits(quest, self.display_grid(week)) {
            return Err(ScheduleError::DoesNotFit(quest.id.clone()));
        }

        let grid = self.schedule.override_for_edit(week);
        for slot in quest.slots() {
            grid.set(quest.day, slot, GridCell::QuestOccupied);
        }
        self.accepted_by_week
            .entry(week)
            .or_default()
            .push(quest.clone());

        tracing::debug!(week = %week, quest = %quest.id, "quest accepted");
        Ok(())
    }

    /// Remove an accepted quest and release its cells: meal quests revert
    /// the span to meal-only availability, activities to fully free.
    pub fn cancel(
        &mut self,
        current: WeekId,
        week: WeekId,
        quest_id: &str,
    ) -> Result<Quest, ScheduleError> {
        if week < current {
            return Err(ScheduleError::PastWeek(week));
        }

        let list = self
            .accepted_by_week
            .get_mut(&week)
            .ok_or_else(|| ScheduleError::UnknownQuest(quest_id.to_string()))?;
        let pos = list
            .iter()
            .position(|q| q.id == quest_id)
            .ok_or_else(|| ScheduleError::UnknownQuest(quest_id.to_string()))?;
        let quest = list.remove(pos);
        if list.is_empty() {
            self.accepted_by_week.remove(&week);
        }

        let restored = if quest.is_meal() {
            GridCell::MealOnly
        } else {
            GridCell::Free
        };
        let grid = self.schedule.override_for_edit(week);
        for slot in quest.slots() {
            grid.set(quest.day, slot, restored);
        }

        tracing::debug!(week = %week, quest = %quest.id, "quest cancelled");
        Ok(quest)
    }

    pub fn ignore(&mut self, quest_id: &str) {
        self.ignored_ids.insert(quest_id.to_string());
    }

    pub fn restore(&mut self, quest_id: &str) {
        self.ignored_ids.remove(quest_id);
    }

    /// Commit an edited scratch grid as a single-week override, then
    /// reconcile that week's accepted quests against it.
    pub fn save_week(
        &mut self,
        current: WeekId,
        week: WeekId,
        grid: WeekGrid,
    ) -> Result<(), ScheduleError> {
        if week < current {
            return Err(ScheduleError::PastWeek(week));
        }
        self.schedule.overrides.insert(week, grid);
        self.reconcile_week(week);
        Ok(())
    }

    /// Commit an edited scratch grid as the new recurring template.
    ///
    /// History is frozen first: every week from `history_start` up to (not
    /// including) `edited_week` without an override gets one copied from the
    /// outgoing template. Overrides after `edited_week` are deleted, which
    /// requires `confirm` when any exist; the edited week's own override is
    /// deleted so that week matches the new template exactly. Every week
    /// holding accepted quests is then reconciled.
    pub fn save_recurring(
        &mut self,
        current: WeekId,
        edited_week: WeekId,
        grid: WeekGrid,
        history_start: WeekId,
        confirm: bool,
    ) -> Result<RecurringSaveReport, ScheduleError> {
        if edited_week < current {
            return Err(ScheduleError::PastWeek(edited_week));
        }

        let future = self.schedule.overrides_after(edited_week);
        if !future.is_empty() && !confirm {
            return Err(ScheduleError::FutureOverridesExist(future));
        }

        // The template applies to every week, so it carries no occupied
        // cells of its own.
        let mut template = grid;
        scrub_occupied(&mut template, &BTreeSet::new());

        let mut frozen = Vec::new();
        let mut week = history_start;
        while week < edited_week {
            if !self.schedule.has_override(week) {
                self.schedule
                    .overrides
                    .insert(week, self.schedule.recurring.clone());
                frozen.push(week);
            }
            week = week.next();
        }

        let mut deleted = Vec::new();
        for week in future {
            self.schedule.overrides.remove(&week);
            deleted.push(week);
        }
        if self.schedule.overrides.remove(&edited_week).is_some() {
            deleted.push(edited_week);
        }

        self.schedule.recurring = template;

        let weeks: Vec<WeekId> = self.accepted_by_week.keys().copied().collect();
        for week in weeks {
            self.reconcile_week(week);
        }

        tracing::info!(
            edited = %edited_week,
            frozen = frozen.len(),
            deleted = deleted.len(),
            "recurring template replaced"
        );
        Ok(RecurringSaveReport { frozen, deleted })
    }

    /// Re-establish the occupied-cell invariant for one week after its grid
    /// was overwritten: ghosted quests (spanning any cell that is no longer
    /// occupied) are dropped, and occupied cells no surviving quest backs
    /// are scrubbed back to free. Silent data repair, not an error.
    fn reconcile_week(&mut self, week: WeekId) {
        let before = self.accepted(week).len();
        if before == 0 && !self.schedule.has_override(week) {
            return;
        }

        let survivors: Vec<Quest> = {
            let grid = self.schedule.display_grid(week);
            self.accepted(week)
                .iter()
                .filter(|q| {
                    q.slots()
                        .all(|slot| grid.cell(q.day, slot) == GridCell::QuestOccupied)
                })
                .cloned()
                .collect()
        };

        let dropped = before - survivors.len();
        if dropped > 0 {
            tracing::debug!(week = %week, dropped, "ghost quests reconciled away");
        }

        if self.schedule.has_override(week) {
            let covered: BTreeSet<(u8, u8)> = survivors
                .iter()
                .flat_map(|q| q.slots().map(move |slot| (q.day, slot)))
                .collect();
            let grid = self.schedule.override_for_edit(week);
            scrub_occupied(grid, &covered);
        }

        if survivors.is_empty() {
            self.accepted_by_week.remove(&week);
        } else {
            self.accepted_by_week.insert(week, survivors);
        }
    }
}

/// Reset every occupied cell not listed in `covered` back to free.
fn scrub_occupied(grid: &mut WeekGrid, covered: &BTreeSet<(u8, u8)>) {
    for day in 0..DAYS_PER_WEEK as u8 {
        for slot in 0..SLOTS_PER_DAY as u8 {
            if grid.cell(day, slot) == GridCell::QuestOccupied && !covered.contains(&(day, slot)) {
                grid.set(day, slot, GridCell::Free);
            }
        }
    }
}
