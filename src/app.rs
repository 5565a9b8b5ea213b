use crate::domain::{
    week_key, CancelOutcome, Card, TaskStatus, UiMode, WeekGrid, WeekKey, WeekStore,
    DAYS_PER_WEEK,
};
use crate::storage::{SaveOutcome, SyncEvent, SyncRequest};
use chrono::{Duration, NaiveDate};

/// One-line message shown under the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

impl StatusMessage {
    fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// Main application state
///
/// Every user action is a plain state transition; anything that must reach
/// the server or the local file is queued as a `SyncRequest` and handed to
/// the sync worker by the main loop.
pub struct AppState {
    pub store: WeekStore,
    pub today: NaiveDate,
    pub current_date: NaiveDate,
    pub week_key: WeekKey,
    pub grid: WeekGrid,
    pub selected_day: usize,
    pub selected_card: usize,
    pub ui_mode: UiMode,
    pub status: Option<StatusMessage>,
    pub loading: bool,
    pub offline: bool,
    latest_load_seq: u64,
    /// The displayed week changed locally after its latest load was sent
    edited_since_load: bool,
    outbox: Vec<SyncRequest>,
}

impl AppState {
    /// Start on the week containing `today`, showing `store` until the server answers
    pub fn new(store: WeekStore, today: NaiveDate, offline: bool) -> Self {
        let key = week_key(today);
        let grid = WeekGrid::build(key, &store);
        let mut app = Self {
            store,
            today,
            current_date: today,
            week_key: key,
            grid,
            selected_day: today_index(today),
            selected_card: 0,
            ui_mode: UiMode::Normal,
            status: None,
            loading: false,
            offline,
            latest_load_seq: 0,
            edited_since_load: false,
            outbox: Vec::new(),
        };
        app.queue_load();
        app
    }

    /// Drain the requests produced since the last call
    pub fn take_requests(&mut self) -> Vec<SyncRequest> {
        std::mem::take(&mut self.outbox)
    }

    fn queue_load(&mut self) {
        self.latest_load_seq += 1;
        self.edited_since_load = false;
        self.loading = true;
        self.outbox.push(SyncRequest::Load {
            seq: self.latest_load_seq,
            key: self.week_key,
        });
    }

    /// Record a local change to the displayed week; an in-flight load would undo it
    fn mark_edited(&mut self) {
        self.edited_since_load = true;
    }

    fn queue_save(&mut self) {
        self.outbox.push(SyncRequest::Save {
            key: self.week_key,
            store: self.store.clone(),
        });
    }

    fn rebuild_grid(&mut self) {
        self.grid = WeekGrid::build(self.week_key, &self.store);
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        self.selected_day = self.selected_day.min(DAYS_PER_WEEK - 1);
        let len = self.grid.len(self.selected_day);
        self.selected_card = self.selected_card.min(len.saturating_sub(1));
    }

    /// Currently selected card, if the selected column has any
    pub fn selected(&self) -> Option<&Card> {
        self.grid.card(self.selected_day, self.selected_card)
    }

    fn selected_mut(&mut self) -> Option<&mut Card> {
        self.grid.card_mut(self.selected_day, self.selected_card)
    }

    /// Position of the selected saved card in its day bucket
    fn selected_bucket_index(&self) -> Option<usize> {
        let text = self.selected()?.committed_text()?;
        self.store
            .get(&self.week_key)?
            .day(self.selected_day)
            .iter()
            .position(|t| t.text == text)
    }

    // ----- navigation -----

    /// Move the tracked date by whole weeks and load that week
    pub fn shift_week(&mut self, weeks: i64) {
        self.current_date += Duration::weeks(weeks);
        self.show_week_of(self.current_date);
    }

    pub fn prev_week(&mut self) {
        self.shift_week(-1);
    }

    pub fn next_week(&mut self) {
        self.shift_week(1);
    }

    /// Jump back to the week containing today
    pub fn this_week(&mut self) {
        self.current_date = self.today;
        self.show_week_of(self.today);
        self.selected_day = today_index(self.today);
        self.clamp_selection();
    }

    fn show_week_of(&mut self, date: NaiveDate) {
        self.week_key = week_key(date);
        self.store.week_mut(self.week_key);
        self.ui_mode = UiMode::Normal;
        self.rebuild_grid();
        self.queue_load();
        tracing::debug!(week = %self.week_key, seq = self.latest_load_seq, "navigated");
    }

    pub fn move_day_left(&mut self) {
        self.selected_day = self.selected_day.saturating_sub(1);
        self.clamp_selection();
    }

    pub fn move_day_right(&mut self) {
        if self.selected_day + 1 < DAYS_PER_WEEK {
            self.selected_day += 1;
        }
        self.clamp_selection();
    }

    pub fn move_card_up(&mut self) {
        self.selected_card = self.selected_card.saturating_sub(1);
    }

    pub fn move_card_down(&mut self) {
        if self.selected_card + 1 < self.grid.len(self.selected_day) {
            self.selected_card += 1;
        }
    }

    // ----- card editing -----

    /// Add an empty card to the selected day and start editing it
    pub fn add_card(&mut self) {
        if let Some(index) = self.grid.push_card(self.selected_day, Card::new_draft()) {
            self.selected_card = index;
            self.ui_mode = UiMode::EditingCard;
        }
    }

    pub fn type_char(&mut self, c: char) {
        if let Some(card) = self.selected_mut() {
            card.push_char(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(card) = self.selected_mut() {
            card.pop_char();
        }
    }

    pub fn select_status(&mut self, status: TaskStatus) {
        if let Some(card) = self.selected_mut() {
            card.select_status(status);
        }
    }

    pub fn cycle_status(&mut self) {
        if let Some(card) = self.selected_mut() {
            card.cycle_status();
        }
    }

    /// The Save/Edit button of the selected card
    pub fn toggle_selected(&mut self) {
        let Some(card) = self.selected() else {
            return;
        };
        if card.is_editing() {
            self.commit_selected();
        } else if let Some(card) = self.selected_mut() {
            card.edit();
            self.ui_mode = UiMode::EditingCard;
        }
    }

    fn commit_selected(&mut self) {
        let day = self.selected_day;
        let key = self.week_key;
        let Some(card) = self.grid.card_mut(day, self.selected_card) else {
            return;
        };
        let Some(task) = card.commit() else {
            self.status = Some(StatusMessage::error("Task text cannot be empty"));
            return;
        };

        let kind = self.store.week_mut(key).save_task(day, task.clone());
        // The column mirrors the bucket again; drafts elsewhere in it survive
        self.grid.refresh_day(day, self.store.week_mut(key).day(day));
        self.selected_card = kind.index();
        self.mark_edited();

        tracing::debug!(week = %key, day, text = %task.text, status = task.status.label(), ?kind, "task saved");
        self.ui_mode = UiMode::Normal;
        self.queue_save();
    }

    /// Leave editing without storing anything
    pub fn cancel_edit(&mut self) {
        let Some(card) = self.selected_mut() else {
            self.ui_mode = UiMode::Normal;
            return;
        };
        if card.cancel() == CancelOutcome::Discard {
            self.grid.remove_card(self.selected_day, self.selected_card);
            self.clamp_selection();
        }
        self.ui_mode = UiMode::Normal;
    }

    /// Advance the status of a saved card and push just that task
    pub fn cycle_saved_status(&mut self) {
        let Some(index) = self.selected_bucket_index() else {
            return;
        };
        let day = self.selected_day;
        let key = self.week_key;
        let Some(card) = self.selected_mut() else {
            return;
        };
        let next = card.status.next();
        let Some(task) = card.set_saved_status(next) else {
            return;
        };

        self.store.week_mut(key).update_task(day, index, task.clone());
        self.mark_edited();
        if self.offline {
            self.queue_save();
        } else {
            self.outbox.push(SyncRequest::UpdateTask {
                key,
                day,
                index,
                task,
            });
        }
    }

    /// Remove the selected card; saved ones are deleted from the store too
    pub fn delete_selected(&mut self) {
        let day = self.selected_day;
        let key = self.week_key;
        let bucket_index = self.selected_bucket_index();

        if self.grid.remove_card(day, self.selected_card).is_none() {
            return;
        }
        self.clamp_selection();
        self.ui_mode = UiMode::Normal;

        let Some(index) = bucket_index else {
            return;
        };
        self.store.week_mut(key).remove_task(day, index);
        self.mark_edited();
        if self.offline {
            self.queue_save();
        } else {
            self.outbox.push(SyncRequest::DeleteTask { key, day, index });
        }
    }

    // ----- week actions -----

    /// Push the whole current week
    pub fn save_week(&mut self) {
        self.queue_save();
    }

    pub fn request_clear(&mut self) {
        self.ui_mode = UiMode::ConfirmClear;
    }

    pub fn cancel_clear(&mut self) {
        self.ui_mode = UiMode::Normal;
    }

    /// Empty the current week everywhere and redraw
    pub fn confirm_clear(&mut self) {
        self.outbox.push(SyncRequest::Clear { key: self.week_key });
        self.store.week_mut(self.week_key).clear();
        self.mark_edited();
        if self.offline {
            self.queue_save();
        }
        self.ui_mode = UiMode::Normal;
        self.rebuild_grid();
    }

    // ----- sync completions -----

    pub fn apply_event(&mut self, event: SyncEvent) {
        match event {
            SyncEvent::Loaded { seq, key, week } => {
                if seq != self.latest_load_seq {
                    tracing::debug!(week = %key, seq, latest = self.latest_load_seq, "ignoring stale load");
                    return;
                }
                self.loading = false;
                if self.edited_since_load {
                    tracing::debug!(week = %key, seq, "keeping local edits over loaded week");
                    return;
                }
                self.store.insert(key, week);
                if key == self.week_key {
                    if self.grid.has_unsaved_cards() {
                        tracing::info!(week = %key, "load replaced unsaved cards");
                    }
                    self.ui_mode = UiMode::Normal;
                    self.rebuild_grid();
                }
            }
            SyncEvent::Saved { key, outcome } => {
                self.status = Some(match outcome {
                    SaveOutcome::RemoteCommitted => StatusMessage::info(format!("Week {key} saved")),
                    SaveOutcome::LocalFallback if self.offline => {
                        StatusMessage::info(format!("Week {key} saved locally"))
                    }
                    SaveOutcome::LocalFallback => {
                        StatusMessage::error(format!("Server unreachable, week {key} saved locally"))
                    }
                });
            }
            SyncEvent::Cleared { key } => {
                self.status = Some(StatusMessage::info(format!("Week {key} cleared")));
            }
            SyncEvent::TaskUpdated {
                key,
                day,
                index,
                result,
            } => match result {
                Ok(()) => self.status = Some(StatusMessage::info("Task updated")),
                Err(e) => {
                    tracing::error!(week = %key, day, index, error = %e, "failed to update task");
                    self.status = Some(StatusMessage::error(format!("Failed to update task: {e}")));
                }
            },
            SyncEvent::TaskDeleted {
                key,
                day,
                index,
                result,
            } => match result {
                Ok(()) => self.status = Some(StatusMessage::info("Task deleted")),
                Err(e) => {
                    tracing::error!(week = %key, day, index, error = %e, "failed to delete task");
                    self.status = Some(StatusMessage::error(format!("Failed to delete task: {e}")));
                }
            },
        }
    }
}

/// Column index (0 = Monday) of a date
fn today_index(date: NaiveDate) -> usize {
    use chrono::Datelike;
    date.weekday().num_days_from_monday() as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CardMode, Task, Week};
    use crate::storage::api::ApiError;
    use pretty_assertions::assert_eq;

    fn thursday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 13).unwrap()
    }

    fn new_app() -> AppState {
        let mut app = AppState::new(WeekStore::new(), thursday(), false);
        app.take_requests();
        app
    }

    fn type_text(app: &mut AppState, text: &str) {
        for c in text.chars() {
            app.type_char(c);
        }
    }

    fn load_seqs(requests: &[SyncRequest]) -> Vec<u64> {
        requests
            .iter()
            .filter_map(|r| match r {
                SyncRequest::Load { seq, .. } => Some(*seq),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_starts_on_current_week_and_loads_it() {
        let mut app = AppState::new(WeekStore::new(), thursday(), false);
        assert_eq!(app.week_key.to_string(), "2024-06-10");
        assert_eq!(app.selected_day, 3);
        assert!(app.loading);
        assert_eq!(
            app.take_requests(),
            vec![SyncRequest::Load {
                seq: 1,
                key: app.week_key
            }]
        );
        assert!(app.take_requests().is_empty());
    }

    #[test]
    fn test_add_task_and_save() {
        let mut app = new_app();
        app.selected_day = 0;
        app.add_card();
        assert_eq!(app.ui_mode, UiMode::EditingCard);

        type_text(&mut app, "Write report");
        app.select_status(TaskStatus::InProcess);
        app.toggle_selected();

        assert_eq!(app.ui_mode, UiMode::Normal);
        let week = app.store.get(&app.week_key).unwrap();
        assert_eq!(week.day(0), &[Task::new("Write report", TaskStatus::InProcess)]);
        assert_eq!(app.selected().unwrap().mode, CardMode::Saved);

        match app.take_requests().as_slice() {
            [SyncRequest::Save { key, store }] => {
                assert_eq!(*key, app.week_key);
                assert_eq!(store, &app.store);
            }
            other => panic!("unexpected requests: {other:?}"),
        }
    }

    #[test]
    fn test_saving_same_text_twice_keeps_one_task() {
        let mut app = new_app();
        for _ in 0..2 {
            app.add_card();
            type_text(&mut app, "X");
            app.select_status(TaskStatus::Completed);
            app.toggle_selected();
        }

        let week = app.store.get(&app.week_key).unwrap();
        assert_eq!(week.day(3).len(), 1);
        assert_eq!(app.grid.len(3), 1);
    }

    #[test]
    fn test_empty_card_does_not_save() {
        let mut app = new_app();
        app.add_card();
        type_text(&mut app, "   ");
        app.toggle_selected();

        assert_eq!(app.ui_mode, UiMode::EditingCard);
        assert!(app.status.as_ref().unwrap().is_error);
        assert!(app.take_requests().is_empty());
    }

    #[test]
    fn test_edited_text_saves_as_new_task() {
        let mut app = new_app();
        app.add_card();
        type_text(&mut app, "Draft");
        app.toggle_selected();

        app.toggle_selected();
        assert_eq!(app.ui_mode, UiMode::EditingCard);
        assert_eq!(app.selected().unwrap().text, "Draft");
        for _ in 0.."Draft".len() {
            app.backspace();
        }
        type_text(&mut app, "Final");
        app.toggle_selected();

        let week = app.store.get(&app.week_key).unwrap();
        assert_eq!(
            week.day(3),
            &[
                Task::new("Draft", TaskStatus::Default),
                Task::new("Final", TaskStatus::Default)
            ]
        );
        // The grid shows every task in the bucket, with the new one selected
        assert_eq!(app.grid.len(3), 2);
        assert_eq!(app.grid.card(3, 0).unwrap().text, "Draft");
        assert_eq!(app.selected().unwrap().text, "Final");
    }

    #[test]
    fn test_edit_onto_existing_text_overwrites_it() {
        let mut app = new_app();
        for text in ["A", "B"] {
            app.add_card();
            type_text(&mut app, text);
            app.toggle_selected();
        }

        app.selected_card = 0;
        app.toggle_selected();
        app.backspace();
        type_text(&mut app, "B");
        app.select_status(TaskStatus::Completed);
        app.toggle_selected();

        let week = app.store.get(&app.week_key).unwrap();
        assert_eq!(
            week.day(3),
            &[
                Task::new("A", TaskStatus::Default),
                Task::new("B", TaskStatus::Completed)
            ]
        );
        let texts: Vec<_> = app.grid.columns[3].cards.iter().map(|c| c.text.clone()).collect();
        assert_eq!(texts, vec!["A", "B"]);
        assert_eq!(app.selected_card, 1);
    }

    #[test]
    fn test_commit_keeps_other_drafts_in_column() {
        let mut app = new_app();
        app.add_card();
        type_text(&mut app, "pending");
        app.add_card();
        type_text(&mut app, "done");
        app.toggle_selected();

        assert_eq!(app.grid.len(3), 2);
        assert_eq!(app.selected().unwrap().text, "done");
        let draft = app.grid.card(3, 1).unwrap();
        assert!(draft.is_editing());
        assert_eq!(draft.text, "pending");
    }

    #[test]
    fn test_cancel_new_card_discards_it() {
        let mut app = new_app();
        app.add_card();
        type_text(&mut app, "never mind");
        app.cancel_edit();

        assert_eq!(app.grid.len(3), 0);
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.take_requests().is_empty());
    }

    #[test]
    fn test_navigation_issues_sequenced_loads() {
        let mut app = new_app();
        app.next_week();
        assert_eq!(app.week_key.to_string(), "2024-06-17");
        app.prev_week();
        app.prev_week();
        assert_eq!(app.week_key.to_string(), "2024-06-03");
        assert!(app.store.contains(&app.week_key));

        assert_eq!(load_seqs(&app.take_requests()), vec![2, 3, 4]);

        app.this_week();
        assert_eq!(app.week_key.to_string(), "2024-06-10");
        assert_eq!(app.current_date, thursday());
    }

    #[test]
    fn test_stale_load_is_ignored() {
        let mut app = new_app();
        let first_key = app.week_key;
        app.next_week();
        let second_key = app.week_key;

        let mut stale = Week::new();
        stale.save_task(0, Task::new("stale", TaskStatus::Default));
        app.apply_event(SyncEvent::Loaded {
            seq: 1,
            key: first_key,
            week: stale,
        });
        assert!(app.store.get(&first_key).map_or(true, Week::is_empty));
        assert!(app.loading);

        let mut fresh = Week::new();
        fresh.save_task(2, Task::new("fresh", TaskStatus::Completed));
        app.apply_event(SyncEvent::Loaded {
            seq: 2,
            key: second_key,
            week: fresh,
        });
        assert!(!app.loading);
        assert_eq!(app.grid.total_cards(), 1);
        assert_eq!(app.grid.card(2, 0).unwrap().text, "fresh");
    }

    #[test]
    fn test_load_after_local_save_keeps_task() {
        let mut app = new_app();
        app.add_card();
        type_text(&mut app, "Write report");
        app.toggle_selected();

        // The startup load was read before the save reached the server
        app.apply_event(SyncEvent::Loaded {
            seq: 1,
            key: app.week_key,
            week: Week::new(),
        });

        assert!(!app.loading);
        assert_eq!(
            app.store.get(&app.week_key).unwrap().day(3),
            &[Task::new("Write report", TaskStatus::Default)]
        );
        assert_eq!(app.grid.len(3), 1);
    }

    #[test]
    fn test_load_after_local_clear_keeps_week_empty() {
        let mut app = new_app();
        app.request_clear();
        app.confirm_clear();

        let mut server = Week::new();
        server.save_task(0, Task::new("old", TaskStatus::Default));
        app.apply_event(SyncEvent::Loaded {
            seq: 1,
            key: app.week_key,
            week: server,
        });

        assert!(app.store.get(&app.week_key).unwrap().is_empty());
        assert_eq!(app.grid.total_cards(), 0);
    }

    #[test]
    fn test_load_applies_after_navigation_resets_edits() {
        let mut app = new_app();
        app.add_card();
        type_text(&mut app, "local");
        app.toggle_selected();
        app.next_week();
        app.prev_week();
        app.take_requests();

        let mut server = Week::new();
        server.save_task(3, Task::new("local", TaskStatus::Completed));
        app.apply_event(SyncEvent::Loaded {
            seq: 3,
            key: app.week_key,
            week: server,
        });

        assert_eq!(
            app.store.get(&app.week_key).unwrap().day(3),
            &[Task::new("local", TaskStatus::Completed)]
        );
    }

    #[test]
    fn test_clear_week_empties_grid() {
        let mut app = new_app();
        for day in 0..DAYS_PER_WEEK {
            app.selected_day = day;
            app.add_card();
            type_text(&mut app, "task");
            app.toggle_selected();
        }
        app.take_requests();
        assert_eq!(app.grid.total_cards(), 7);

        app.request_clear();
        assert_eq!(app.ui_mode, UiMode::ConfirmClear);
        app.confirm_clear();

        assert_eq!(app.grid.total_cards(), 0);
        assert!(app.store.get(&app.week_key).unwrap().is_empty());
        assert_eq!(app.take_requests(), vec![SyncRequest::Clear { key: app.week_key }]);
    }

    #[test]
    fn test_cycle_saved_status_sends_update() {
        let mut app = new_app();
        app.add_card();
        type_text(&mut app, "Read");
        app.toggle_selected();
        app.take_requests();

        app.cycle_saved_status();
        let expected = Task::new("Read", TaskStatus::Completed);
        assert_eq!(app.store.get(&app.week_key).unwrap().day(3), &[expected.clone()]);
        assert_eq!(
            app.take_requests(),
            vec![SyncRequest::UpdateTask {
                key: app.week_key,
                day: 3,
                index: 0,
                task: expected
            }]
        );
    }

    #[test]
    fn test_delete_saved_card_sends_delete() {
        let mut app = new_app();
        for text in ["a", "b"] {
            app.add_card();
            type_text(&mut app, text);
            app.toggle_selected();
        }
        app.take_requests();

        app.selected_card = 1;
        app.delete_selected();
        assert_eq!(app.grid.len(3), 1);
        assert_eq!(app.selected_card, 0);
        assert_eq!(
            app.take_requests(),
            vec![SyncRequest::DeleteTask {
                key: app.week_key,
                day: 3,
                index: 1
            }]
        );
    }

    #[test]
    fn test_offline_changes_save_locally() {
        let mut app = AppState::new(WeekStore::new(), thursday(), true);
        app.take_requests();
        app.add_card();
        type_text(&mut app, "Read");
        app.toggle_selected();
        app.take_requests();

        app.cycle_saved_status();
        assert!(matches!(app.take_requests().as_slice(), [SyncRequest::Save { .. }]));

        app.delete_selected();
        assert!(matches!(app.take_requests().as_slice(), [SyncRequest::Save { .. }]));
    }

    #[test]
    fn test_sync_failures_reach_status_line() {
        let mut app = new_app();
        app.apply_event(SyncEvent::Saved {
            key: app.week_key,
            outcome: SaveOutcome::LocalFallback,
        });
        assert!(app.status.as_ref().unwrap().is_error);

        app.apply_event(SyncEvent::TaskDeleted {
            key: app.week_key,
            day: 0,
            index: 0,
            result: Err(ApiError::Status {
                url: "/api/tasks/2024-06-10/0/0".to_string(),
                status: 500,
            }),
        });
        let status = app.status.clone().unwrap();
        assert!(status.is_error);
        assert!(status.text.starts_with("Failed to delete task"));

        app.apply_event(SyncEvent::Saved {
            key: app.week_key,
            outcome: SaveOutcome::RemoteCommitted,
        });
        assert!(!app.status.as_ref().unwrap().is_error);
    }

    #[test]
    fn test_selection_is_clamped() {
        let mut app = new_app();
        app.selected_day = 6;
        app.move_day_right();
        assert_eq!(app.selected_day, 6);
        app.move_card_down();
        assert_eq!(app.selected_card, 0);
        assert!(app.selected().is_none());

        app.move_day_left();
        assert_eq!(app.selected_day, 5);
    }
}
