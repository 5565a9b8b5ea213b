use super::enums::TaskStatus;
use super::task::Task;

/// Whether a card is being typed into or shows committed data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardMode {
    Editing,
    Saved,
}

/// What happened when an edit was cancelled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    /// Card went back to its committed text and status
    Reverted,
    /// Card was never committed and should be removed from the column
    Discard,
}

/// A single task card on the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// Draft text while editing, committed text once saved
    pub text: String,
    pub status: TaskStatus,
    pub mode: CardMode,
    /// Last committed task, restored on cancel and used to rename in place
    committed: Option<Task>,
}

impl Card {
    /// Fresh card with an empty draft (the "+Task" action)
    pub fn new_draft() -> Self {
        Self {
            text: String::new(),
            status: TaskStatus::Default,
            mode: CardMode::Editing,
            committed: None,
        }
    }

    /// Card rendered from stored data, already saved
    pub fn saved(task: &Task) -> Self {
        Self {
            text: task.text.clone(),
            status: task.status,
            mode: CardMode::Saved,
            committed: Some(task.clone()),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.mode == CardMode::Editing
    }

    /// Label of the toggle button
    pub fn button_label(&self) -> &'static str {
        match self.mode {
            CardMode::Editing => "Save",
            CardMode::Saved => "Edit",
        }
    }

    /// Status options can only be changed while editing
    pub fn status_enabled(&self) -> bool {
        self.is_editing()
    }

    /// Static text shown on a saved card
    pub fn display_text(&self) -> String {
        format!("{} - {}", self.text, self.status.label())
    }

    /// Text this card was last committed with
    pub fn committed_text(&self) -> Option<&str> {
        self.committed.as_ref().map(|t| t.text.as_str())
    }

    pub fn push_char(&mut self, c: char) {
        if self.is_editing() {
            self.text.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if self.is_editing() {
            self.text.pop();
        }
    }

    /// Select one of the options; ignored unless editing
    pub fn select_status(&mut self, status: TaskStatus) {
        if self.status_enabled() {
            self.status = status;
        }
    }

    pub fn cycle_status(&mut self) {
        if self.status_enabled() {
            self.status = self.status.next();
        }
    }

    /// Editing → Saved, yielding the task to store
    ///
    /// Returns None (and stays in Editing) when the trimmed text is empty or
    /// the card is not being edited.
    pub fn commit(&mut self) -> Option<Task> {
        if !self.is_editing() {
            return None;
        }
        let text = self.text.trim();
        if text.is_empty() {
            return None;
        }
        let task = Task::new(text, self.status);
        self.text = task.text.clone();
        self.mode = CardMode::Saved;
        self.committed = Some(task.clone());
        Some(task)
    }

    /// Saved → Editing with the committed text pre-filled
    pub fn edit(&mut self) {
        if let Some(task) = &self.committed {
            self.text = task.text.clone();
            self.status = task.status;
        }
        self.mode = CardMode::Editing;
    }

    /// Leave editing without touching stored data
    pub fn cancel(&mut self) -> CancelOutcome {
        match &self.committed {
            Some(task) => {
                self.text = task.text.clone();
                self.status = task.status;
                self.mode = CardMode::Saved;
                CancelOutcome::Reverted
            }
            None => CancelOutcome::Discard,
        }
    }

    /// Change the status of a saved card directly, returning the updated task
    pub fn set_saved_status(&mut self, status: TaskStatus) -> Option<Task> {
        if self.is_editing() {
            return None;
        }
        let task = self.committed.as_mut()?;
        task.status = status;
        self.status = status;
        Some(task.clone())
    }
}
