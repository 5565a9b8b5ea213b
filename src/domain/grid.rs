use super::card::{Card, CardMode};
use super::task::{Task, WeekStore};
use super::week_key::{WeekKey, DAYS_PER_WEEK};
use chrono::NaiveDate;

/// One day column of the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayColumn {
    pub date: NaiveDate,
    pub cards: Vec<Card>,
}

/// View model of the seven-day grid for one week
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekGrid {
    pub week_key: WeekKey,
    pub columns: Vec<DayColumn>,
}

impl WeekGrid {
    /// Rebuild every column from the store, all cards in Saved state
    pub fn build(week_key: WeekKey, store: &WeekStore) -> Self {
        let week = store.get(&week_key);
        let columns = (0..DAYS_PER_WEEK)
            .map(|day| DayColumn {
                date: week_key.day_date(day),
                cards: week
                    .map(|w| w.day(day).iter().map(Card::saved).collect())
                    .unwrap_or_default(),
            })
            .collect();

        Self { week_key, columns }
    }

    pub fn card(&self, day: usize, index: usize) -> Option<&Card> {
        self.columns.get(day)?.cards.get(index)
    }

    pub fn card_mut(&mut self, day: usize, index: usize) -> Option<&mut Card> {
        self.columns.get_mut(day)?.cards.get_mut(index)
    }

    /// Append a card to a column, returning its index
    pub fn push_card(&mut self, day: usize, card: Card) -> Option<usize> {
        let column = self.columns.get_mut(day)?;
        column.cards.push(card);
        Some(column.cards.len() - 1)
    }

    pub fn remove_card(&mut self, day: usize, index: usize) -> Option<Card> {
        let column = self.columns.get_mut(day)?;
        if index < column.cards.len() {
            Some(column.cards.remove(index))
        } else {
            None
        }
    }

    /// Number of cards in a column
    pub fn len(&self, day: usize) -> usize {
        self.columns.get(day).map_or(0, |c| c.cards.len())
    }

    pub fn total_cards(&self) -> usize {
        self.columns.iter().map(|c| c.cards.len()).sum()
    }

    /// Rebuild one column from its bucket, keeping cards that are mid-edit
    ///
    /// A card editing a stored task keeps that task's slot; new drafts follow the saved cards.
    pub fn refresh_day(&mut self, day: usize, tasks: &[Task]) {
        let Some(column) = self.columns.get_mut(day) else {
            return;
        };
        let mut editing: Vec<Option<Card>> = column
            .cards
            .drain(..)
            .filter(Card::is_editing)
            .map(Some)
            .collect();

        let mut cards: Vec<Card> = tasks
            .iter()
            .map(|task| {
                editing
                    .iter_mut()
                    .find(|slot| {
                        matches!(slot, Some(card) if card.committed_text() == Some(task.text.as_str()))
                    })
                    .and_then(Option::take)
                    .unwrap_or_else(|| Card::saved(task))
            })
            .collect();
        cards.extend(editing.into_iter().flatten());
        column.cards = cards;
    }

    /// Whether any card is mid-edit
    pub fn has_unsaved_cards(&self) -> bool {
        self.columns
            .iter()
            .flat_map(|c| c.cards.iter())
            .any(|card| card.mode == CardMode::Editing)
    }
}
