use crate::app::AppState;
use crate::domain::{TaskStatus, UiMode};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events; returns true when the app should quit
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> bool {
    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::EditingCard => {
            handle_editing_mode(app, key);
            false
        }
        UiMode::ConfirmClear => {
            handle_confirm_clear_mode(app, key);
            false
        }
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,

        // Selection
        KeyCode::Left | KeyCode::Char('h') => app.move_day_left(),
        KeyCode::Right | KeyCode::Char('l') => app.move_day_right(),
        KeyCode::Up | KeyCode::Char('k') => app.move_card_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_card_down(),

        // Week navigation
        KeyCode::Char('[') | KeyCode::PageUp => app.prev_week(),
        KeyCode::Char(']') | KeyCode::PageDown => app.next_week(),
        KeyCode::Char('t') | KeyCode::Char('T') => app.this_week(),

        // Cards
        KeyCode::Char('a') | KeyCode::Char('+') => app.add_card(),
        KeyCode::Enter | KeyCode::Char('e') => app.toggle_selected(),
        KeyCode::Char('s') | KeyCode::Char('S') => app.cycle_saved_status(),
        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Delete => app.delete_selected(),

        // Week actions
        KeyCode::Char('w') | KeyCode::Char('W') => app.save_week(),
        KeyCode::Char('C') => app.request_clear(),

        _ => {}
    }
    false
}

/// Handle keys while a card's text field has focus
fn handle_editing_mode(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.toggle_selected(),
        KeyCode::Esc => app.cancel_edit(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Tab => app.cycle_status(),
        KeyCode::F(1) => app.select_status(TaskStatus::Completed),
        KeyCode::F(2) => app.select_status(TaskStatus::Abandoned),
        KeyCode::F(3) => app.select_status(TaskStatus::InProcess),
        KeyCode::F(4) => app.select_status(TaskStatus::Default),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => app.type_char(c),
        _ => {}
    }
}

fn handle_confirm_clear_mode(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_clear(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_clear(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Task, WeekStore};
    use crate::storage::SyncRequest;
    use chrono::NaiveDate;

    fn press(app: &mut AppState, code: KeyCode) -> bool {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn new_app() -> AppState {
        let today = NaiveDate::from_ymd_opt(2024, 6, 13).unwrap();
        let mut app = AppState::new(WeekStore::new(), today, false);
        app.take_requests();
        app
    }

    #[test]
    fn test_add_type_and_save_card() {
        let mut app = new_app();
        press(&mut app, KeyCode::Char('a'));
        for c in "qx".chars() {
            // Typing must not trigger quit or delete while editing
            assert!(!press(&mut app, KeyCode::Char(c)));
        }
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::F(3));
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(
            app.store.get(&app.week_key).unwrap().day(3),
            &[Task::new("q", TaskStatus::InProcess)]
        );
    }

    #[test]
    fn test_quit_only_in_normal_mode() {
        let mut app = new_app();
        assert!(press(&mut app, KeyCode::Char('q')));

        press(&mut app, KeyCode::Char('C'));
        assert_eq!(app.ui_mode, UiMode::ConfirmClear);
        assert!(!press(&mut app, KeyCode::Char('q')));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_week_navigation_keys() {
        let mut app = new_app();
        press(&mut app, KeyCode::Char(']'));
        assert_eq!(app.week_key.to_string(), "2024-06-17");
        press(&mut app, KeyCode::Char('['));
        press(&mut app, KeyCode::Char('['));
        assert_eq!(app.week_key.to_string(), "2024-06-03");
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.week_key.to_string(), "2024-06-10");

        let loads = app
            .take_requests()
            .into_iter()
            .filter(|r| matches!(r, SyncRequest::Load { .. }))
            .count();
        assert_eq!(loads, 4);
    }

    #[test]
    fn test_escape_cancels_new_card() {
        let mut app = new_app();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('z'));
        press(&mut app, KeyCode::Esc);

        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.grid.total_cards(), 0);
    }
}
