use crate::domain::DAYS_PER_WEEK;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main layout structure
pub struct MainLayout {
    pub header_area: Rect,
    pub keybindings_area: Rect,
    pub day_areas: Vec<Rect>,
    pub status_area: Rect,
}

/// Create the main layout
/// - Top bar: week header (1 row) and keybindings (1 row)
/// - Main area: seven equal day columns, Monday to Sunday
/// - Bottom bar: status line (1 row)
pub fn create_layout(area: Rect) -> MainLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Length(1), // Keybindings bar
            Constraint::Min(0),    // Day columns
            Constraint::Length(1), // Status line
        ])
        .split(area);

    let day_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, DAYS_PER_WEEK as u32); DAYS_PER_WEEK])
        .split(rows[2])
        .to_vec();

    MainLayout {
        header_area: rows[0],
        keybindings_area: rows[1],
        day_areas,
        status_area: rows[3],
    }
}

/// Create centered modal area
pub fn create_modal_area(area: Rect) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Length(9),
            Constraint::Percentage(30),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(50),
            Constraint::Percentage(25),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}
