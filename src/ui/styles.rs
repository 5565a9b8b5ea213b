use crate::domain::TaskStatus;
use ratatui::style::{Color, Modifier, Style};

/// Default text style
pub fn default_style() -> Style {
    Style::default().fg(Color::White)
}

/// Selected card highlight style
pub fn selected_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::LightCyan)
        .add_modifier(Modifier::BOLD)
}

/// Title style for panes
pub fn title_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Border style
pub fn border_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Border of the column holding the selection
pub fn focused_border_style() -> Style {
    Style::default().fg(Color::LightCyan)
}

/// Column title for today
pub fn today_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Modal background style
pub fn modal_bg_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

/// Modal title style
pub fn modal_title_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Keybinding hint style
pub fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Error message style
pub fn error_style() -> Style {
    Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD)
}

/// Status option that cannot be changed right now
pub fn disabled_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Text field being typed into
pub fn input_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Card color per status
pub fn status_style(status: TaskStatus) -> Style {
    match status {
        TaskStatus::Completed => Style::default().fg(Color::Green),
        TaskStatus::Abandoned => Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::CROSSED_OUT),
        TaskStatus::InProcess => Style::default().fg(Color::Yellow),
        TaskStatus::Default => Style::default().fg(Color::Gray),
    }
}
