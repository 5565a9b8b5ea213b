pub mod keybindings;
pub mod layout;
pub mod modal;
pub mod styles;
pub mod week_pane;

use crate::app::AppState;
use keybindings::render_keybindings;
use layout::create_layout;
use modal::render_confirm_clear_modal;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use styles::{default_style, error_style, hint_style, title_style};
use week_pane::render_week_pane;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);

    render_header(f, app, layout.header_area);
    render_keybindings(f, app.ui_mode, layout.keybindings_area);
    render_week_pane(f, app, &layout.day_areas);
    render_status_line(f, app, layout.status_area);

    render_confirm_clear_modal(f, app, size);
}

/// Week being shown, today's date and sync state
fn render_header(f: &mut Frame, app: &AppState, area: Rect) {
    let mut spans = vec![
        Span::styled(format!(" Week of {} ", app.week_key), title_style()),
        Span::styled(
            format!("  {}", app.today.format("%B %-d, %Y")),
            default_style(),
        ),
    ];
    if app.week_key.contains(app.today) {
        spans.push(Span::styled("  (this week)", hint_style()));
    }
    if app.loading {
        spans.push(Span::styled("  loading…", hint_style()));
    }
    if app.offline {
        spans.push(Span::styled("  offline", hint_style()));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_status_line(f: &mut Frame, app: &AppState, area: Rect) {
    let line = match &app.status {
        Some(status) if status.is_error => Line::from(Span::styled(format!(" {}", status.text), error_style())),
        Some(status) => Line::from(Span::styled(format!(" {}", status.text), hint_style())),
        None => Line::raw(""),
    };
    f.render_widget(Paragraph::new(line), area);
}
