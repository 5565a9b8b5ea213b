use crate::app::AppState;
use crate::domain::UiMode;
use crate::ui::{
    layout::create_modal_area,
    styles::{modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the clear-week confirmation
pub fn render_confirm_clear_modal(f: &mut Frame, app: &AppState, area: Rect) {
    if app.ui_mode != UiMode::ConfirmClear {
        return;
    }
    let modal_area = create_modal_area(area);

    // Clear the area behind the modal
    f.render_widget(Clear, modal_area);

    let tasks = app
        .store
        .get(&app.week_key)
        .map_or(0, |week| week.task_count());

    let lines = vec![
        Line::raw(""),
        Line::raw(format!("  Clear all {} tasks of week {}?", tasks, app.week_key)),
        Line::raw("  They are removed from the server too."),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  [y]", modal_title_style()),
            Span::raw(" Clear  "),
            Span::styled("[n]", modal_title_style()),
            Span::raw(" Keep"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Clear Week ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}
