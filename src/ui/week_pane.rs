use crate::app::AppState;
use crate::domain::{Card, DayColumn, TaskStatus};
use crate::ui::styles::{
    border_style, default_style, disabled_style, focused_border_style, hint_style, input_style,
    selected_style, status_style, title_style, today_style,
};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Short label per status option, fits a narrow column
fn option_short(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Completed => "Done",
        TaskStatus::Abandoned => "Drop",
        TaskStatus::InProcess => "Doing",
        TaskStatus::Default => "",
    }
}

/// Render all seven day columns
pub fn render_week_pane(f: &mut Frame, app: &AppState, areas: &[Rect]) {
    for (day, (column, area)) in app.grid.columns.iter().zip(areas).enumerate() {
        render_day_column(f, app, day, column, *area);
    }
}

fn render_day_column(f: &mut Frame, app: &AppState, day: usize, column: &DayColumn, area: Rect) {
    let is_focused = day == app.selected_day;
    let heading_style = if column.date == app.today {
        today_style()
    } else {
        title_style()
    };
    let title = format!(" {} ", column.date.format("%a %-d"));

    let mut lines = Vec::new();
    for (index, card) in column.cards.iter().enumerate() {
        let is_selected = is_focused && index == app.selected_card;
        lines.extend(card_lines(card, is_selected));
        lines.push(Line::raw(""));
    }
    if column.cards.is_empty() && is_focused {
        lines.push(Line::styled("a: + Task", hint_style()));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if is_focused {
            focused_border_style()
        } else {
            border_style()
        })
        .title(Span::styled(title, heading_style));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

/// Lines for one card: the text (or input field), then the status options and button
pub fn card_lines(card: &Card, is_selected: bool) -> Vec<Line<'static>> {
    let highlight = |style: Style| if is_selected { selected_style() } else { style };

    let text_line = if card.is_editing() {
        Line::from(vec![
            Span::styled("> ", highlight(default_style())),
            Span::styled(card.text.clone(), highlight(input_style())),
            Span::styled("█", input_style()),
        ])
    } else {
        Line::from(Span::styled(
            card.display_text(),
            highlight(status_style(card.status)),
        ))
    };

    let mut options = Vec::new();
    for option in TaskStatus::OPTIONS {
        let marker = if card.status == option { "●" } else { "○" };
        let style = if !card.status_enabled() {
            disabled_style()
        } else if card.status == option {
            status_style(option)
        } else {
            default_style()
        };
        options.push(Span::styled(format!("{}{} ", marker, option_short(option)), style));
    }
    options.push(Span::styled(format!("[{}]", card.button_label()), hint_style()));

    vec![text_line, Line::from(options)]
}
