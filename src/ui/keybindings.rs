use crate::domain::UiMode;
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Render the keybindings hint bar for the current mode
pub fn render_keybindings(f: &mut Frame, mode: UiMode, area: Rect) {
    let hints = match mode {
        UiMode::EditingCard => Line::from(vec![
            Span::raw(" type text   "),
            Span::raw("Tab status   "),
            Span::raw("F1/F2/F3 Done/Drop/Doing   "),
            Span::raw("F4 no status   "),
            Span::raw("Enter save   "),
            Span::raw("Esc cancel"),
        ]),
        UiMode::ConfirmClear => Line::from(vec![
            Span::raw(" y clear   "),
            Span::raw("n keep"),
        ]),
        UiMode::Normal => Line::from(vec![
            Span::raw(" ←/→ day   "),
            Span::raw("↑/↓ card   "),
            Span::raw("a add   "),
            Span::raw("Enter save/edit   "),
            Span::raw("s status   "),
            Span::raw("x delete   "),
            Span::raw("[ / ] week   "),
            Span::raw("t today   "),
            Span::raw("w save   "),
            Span::raw("C clear   "),
            Span::raw("q quit"),
        ]),
    };

    let paragraph = Paragraph::new(hints).style(hint_style());
    f.render_widget(paragraph, area);
}
