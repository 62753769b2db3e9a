use crate::domain::Permission;
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Render the keybindings hint bar
///
/// The notification hint disappears once permission is granted.
pub fn render_keybindings(f: &mut Frame, area: Rect, permission: Permission) {
    let mut hints = vec![
        Span::raw(" ↑/↓ select   "),
        Span::raw("a add   "),
        Span::raw("x delete   "),
    ];

    if permission != Permission::Granted {
        hints.push(Span::raw("n enable notifications   "));
    }

    hints.push(Span::raw("q quit"));

    let paragraph = Paragraph::new(Line::from(hints)).style(hint_style());
    f.render_widget(paragraph, area);
}
