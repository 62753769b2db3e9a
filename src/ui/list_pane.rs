use crate::app::Row;
use crate::ui::styles::{
    border_style, default_style, reminder_style, selected_style, title_style,
};
use chrono::{DateTime, Local};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Format time as HH:MM, with the date prefixed when it is not today
fn format_due(due: DateTime<Local>) -> String {
    if due.date_naive() == Local::now().date_naive() {
        due.format("%H:%M").to_string()
    } else {
        due.format("%b %d %H:%M").to_string()
    }
}

/// Render the task list pane
pub fn render_list_pane(
    f: &mut Frame,
    rows: &[Row],
    selected_index: usize,
    armed: usize,
    area: Rect,
) {
    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let line = create_row_line(row);
            let style = if idx == selected_index {
                selected_style()
            } else {
                default_style()
            };
            ListItem::new(line).style(style)
        })
        .collect();

    let title = if armed > 0 {
        format!(" Nudge 🔔 ({} tasks, {} armed) ", rows.len(), armed)
    } else {
        format!(" Nudge 🔔 ({} tasks) ", rows.len())
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(title, title_style())),
    );

    f.render_widget(list, area);
}

/// Create a single line for a rendered row
/// Format: Buy milk   🔔 16:45 (5m before)
fn create_row_line(row: &Row) -> Line<'static> {
    let mut spans = Vec::new();

    spans.push(Span::raw(row.text.clone()));

    if let Some((due, lead)) = row.reminder {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(
            format!("🔔 {} ({}m before)", format_due(due), lead),
            reminder_style(),
        ));
    }

    Line::from(spans)
}
