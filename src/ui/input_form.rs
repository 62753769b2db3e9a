use crate::app::InputFormState;
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

/// Render the input form for adding a task
pub fn render_input_form(f: &mut Frame, form: &InputFormState, area: Rect) {
    let modal_area = create_modal_area(area);

    // Clear the area behind the form
    f.render_widget(Clear, modal_area);

    let mut lines = Vec::new();

    lines.push(Line::raw(""));
    push_field(&mut lines, "Task:", &form.text, form.editing_field == 0);
    push_field(
        &mut lines,
        "Remind at (YYYY-MM-DD HH:MM, optional):",
        &form.due,
        form.editing_field == 1,
    );
    push_field(
        &mut lines,
        "Minutes before (optional):",
        &form.lead,
        form.editing_field == 2,
    );

    // Instructions
    lines.push(Line::raw("Tab to switch fields  ·  Enter to submit  ·  Esc to cancel"));
    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::raw("(Default lead time: "),
        Span::styled("5m", modal_title_style()),
        Span::raw(")"),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Add Task ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

fn push_field(lines: &mut Vec<Line<'_>>, label: &'static str, value: &str, editing: bool) {
    let label_text = if editing {
        format!("{} (editing)", label)
    } else {
        label.to_string()
    };
    lines.push(Line::raw(label_text));

    lines.push(Line::from(vec![
        Span::raw("> "),
        Span::styled(value.to_string(), modal_title_style()),
        if editing {
            Span::styled("█", modal_title_style()) // Cursor
        } else {
            Span::raw("")
        },
    ]));
    lines.push(Line::raw(""));
}
