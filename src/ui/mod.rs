pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod modal;
pub mod styles;

use crate::app::AppState;
use crate::clock::Clock;
use crate::notifications::Notifier;
use crate::persistence::Store;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use list_pane::render_list_pane;
use modal::render_message_modal;
use ratatui::{text::Span, widgets::Paragraph, Frame};
use styles::status_style;

/// Main render function - draws the entire UI
pub fn render<S: Store, N: Notifier, C: Clock>(f: &mut Frame, app: &AppState<S, N, C>) {
    let size = f.size();
    let layout = create_layout(size);

    // Render keybindings bar
    render_keybindings(f, layout.keybindings_area, app.permission());

    // Render task list
    render_list_pane(
        f,
        &app.rows,
        app.selected_index,
        app.reminders.pending(),
        layout.list_area,
    );

    // Render status line
    if let Some(status) = &app.status {
        let paragraph = Paragraph::new(Span::styled(format!(" {}", status), status_style()));
        f.render_widget(paragraph, layout.status_area);
    }

    // Render input form if active
    if let Some(form) = &app.input_form {
        render_input_form(f, form, size);
    }

    // Render blocking message modal if active (takes precedence)
    if let Some(message) = &app.message {
        render_message_modal(f, message, size);
    }
}
