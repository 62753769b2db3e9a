use crate::app::AppState;
use crate::clock::Clock;
use crate::domain::UiMode;
use crate::notifications::Notifier;
use crate::persistence::Store;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

/// Handle keyboard input events
pub fn handle_key<S: Store, N: Notifier, C: Clock>(
    app: &mut AppState<S, N, C>,
    key: KeyEvent,
) -> Result<bool> {
    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::AddingTask => handle_input_form_mode(app, key),
        UiMode::Message => handle_message_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode<S: Store, N: Notifier, C: Clock>(
    app: &mut AppState<S, N, C>,
    key: KeyEvent,
) -> Result<bool> {
    match key.code {
        // Navigation
        KeyCode::Up => {
            app.move_selection_up();
            Ok(false)
        }
        KeyCode::Down => {
            app.move_selection_down();
            Ok(false)
        }

        // Add task
        KeyCode::Char('a') | KeyCode::Char('A') => {
            app.start_add_task();
            Ok(false)
        }

        // Delete selected task
        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Delete => {
            app.delete_selected();
            Ok(false)
        }

        // Request notification permission
        KeyCode::Char('n') | KeyCode::Char('N') => {
            app.request_permission();
            Ok(false)
        }

        // Clear the status line
        KeyCode::Esc => {
            app.status = None;
            Ok(false)
        }

        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') => Ok(true),

        _ => Ok(false),
    }
}

/// Handle keys in input form mode (adding a task)
fn handle_input_form_mode<S: Store, N: Notifier, C: Clock>(
    app: &mut AppState<S, N, C>,
    key: KeyEvent,
) -> Result<bool> {
    match key.code {
        // Submit form
        KeyCode::Enter => {
            app.submit_input_form();
            Ok(false)
        }

        // Cancel form
        KeyCode::Esc => {
            app.cancel_input_form();
            Ok(false)
        }

        // Switch between text, due time and lead fields
        KeyCode::Tab => {
            app.input_form_toggle_field();
            Ok(false)
        }

        // Backspace
        KeyCode::Backspace => {
            app.input_form_backspace();
            Ok(false)
        }

        // Add character
        KeyCode::Char(c) => {
            app.input_form_add_char(c);
            Ok(false)
        }

        _ => Ok(false),
    }
}

/// Handle keys in message mode: any key dismisses the blocking message
fn handle_message_mode<S: Store, N: Notifier, C: Clock>(
    app: &mut AppState<S, N, C>,
    _key: KeyEvent,
) -> Result<bool> {
    app.dismiss_message();
    Ok(false)
}
