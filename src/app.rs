use crate::clock::Clock;
use crate::domain::{Permission, Task, UiMode, DEFAULT_LEAD_MINUTES};
use crate::notifications::Notifier;
use crate::persistence::Store;
use crate::reminders::ReminderQueue;
use anyhow::Result;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use uuid::Uuid;

/// Input form state for adding a task
#[derive(Debug, Clone)]
pub struct InputFormState {
    pub text: String,
    pub due: String,  // "YYYY-MM-DD HH:MM", empty for no reminder
    pub lead: String, // minutes before the due time, empty for the default
    pub editing_field: usize, // 0 = text, 1 = due, 2 = lead
}

impl InputFormState {
    fn empty() -> Self {
        Self {
            text: String::new(),
            due: String::new(),
            lead: String::new(),
            editing_field: 0,
        }
    }
}

/// A rendered list entry
///
/// Rows mirror the task list but are a separate view: deleting a row whose
/// task is already gone removes the row only.
#[derive(Debug, Clone)]
pub struct Row {
    pub id: Uuid,
    pub text: String,
    /// Due time and lead minutes, shown as a bell badge
    pub reminder: Option<(DateTime<Local>, u32)>,
}

impl Row {
    fn for_task(task: &Task) -> Self {
        Self {
            id: task.id,
            text: task.text.clone(),
            reminder: task.reminder_at.map(|due| (due, task.lead())),
        }
    }
}

/// The task list controller
///
/// Owns the in-memory task list, mirrors it to the storage port on every
/// mutation, maintains the rendered rows, and arms one reminder per task
/// added this session. The persistence write for a mutation always
/// happens-before the row update for that mutation.
pub struct AppState<S: Store, N: Notifier, C: Clock> {
    pub tasks: Vec<Task>,
    pub rows: Vec<Row>,
    pub selected_index: usize,
    pub ui_mode: UiMode,
    pub input_form: Option<InputFormState>,
    /// Blocking modal message; any key dismisses
    pub message: Option<String>,
    /// One-line status shown under the list
    pub status: Option<String>,
    pub reminders: ReminderQueue,
    store: S,
    notifier: N,
    clock: C,
}

impl<S: Store, N: Notifier, C: Clock> AppState<S, N, C> {
    /// Load the snapshot and render one row per task, in stored order
    ///
    /// Reminders are only armed for tasks added in the current session;
    /// loaded tasks never re-arm, even when their due time is still ahead.
    pub fn new(store: S, notifier: N, clock: C) -> Result<Self> {
        let tasks = store.load()?;
        let rows = tasks.iter().map(Row::for_task).collect();

        Ok(Self {
            tasks,
            rows,
            selected_index: 0,
            ui_mode: UiMode::Normal,
            input_form: None,
            message: None,
            status: None,
            reminders: ReminderQueue::new(),
            store,
            notifier,
            clock,
        })
    }

    /// Current notification permission, for the keybinding hint
    pub fn permission(&self) -> Permission {
        self.notifier.permission()
    }

    /// Show a blocking message modal
    pub fn show_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
        self.ui_mode = UiMode::Message;
    }

    /// Dismiss the message modal
    pub fn dismiss_message(&mut self) {
        self.message = None;
        self.ui_mode = UiMode::Normal;
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Move selection down
    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.rows.len() {
            self.selected_index += 1;
        }
    }

    /// Start adding a new task (opens input form)
    pub fn start_add_task(&mut self) {
        self.input_form = Some(InputFormState::empty());
        self.ui_mode = UiMode::AddingTask;
    }

    /// Cancel input form
    pub fn cancel_input_form(&mut self) {
        self.input_form = None;
        self.ui_mode = UiMode::Normal;
    }

    /// Toggle between editing fields in input form (text -> due -> lead)
    pub fn input_form_toggle_field(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.editing_field = (form.editing_field + 1) % 3;
        }
    }

    /// Add character to input form (current field)
    pub fn input_form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.input_form {
            match form.editing_field {
                0 => form.text.push(c),
                1 => form.due.push(c),
                2 => form.lead.push(c),
                _ => {}
            }
        }
    }

    /// Backspace in input form (current field)
    pub fn input_form_backspace(&mut self) {
        if let Some(form) = &mut self.input_form {
            match form.editing_field {
                0 => {
                    form.text.pop();
                }
                1 => {
                    form.due.pop();
                }
                2 => {
                    form.lead.pop();
                }
                _ => {}
            }
        }
    }

    /// Submit the input form
    ///
    /// A non-empty due field that does not parse keeps the form open so the
    /// user can correct it; everything else goes through `submit_task`.
    pub fn submit_input_form(&mut self) {
        let Some(form) = self.input_form.take() else {
            return;
        };

        let reminder_at = match parse_due(&form.due) {
            Ok(due) => due,
            Err(()) => {
                self.status = Some("Due time must look like 2026-03-14 16:45".to_string());
                self.input_form = Some(form);
                return;
            }
        };

        let lead = parse_lead(&form.lead);
        self.ui_mode = UiMode::Normal;
        self.submit_task(&form.text, reminder_at, lead);
    }

    /// Append a task, persist the snapshot, render the new row, arm the reminder
    ///
    /// Empty text after trimming is a silent no-op. A reminder-bearing
    /// submission while permission is not granted aborts entirely: the task
    /// is not added and the user is told permission is required.
    pub fn submit_task(
        &mut self,
        text: &str,
        reminder_at: Option<DateTime<Local>>,
        lead_minutes: Option<u32>,
    ) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }

        if reminder_at.is_some() && !self.notifier.permission().is_granted() {
            self.show_message(
                "Notification permission is required to set a reminder. The task was not added.",
            );
            return;
        }

        let task = match reminder_at {
            Some(due) => Task::with_reminder(
                text.to_string(),
                due,
                lead_minutes.unwrap_or(DEFAULT_LEAD_MINUTES),
            ),
            None => Task::new(text.to_string()),
        };
        let row = Row::for_task(&task);
        let reminder = task.reminder_at.map(|due| (due, task.lead()));

        self.tasks.push(task);
        if let Err(e) = self.store.save(&self.tasks) {
            // Roll back so list, snapshot and view stay in step
            self.tasks.pop();
            self.status = Some(format!("Could not save tasks: {}", e));
            return;
        }
        self.rows.push(row);

        if let Some((due, lead)) = reminder {
            let now = self.clock.now();
            self.reminders.arm(text, due, lead, now);
        }
    }

    /// Delete the selected row and the first task matching its text
    ///
    /// When no task matches (already removed), only the row disappears.
    /// An already-armed reminder for the task is deliberately left in place.
    pub fn delete_selected(&mut self) {
        if self.selected_index >= self.rows.len() {
            return;
        }
        let row_id = self.rows[self.selected_index].id;
        let text = self.rows[self.selected_index].text.clone();

        if let Some(pos) = self.tasks.iter().position(|t| t.text == text) {
            let removed = self.tasks.remove(pos);
            if let Err(e) = self.store.save(&self.tasks) {
                self.tasks.insert(pos, removed);
                self.status = Some(format!("Could not save tasks: {}", e));
                return;
            }
        }

        self.rows.retain(|r| r.id != row_id);
        if self.selected_index >= self.rows.len() && self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Fire due reminders (called every event-loop tick)
    ///
    /// Permission is re-checked at fire time: not granted means the
    /// notification is silently skipped, with no retry or rescheduling.
    pub fn tick_reminders(&mut self) {
        let now = self.clock.now();
        for reminder in self.reminders.drain_due(now) {
            if !self.notifier.permission().is_granted() {
                continue;
            }
            let body = format!(
                "{} is due in {} minutes",
                reminder.text, reminder.lead_minutes
            );
            if let Err(e) = self.notifier.notify("Nudge", &body) {
                self.status = Some(format!("Could not show reminder: {}", e));
            }
        }
    }

    /// Handle the permission-request key
    pub fn request_permission(&mut self) {
        match self.notifier.permission() {
            Permission::Granted => {
                // Affordance is hidden once granted; nothing to request
            }
            Permission::Denied => {
                self.show_message(
                    "Notifications are blocked. Enable them in your system settings, \
                     then delete meta.json in the .nudge directory.",
                );
            }
            Permission::NotAsked => match self.notifier.request_permission() {
                Ok(Permission::Granted) => {
                    self.status = Some("Notifications enabled".to_string());
                }
                Ok(_) => {
                    self.show_message("Notification permission was not granted.");
                }
                Err(e) => {
                    self.show_message(format!("Could not request notifications: {}", e));
                }
            },
        }
    }
}

/// Parse the due field: empty means no reminder, anything else must be
/// "YYYY-MM-DD HH:MM" in local time
fn parse_due(input: &str) -> Result<Option<DateTime<Local>>, ()> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    let naive = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M").map_err(|_| ())?;
    match Local.from_local_datetime(&naive).single() {
        Some(due) => Ok(Some(due)),
        None => Err(()),
    }
}

/// Parse the lead field: invalid or absent falls back to the default
fn parse_lead(input: &str) -> Option<u32> {
    input.trim().parse::<u32>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::NotifyError;
    use crate::persistence::snapshot::memory::MemoryStore;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use std::cell::{Cell, RefCell};

    struct FixedClock {
        now: Cell<DateTime<Local>>,
    }

    impl FixedClock {
        fn at(hour: u32, min: u32) -> Self {
            Self {
                now: Cell::new(time(hour, min)),
            }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Local> {
            self.now.get()
        }
    }

    struct FakeNotifier {
        permission: Cell<Permission>,
        sent: RefCell<Vec<String>>,
    }

    impl FakeNotifier {
        fn with_permission(permission: Permission) -> Self {
            Self {
                permission: Cell::new(permission),
                sent: RefCell::new(Vec::new()),
            }
        }
    }

    impl Notifier for FakeNotifier {
        fn permission(&self) -> Permission {
            self.permission.get()
        }

        fn request_permission(&mut self) -> Result<Permission, NotifyError> {
            self.permission.set(Permission::Granted);
            Ok(Permission::Granted)
        }

        fn notify(&self, _title: &str, body: &str) -> Result<(), NotifyError> {
            self.sent.borrow_mut().push(body.to_string());
            Ok(())
        }
    }

    fn time(hour: u32, min: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 14, hour, min, 0).unwrap()
    }

    fn app_at(
        hour: u32,
        min: u32,
        permission: Permission,
    ) -> AppState<MemoryStore, FakeNotifier, FixedClock> {
        AppState::new(
            MemoryStore::new(),
            FakeNotifier::with_permission(permission),
            FixedClock::at(hour, min),
        )
        .unwrap()
    }

    #[test]
    fn test_submit_adds_row_and_grows_snapshot() {
        let mut app = app_at(12, 0, Permission::NotAsked);

        app.submit_task("Buy milk", None, None);

        assert_eq!(app.rows.len(), 1);
        assert_eq!(app.rows[0].text, "Buy milk");
        assert_eq!(app.store.snapshot().len(), 1);
    }

    #[test]
    fn test_submit_trims_text() {
        let mut app = app_at(12, 0, Permission::NotAsked);

        app.submit_task("  Buy milk  ", None, None);

        assert_eq!(app.tasks[0].text, "Buy milk");
    }

    #[test]
    fn test_submit_whitespace_is_a_no_op() {
        let mut app = app_at(12, 0, Permission::NotAsked);

        app.submit_task("   ", None, None);

        assert!(app.rows.is_empty());
        assert!(app.store.snapshot().is_empty());
        assert!(app.message.is_none());
    }

    #[test]
    fn test_reminder_submit_rejected_without_permission() {
        let mut app = app_at(12, 0, Permission::Denied);

        app.submit_task("Standup", Some(time(12, 30)), Some(5));

        assert!(app.tasks.is_empty());
        assert!(app.rows.is_empty());
        assert!(app.store.snapshot().is_empty());
        assert!(app.message.is_some());
        assert_eq!(app.reminders.pending(), 0);
    }

    #[test]
    fn test_reminder_arms_ahead_of_due_time() {
        // Due now+10 with lead 5 fires at now+5
        let mut app = app_at(12, 0, Permission::Granted);

        app.submit_task("Standup", Some(time(12, 10)), Some(5));
        assert_eq!(app.reminders.pending(), 1);

        app.clock.now.set(time(12, 4));
        app.tick_reminders();
        assert!(app.notifier.sent.borrow().is_empty());

        app.clock.now.set(time(12, 5));
        app.tick_reminders();
        let sent = app.notifier.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0], "Standup is due in 5 minutes");
    }

    #[test]
    fn test_reminder_past_fire_time_never_arms() {
        // Lead time already passed at scheduling: task added, nothing armed
        let mut app = app_at(12, 6, Permission::Granted);

        app.submit_task("Standup", Some(time(12, 10)), Some(5));

        assert_eq!(app.tasks.len(), 1);
        assert_eq!(app.reminders.pending(), 0);
    }

    #[test]
    fn test_fired_reminder_skipped_when_permission_lost() {
        let mut app = app_at(12, 0, Permission::Granted);
        app.submit_task("Standup", Some(time(12, 10)), Some(5));

        app.notifier.permission.set(Permission::Denied);
        app.clock.now.set(time(12, 30));
        app.tick_reminders();

        assert!(app.notifier.sent.borrow().is_empty());
        assert_eq!(app.reminders.pending(), 0);
    }

    #[test]
    fn test_delete_removes_first_match_by_text() {
        let mut app = app_at(12, 0, Permission::NotAsked);
        app.submit_task("Buy milk", None, None);
        app.submit_task("Standup", None, None);
        app.submit_task("Buy milk", None, None);

        // Select the trailing duplicate; deletion still takes the first match
        app.selected_index = 2;
        let doomed_first = app.tasks[0].id;
        app.delete_selected();

        assert_eq!(app.tasks.len(), 2);
        assert!(app.tasks.iter().all(|t| t.id != doomed_first));
        assert_eq!(app.rows.len(), 2);
        assert_eq!(app.store.snapshot().len(), 2);
    }

    #[test]
    fn test_delete_stale_row_removes_row_only() {
        let mut app = app_at(12, 0, Permission::NotAsked);
        app.submit_task("Buy milk", None, None);

        // A row whose task is already gone
        app.rows.push(Row {
            id: Uuid::new_v4(),
            text: "Ghost".to_string(),
            reminder: None,
        });
        app.selected_index = 1;
        app.delete_selected();

        assert_eq!(app.rows.len(), 1);
        assert_eq!(app.tasks.len(), 1);
        assert_eq!(app.store.snapshot().len(), 1);
    }

    #[test]
    fn test_delete_does_not_cancel_armed_reminder() {
        let mut app = app_at(12, 0, Permission::Granted);
        app.submit_task("Standup", Some(time(12, 10)), Some(5));

        app.selected_index = 0;
        app.delete_selected();
        assert!(app.tasks.is_empty());
        assert_eq!(app.reminders.pending(), 1);

        // The reminder still fires for the deleted task
        app.clock.now.set(time(12, 5));
        app.tick_reminders();
        assert_eq!(app.notifier.sent.borrow().len(), 1);
    }

    #[test]
    fn test_buy_milk_snapshot_scenario() {
        let mut app = app_at(12, 0, Permission::NotAsked);

        app.submit_task("Buy milk", None, None);
        let json = serde_json::to_string(&app.store.snapshot()).unwrap();
        assert_eq!(json, r#"[{"text":"Buy milk"}]"#);

        app.selected_index = 0;
        app.delete_selected();
        let json = serde_json::to_string(&app.store.snapshot()).unwrap();
        assert_eq!(json, "[]");
    }

    #[test]
    fn test_failed_save_rolls_back_submit() {
        let mut app = app_at(12, 0, Permission::NotAsked);
        app.store.fail_saves.set(true);

        app.submit_task("Buy milk", None, None);

        assert!(app.tasks.is_empty());
        assert!(app.rows.is_empty());
        assert!(app.status.is_some());
    }

    #[test]
    fn test_loaded_tasks_render_rows_but_arm_nothing() {
        let due = time(18, 0);
        let store = MemoryStore::with_tasks(vec![
            Task::new("Buy milk".to_string()),
            Task::with_reminder("Standup".to_string(), due, 5),
        ]);
        let app = AppState::new(
            store,
            FakeNotifier::with_permission(Permission::Granted),
            FixedClock::at(12, 0),
        )
        .unwrap();

        let texts: Vec<&str> = app.rows.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["Buy milk", "Standup"]);
        assert_eq!(app.rows[1].reminder, Some((due, 5)));
        // Due time is still ahead, but loaded tasks never re-arm
        assert_eq!(app.reminders.pending(), 0);
    }

    #[test]
    fn test_submit_form_with_invalid_due_keeps_form_open() {
        let mut app = app_at(12, 0, Permission::Granted);
        app.start_add_task();
        if let Some(form) = &mut app.input_form {
            form.text = "Standup".to_string();
            form.due = "tomorrowish".to_string();
        }

        app.submit_input_form();

        assert!(app.input_form.is_some());
        assert!(app.tasks.is_empty());
        assert!(app.status.is_some());
    }

    #[test]
    fn test_submit_form_defaults_lead_to_five() {
        let mut app = app_at(12, 0, Permission::Granted);
        app.start_add_task();
        if let Some(form) = &mut app.input_form {
            form.text = "Standup".to_string();
            form.due = "2026-03-14 16:45".to_string();
            form.lead = "soonish".to_string();
        }

        app.submit_input_form();

        assert_eq!(app.tasks.len(), 1);
        assert_eq!(app.tasks[0].lead(), 5);
        assert!(app.input_form.is_none());
    }

    #[test]
    fn test_request_permission_when_denied_shows_message() {
        let mut app = app_at(12, 0, Permission::Denied);
        app.request_permission();
        assert_eq!(app.ui_mode, UiMode::Message);
    }

    #[test]
    fn test_request_permission_grants_and_clears_hint() {
        let mut app = app_at(12, 0, Permission::NotAsked);
        app.request_permission();
        assert_eq!(app.permission(), Permission::Granted);
        assert!(app.message.is_none());
    }

    #[test]
    fn test_parse_due() {
        assert_eq!(parse_due(""), Ok(None));
        assert_eq!(parse_due("  "), Ok(None));
        assert_eq!(parse_due("2026-03-14 16:45"), Ok(Some(time(16, 45))));
        assert_eq!(parse_due("16:45"), Err(()));
    }

    #[test]
    fn test_parse_lead() {
        assert_eq!(parse_lead("10"), Some(10));
        assert_eq!(parse_lead(" 10 "), Some(10));
        assert_eq!(parse_lead(""), None);
        assert_eq!(parse_lead("-3"), None);
        assert_eq!(parse_lead("abc"), None);
    }
}
