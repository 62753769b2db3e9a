use chrono::{DateTime, Duration, Local};

/// A one-shot reminder armed for a task added this session
///
/// Holds only the values captured at arm time, never a reference back into
/// the task list. Deleting the task does not cancel the reminder, and
/// reminders are not re-armed for tasks loaded from storage at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArmedReminder {
    /// Task text captured at arm time
    pub text: String,
    /// Lead time in minutes, for the notification body
    pub lead_minutes: u32,
    /// When the notification should fire
    pub notify_at: DateTime<Local>,
}

/// Insertion-ordered queue of armed reminders
///
/// There is no cancellation API: once armed, a reminder stays until it is
/// drained as due.
#[derive(Debug, Default)]
pub struct ReminderQueue {
    armed: Vec<ArmedReminder>,
}

impl ReminderQueue {
    pub fn new() -> Self {
        Self { armed: Vec::new() }
    }

    /// Arm a reminder firing `lead_minutes` before `reminder_at`
    ///
    /// Returns the armed entry, or `None` when the fire time is not strictly
    /// in the future at `now` (the reminder is silently dropped).
    pub fn arm(
        &mut self,
        text: &str,
        reminder_at: DateTime<Local>,
        lead_minutes: u32,
        now: DateTime<Local>,
    ) -> Option<&ArmedReminder> {
        let notify_at = reminder_at - Duration::minutes(i64::from(lead_minutes));
        if notify_at <= now {
            return None;
        }

        self.armed.push(ArmedReminder {
            text: text.to_string(),
            lead_minutes,
            notify_at,
        });
        self.armed.last()
    }

    /// Remove and return every reminder due at `now`, in arm order
    pub fn drain_due(&mut self, now: DateTime<Local>) -> Vec<ArmedReminder> {
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.armed.len() {
            if self.armed[i].notify_at <= now {
                due.push(self.armed.remove(i));
            } else {
                i += 1;
            }
        }
        due
    }

    /// Number of reminders still waiting to fire
    pub fn pending(&self) -> usize {
        self.armed.len()
    }
}
