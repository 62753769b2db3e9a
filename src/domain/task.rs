use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default lead time (minutes before the due time) when none is given
pub const DEFAULT_LEAD_MINUTES: u32 = 5;

/// A to-do item with optional reminder metadata
///
/// The persisted form is `{ "text": ..., "reminderTime": ..., "minutesBefore": ... }`
/// with the optional fields omitted for plain tasks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique ID for view-row references (not persisted, regenerated on load)
    #[serde(skip, default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Task description, never empty
    pub text: String,
    /// Absolute due time, unset when no reminder was requested
    #[serde(rename = "reminderTime", default, skip_serializing_if = "Option::is_none")]
    pub reminder_at: Option<DateTime<Local>>,
    /// Minutes before the due time to notify; only set for reminder tasks
    #[serde(rename = "minutesBefore", default, skip_serializing_if = "Option::is_none")]
    pub lead_minutes: Option<u32>,
}

impl Task {
    pub fn new(text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            reminder_at: None,
            lead_minutes: None,
        }
    }

    pub fn with_reminder(text: String, reminder_at: DateTime<Local>, lead_minutes: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            reminder_at: Some(reminder_at),
            lead_minutes: Some(lead_minutes),
        }
    }

    /// Effective lead time in minutes (5 when unset)
    pub fn lead(&self) -> u32 {
        self.lead_minutes.unwrap_or(DEFAULT_LEAD_MINUTES)
    }
}
