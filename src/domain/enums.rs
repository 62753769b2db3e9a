use serde::{Deserialize, Serialize};

/// Platform notification permission state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    Granted,
    Denied,
    NotAsked,
}

impl Permission {
    /// Check if notifications may be delivered
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    AddingTask,
    /// Blocking message modal (permission alerts, errors); any key dismisses
    Message,
}
