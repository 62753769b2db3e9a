pub mod enums;
pub mod task;

pub use enums::{Permission, UiMode};
pub use task::{Task, DEFAULT_LEAD_MINUTES};
