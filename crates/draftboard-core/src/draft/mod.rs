// Draft tracking: per-player status transitions and snake-draft arithmetic.

pub mod snake;
pub mod status;

pub use snake::{checked_overall_pick, overall_pick, round_and_slot, PickError};
pub use status::{DraftMap, DraftStatus};
