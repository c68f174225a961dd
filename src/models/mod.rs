pub mod task;
pub mod user;

use validator::ValidationError;

pub use task::{Task, TaskInput, TaskQuery, TaskUpdate};
pub use user::{normalize_email, NewUser, User, UserRecord};

/// Rejects values that are empty once surrounding whitespace is removed.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
