//! Habit checklist items for a single day.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

/// Longest habit name accepted.
pub const MAX_HABIT_NAME_LEN: usize = 100;

/// One habit on a day's checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub completed: bool,
}

impl Habit {
    /// A new, not yet completed habit with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            completed: false,
        }
    }
}

/// Number of completed habits in a checklist.
pub fn completed_count(habits: &[Habit]) -> u32 {
    habits.iter().filter(|h| h.completed).count() as u32
}

/// Validate a full checklist before it replaces a day's habits.
///
/// Names must be non-blank and at most [`MAX_HABIT_NAME_LEN`] characters, and
/// ids must be unique within the list.
pub fn validate_habits(habits: &[Habit]) -> Result<(), CoreError> {
    let mut seen = std::collections::HashSet::with_capacity(habits.len());

    for habit in habits {
        let name = habit.name.trim();
        if name.is_empty() {
            return Err(CoreError::Validation("Habit name must not be empty".into()));
        }
        if name.chars().count() > MAX_HABIT_NAME_LEN {
            return Err(CoreError::Validation(format!(
                "Habit name must be at most {MAX_HABIT_NAME_LEN} characters"
            )));
        }
        if !seen.insert(habit.id) {
            return Err(CoreError::Validation(format!(
                "Duplicate habit id {}",
                habit.id
            )));
        }
    }

    Ok(())
}
