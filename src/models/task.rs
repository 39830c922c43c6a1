use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Input structure for creating a task.
/// Contains validation rules for its fields.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    /// The title of the task.
    /// Must be between 1 and 100 characters.
    #[validate(length(min = 1, max = 100))]
    pub title: String,

    /// An optional description for the task.
    /// Maximum length of 500 characters if provided.
    #[validate(length(max = 500))]
    pub description: Option<String>,

    /// Whether the task is already completed. Defaults to false when omitted.
    #[serde(default)]
    pub completed: bool,
}

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Task {
    /// Unique identifier, assigned by the database.
    pub id: i32,
    /// The title of the task.
    pub title: String,
    /// An optional description for the task.
    pub description: Option<String>,
    /// Whether the task is completed.
    pub completed: bool,
}
