use crate::error::AppError;
use crate::models::{Task, TaskInput};
use sqlx::PgPool;

/// Inserts a new task and returns the stored record with its assigned id.
pub async fn create(pool: &PgPool, input: &TaskInput) -> Result<Task, AppError> {
    let task = sqlx::query_as::<_, Task>(
        "INSERT INTO tasks (title, description, completed) VALUES ($1, $2, $3)
         RETURNING id, title, description, completed",
    )
    .bind(&input.title)
    .bind(&input.description)
    .bind(input.completed)
    .fetch_one(pool)
    .await?;

    Ok(task)
}

/// Returns every task, ordered by ascending id (tracks insertion order).
pub async fn list_all(pool: &PgPool) -> Result<Vec<Task>, AppError> {
    let tasks =
        sqlx::query_as::<_, Task>("SELECT id, title, description, completed FROM tasks ORDER BY id")
            .fetch_all(pool)
            .await?;

    Ok(tasks)
}
