use crate::error::AppError;
use crate::models::User;
use sqlx::PgPool;

/// Inserts a new user and returns the stored record with its assigned id.
///
/// There is no lookup-then-insert pre-check: the unique index on `username`
/// settles duplicate registrations, including concurrent ones, and the
/// resulting violation surfaces as `AppError::Conflict`.
pub async fn create(pool: &PgPool, username: &str, password_hash: &str) -> Result<User, AppError> {
    sqlx::query_as::<_, User>(
        "INSERT INTO users (username, password_hash) VALUES ($1, $2)
         RETURNING id, username, password_hash",
    )
    .bind(username)
    .bind(password_hash)
    .fetch_one(pool)
    .await
    .map_err(|e| match e {
        // Postgres unique_violation, raised by the index on users.username
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
            AppError::Conflict("username taken".into())
        }
        other => AppError::from(other),
    })
}

/// Looks up a user by exact username. `None` is a normal outcome.
pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, username, password_hash FROM users WHERE username = $1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}
