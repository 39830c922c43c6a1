use sqlx::FromRow;

/// Represents a user account row. The `password_hash` column holds only the
/// bcrypt output, never the plaintext, and this type is never serialized to
/// clients.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
}
