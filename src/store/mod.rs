//! Explicit data-access functions over an injected `PgPool`.
//!
//! The database's own constraints are the arbiter of correctness here: the
//! unique index on `users.username` decides duplicates, and ids come from
//! the serial columns.

pub mod tasks;
pub mod users;
