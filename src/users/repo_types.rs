use sqlx::FromRow;
use time::OffsetDateTime;

/// User record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password: String, // Argon2 PHC string, never serialized
    pub active: bool,
    pub created_at: OffsetDateTime,
}

/// Row about to be inserted; `id` and `active` come from the table defaults.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub created_at: OffsetDateTime,
}

/// Which unique constraint an insert ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueColumn {
    Username,
    Email,
}

impl std::fmt::Display for UniqueColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UniqueColumn::Username => f.write_str("username"),
            UniqueColumn::Email => f.write_str("email"),
        }
    }
}
