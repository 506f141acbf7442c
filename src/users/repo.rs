use anyhow::Context;
use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use tracing::{debug, info};

use crate::users::repo_types::{NewUser, UniqueColumn, User};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unique constraint violated on {column}")]
    UniqueViolation { column: UniqueColumn },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persistence seam for user records.
///
/// The store's unique constraints are authoritative: `insert` must reject a
/// duplicate username or email with [`StoreError::UniqueViolation`] even when the
/// caller already checked for it.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn insert(&self, new_user: NewUser) -> Result<User, StoreError>;

    /// All users, most recently created first.
    async fn list_newest_first(&self) -> Result<Vec<User>, StoreError>;

    async fn close(&self);
}

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("connect to database")?;
        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("run database migrations")?;
        info!("database migrations applied");
        Ok(())
    }
}

/// Maps a constraint name reported by Postgres to the column it guards.
pub(crate) fn column_for_constraint(constraint: Option<&str>) -> UniqueColumn {
    match constraint {
        Some(name) if name.contains("username") => UniqueColumn::Username,
        _ => UniqueColumn::Email,
    }
}

fn classify(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            let column = column_for_constraint(db_err.constraint());
            debug!(%column, "insert hit unique constraint");
            return StoreError::UniqueViolation { column };
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password, active, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password, active, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn insert(&self, new_user: NewUser) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, email, password, active, created_at
            "#,
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.password)
        .bind(new_user.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(classify)
    }

    async fn list_newest_first(&self) -> Result<Vec<User>, StoreError> {
        let rows = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password, active, created_at
            FROM users
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_constraint_maps_to_username_column() {
        assert_eq!(
            column_for_constraint(Some("users_username_key")),
            UniqueColumn::Username
        );
    }

    #[test]
    fn email_or_unknown_constraint_maps_to_email_column() {
        assert_eq!(column_for_constraint(Some("users_email_key")), UniqueColumn::Email);
        assert_eq!(column_for_constraint(None), UniqueColumn::Email);
    }

    #[test]
    fn unique_violation_message_names_the_column() {
        let err = StoreError::UniqueViolation {
            column: UniqueColumn::Username,
        };
        assert_eq!(err.to_string(), "unique constraint violated on username");
    }
}
