use std::sync::Mutex;

use async_trait::async_trait;

use crate::users::repo::{StoreError, UserStore};
use crate::users::repo_types::{NewUser, UniqueColumn, User};

/// In-process store with the same uniqueness rules as the `users` table.
#[derive(Default)]
pub struct MemoryUserStore {
    rows: Mutex<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count_by_email(&self, email: &str) -> usize {
        let rows = self.rows.lock().unwrap();
        rows.iter().filter(|u| u.email == email).count()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, StoreError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|u| u.email == email).cloned())
    }

    async fn insert(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|u| u.email == new_user.email) {
            return Err(StoreError::UniqueViolation {
                column: UniqueColumn::Email,
            });
        }
        if rows.iter().any(|u| u.username == new_user.username) {
            return Err(StoreError::UniqueViolation {
                column: UniqueColumn::Username,
            });
        }
        let user = User {
            id: rows.len() as i32 + 1,
            username: new_user.username,
            email: new_user.email,
            password: new_user.password,
            active: true,
            created_at: new_user.created_at,
        };
        rows.push(user.clone());
        Ok(user)
    }

    async fn list_newest_first(&self) -> Result<Vec<User>, StoreError> {
        let mut users = self.rows.lock().unwrap().clone();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(users)
    }

    async fn close(&self) {}
}
