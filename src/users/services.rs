use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::users::dto::CreateUserRequest;
use crate::users::password::hash_password;
use crate::users::repo::UserStore;
use crate::users::repo_types::{NewUser, UniqueColumn, User};

/// Path ids are positive integers; anything else is treated as a missing user.
pub(crate) fn parse_user_id(raw: &str) -> Option<i32> {
    raw.parse::<i32>().ok().filter(|id| *id > 0)
}

pub async fn create_user(store: &dyn UserStore, req: CreateUserRequest) -> Result<User, ApiError> {
    if store.find_by_email(&req.email).await?.is_some() {
        warn!(email = %req.email, "email already registered");
        return Err(ApiError::duplicate(UniqueColumn::Email));
    }

    let password = hash_password(&req.password)?;
    let user = store
        .insert(NewUser {
            username: req.username,
            email: req.email,
            password,
            created_at: OffsetDateTime::now_utc(),
        })
        .await
        .map_err(|e| {
            warn!(error = %e, "insert rejected");
            ApiError::from(e)
        })?;

    info!(user_id = user.id, email = %user.email, "user created");
    Ok(user)
}

pub async fn get_user(store: &dyn UserStore, raw_id: &str) -> Result<User, ApiError> {
    let Some(id) = parse_user_id(raw_id) else {
        debug!(raw_id, "user id is not a positive integer");
        return Err(ApiError::malformed_id());
    };
    store.find_by_id(id).await?.ok_or_else(ApiError::unknown_id)
}

pub async fn list_users(store: &dyn UserStore) -> Result<Vec<User>, ApiError> {
    Ok(store.list_newest_first().await?)
}
