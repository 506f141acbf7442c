use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{debug, instrument};

use crate::{
    envelope::Envelope,
    error::ApiError,
    state::AppState,
    users::{
        dto::{UserList, UserResponse},
        extractors::UserPayload,
        services,
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/:id", get(get_user))
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    UserPayload(payload): UserPayload,
) -> Result<(StatusCode, Json<Envelope<()>>), ApiError> {
    let user = services::create_user(state.store.as_ref(), payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(Envelope::success(format!("{} was added!", user.email))),
    ))
}

#[instrument(skip(state, id))]
pub async fn get_user(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<Envelope<UserResponse>>, ApiError> {
    // A token that cannot even be decoded is as malformed as "blah".
    let Path(id) = id.map_err(|e| {
        debug!(error = %e, "user id not decodable");
        ApiError::malformed_id()
    })?;
    let user = services::get_user(state.store.as_ref(), &id).await?;
    Ok(Json(Envelope::data(user.into())))
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Envelope<UserList>>, ApiError> {
    let users = services::list_users(state.store.as_ref()).await?;
    Ok(Json(Envelope::data(UserList {
        users: users.into_iter().map(UserResponse::from).collect(),
    })))
}
