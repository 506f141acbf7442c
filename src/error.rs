use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::envelope::Envelope;
use crate::users::password::PasswordError;
use crate::users::repo::StoreError;
use crate::users::repo_types::UniqueColumn;

pub const EMPTY_PAYLOAD: &str = "Invalid payload";
pub const INCOMPLETE_PAYLOAD: &str = "Invalid payload.";
pub const DUPLICATE_EMAIL: &str = "Sorry. That email already exists.";
pub const DUPLICATE_USERNAME: &str = "Sorry. That username already exists.";
// The two not-found texts differ by one letter; clients match on both.
pub const MALFORMED_USER_ID: &str = "User does not exist";
pub const UNKNOWN_USER_ID: &str = "User does not exists";
pub const ROUTE_NOT_FOUND: &str = "Not found";

/// Errors surfaced to HTTP callers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidPayload(&'static str),

    #[error("{0}")]
    DuplicateUser(&'static str),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn empty_payload() -> Self {
        Self::InvalidPayload(EMPTY_PAYLOAD)
    }

    pub fn incomplete_payload() -> Self {
        Self::InvalidPayload(INCOMPLETE_PAYLOAD)
    }

    pub fn duplicate(column: UniqueColumn) -> Self {
        match column {
            UniqueColumn::Email => Self::DuplicateUser(DUPLICATE_EMAIL),
            UniqueColumn::Username => Self::DuplicateUser(DUPLICATE_USERNAME),
        }
    }

    pub fn malformed_id() -> Self {
        Self::NotFound(MALFORMED_USER_ID)
    }

    pub fn unknown_id() -> Self {
        Self::NotFound(UNKNOWN_USER_ID)
    }

    pub fn route_not_found() -> Self {
        Self::NotFound(ROUTE_NOT_FOUND)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidPayload(_) | Self::DuplicateUser(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation { column } => Self::duplicate(column),
            StoreError::Database(e) => Self::Internal(anyhow::Error::new(e).context("store query failed")),
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        Self::Internal(anyhow::Error::new(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Internal(e) => {
                error!(error = %format!("{e:#}"), "request failed");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(Envelope::fail(message))).into_response()
    }
}
