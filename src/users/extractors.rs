use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderMap},
};
use bytes::Bytes;
use serde_json::Value;
use tracing::warn;

use crate::error::ApiError;
use crate::users::dto::CreateUserRequest;

/// Reads the create-user body, rejecting it with `ApiError::InvalidPayload`.
///
/// A body not declared as JSON, or an absent, unparsable, non-object or
/// empty-object body, is "empty"; an object missing one of the required string
/// fields is "incomplete". The two carry different messages.
pub struct UserPayload(pub CreateUserRequest);

#[async_trait]
impl<S> FromRequest<S> for UserPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !has_json_content_type(req.headers()) {
            warn!("create user body is not declared as json");
            return Err(ApiError::empty_payload());
        }
        let body = Bytes::from_request(req, state).await.map_err(|e| {
            warn!(error = %e, "could not read request body");
            ApiError::empty_payload()
        })?;
        parse_create_user(&body).map(UserPayload)
    }
}

/// `application/json` or any `application/*+json`, parameters ignored.
pub(crate) fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let essence = value.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    match essence.split_once('/') {
        Some(("application", subtype)) => subtype == "json" || subtype.ends_with("+json"),
        _ => false,
    }
}

pub(crate) fn parse_create_user(body: &[u8]) -> Result<CreateUserRequest, ApiError> {
    let value: Value = serde_json::from_slice(body).map_err(|_| ApiError::empty_payload())?;
    match &value {
        Value::Object(map) if !map.is_empty() => {}
        _ => return Err(ApiError::empty_payload()),
    }
    serde_json::from_value(value).map_err(|e| {
        warn!(error = %e, "create user payload is missing fields");
        ApiError::incomplete_payload()
    })
}
