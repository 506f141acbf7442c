use crate::state::AppState;
use axum::Router;

mod dto;
pub mod extractors;
pub mod handlers;
#[cfg(test)]
pub mod memory;
pub mod password;
pub mod repo;
pub mod repo_types;
mod services;

pub fn router() -> Router<AppState> {
    handlers::user_routes()
}
