use crate::state::AppState;
use axum::Router;

mod claims;
mod dto;
pub mod extractors;
mod handlers;
pub mod jwt;
mod password;
pub mod repo;
mod repo_types;

pub fn router() -> Router<AppState> {
    handlers::auth_routes()
}
