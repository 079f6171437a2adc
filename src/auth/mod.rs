use axum::Router;

use crate::state::AppState;

mod dto;
pub mod error;
pub(crate) mod extractors;
pub mod handlers;
mod oauth;
pub mod password;
pub mod repo;
pub mod repo_types;
pub mod resolver;
pub mod session;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
