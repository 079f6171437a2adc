use axum::Router;

use crate::state::AppState;

pub mod dto;
pub mod handlers;
pub mod provider;
pub mod spoonacular;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
