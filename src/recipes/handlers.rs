use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{error, instrument};

use crate::state::AppState;

use super::dto::{RecipeDetail, RecipeSummary, SearchConstraints, SearchParams};
use super::provider::ProviderError;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/search", get(search))
        .route("/recipes/{id}", get(recipe_detail))
}

#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<RecipeSummary>>, (StatusCode, String)> {
    let query = params.query.trim();
    if query.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "query is required".into()));
    }

    let recipes = state
        .recipes
        .search(query, &SearchConstraints::default())
        .await
        .map_err(provider_status)?;
    Ok(Json(recipes))
}

#[instrument(skip(state))]
pub async fn recipe_detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<RecipeDetail>, (StatusCode, String)> {
    let detail = state.recipes.detail(id).await.map_err(provider_status)?;
    Ok(Json(detail))
}

fn provider_status(e: ProviderError) -> (StatusCode, String) {
    match e {
        ProviderError::NotFound => (StatusCode::NOT_FOUND, "Recipe not found".into()),
        ProviderError::Unavailable(reason) => {
            error!(%reason, "recipe provider failed");
            (StatusCode::BAD_GATEWAY, "Something went wrong".into())
        }
    }
}
