use async_trait::async_trait;
use thiserror::Error;

use super::dto::{RecipeDetail, RecipeSummary, SearchConstraints};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("recipe not found")]
    NotFound,

    #[error("recipe provider unavailable: {0}")]
    Unavailable(String),
}

/// Read-only capability over the third-party recipe catalogue.
#[async_trait]
pub trait RecipeProvider: Send + Sync {
    async fn search(
        &self,
        query: &str,
        constraints: &SearchConstraints,
    ) -> Result<Vec<RecipeSummary>, ProviderError>;

    async fn detail(&self, recipe_id: i64) -> Result<RecipeDetail, ProviderError>;
}
