use serde::{Deserialize, Serialize};

/// Card-level recipe data returned by a search.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeSummary {
    pub id: i64,
    pub title: String,
    pub image: Option<String>,
    pub ready_in_minutes: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecipeStep {
    pub number: i32,
    pub instruction: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecipeDetail {
    pub id: i64,
    pub title: String,
    pub image: Option<String>,
    pub ready_in_minutes: Option<i32>,
    pub ingredients: Vec<String>,
    pub steps: Vec<RecipeStep>,
}

/// Fixed search window: a handful of quick recipes per query.
#[derive(Debug, Clone)]
pub struct SearchConstraints {
    pub number: u32,
    pub min_ready_time: u32,
    pub max_ready_time: u32,
}

impl Default for SearchConstraints {
    fn default() -> Self {
        Self {
            number: 8,
            min_ready_time: 1,
            max_ready_time: 15,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: String,
}
