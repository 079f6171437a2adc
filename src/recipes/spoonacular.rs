use async_trait::async_trait;
use serde::Deserialize;

use crate::config::SpoonacularConfig;

use super::dto::{RecipeDetail, RecipeStep, RecipeSummary, SearchConstraints};
use super::provider::{ProviderError, RecipeProvider};

pub struct Spoonacular {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl Spoonacular {
    pub fn new(config: &SpoonacularConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResult {
    id: i64,
    title: String,
    image: Option<String>,
    ready_in_minutes: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Information {
    id: i64,
    title: String,
    image: Option<String>,
    ready_in_minutes: Option<i32>,
    #[serde(default)]
    extended_ingredients: Vec<Ingredient>,
    #[serde(default)]
    analyzed_instructions: Vec<InstructionSet>,
}

#[derive(Debug, Deserialize)]
struct Ingredient {
    original: String,
}

#[derive(Debug, Deserialize)]
struct InstructionSet {
    #[serde(default)]
    steps: Vec<InstructionStep>,
}

#[derive(Debug, Deserialize)]
struct InstructionStep {
    number: i32,
    step: String,
}

impl From<SearchResult> for RecipeSummary {
    fn from(r: SearchResult) -> Self {
        Self {
            id: r.id,
            title: r.title,
            image: r.image,
            ready_in_minutes: r.ready_in_minutes,
        }
    }
}

impl From<Information> for RecipeDetail {
    fn from(info: Information) -> Self {
        // Instructions come nested one set deep and are often absent.
        let steps = info
            .analyzed_instructions
            .into_iter()
            .next()
            .map(|set| {
                set.steps
                    .into_iter()
                    .map(|s| RecipeStep {
                        number: s.number,
                        instruction: s.step,
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            id: info.id,
            title: info.title,
            image: info.image,
            ready_in_minutes: info.ready_in_minutes,
            ingredients: info
                .extended_ingredients
                .into_iter()
                .map(|i| i.original)
                .collect(),
            steps,
        }
    }
}

fn unavailable(e: reqwest::Error) -> ProviderError {
    ProviderError::Unavailable(e.to_string())
}

#[async_trait]
impl RecipeProvider for Spoonacular {
    async fn search(
        &self,
        query: &str,
        constraints: &SearchConstraints,
    ) -> Result<Vec<RecipeSummary>, ProviderError> {
        let response = self
            .http
            .get(format!("{}/recipes/complexSearch", self.base_url))
            .query(&[("query", query), ("apiKey", self.api_key.as_str())])
            .query(&[
                ("number", constraints.number),
                ("minReadyTime", constraints.min_ready_time),
                ("maxReadyTime", constraints.max_ready_time),
            ])
            .send()
            .await
            .map_err(unavailable)?;

        if !response.status().is_success() {
            return Err(ProviderError::Unavailable(format!(
                "status {}",
                response.status()
            )));
        }

        let body: SearchResponse = response.json().await.map_err(unavailable)?;
        Ok(body.results.into_iter().map(RecipeSummary::from).collect())
    }

    async fn detail(&self, recipe_id: i64) -> Result<RecipeDetail, ProviderError> {
        let response = self
            .http
            .get(format!(
                "{}/recipes/{}/information",
                self.base_url, recipe_id
            ))
            .query(&[("apiKey", self.api_key.as_str())])
            .send()
            .await
            .map_err(unavailable)?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ProviderError::NotFound);
        }
        if !response.status().is_success() {
            return Err(ProviderError::Unavailable(format!(
                "status {}",
                response.status()
            )));
        }

        let info: Information = response.json().await.map_err(unavailable)?;
        Ok(info.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn information_maps_to_detail() {
        let raw = r#"{
            "id": 716429,
            "title": "Pasta with garlic",
            "image": "https://img.spoonacular.com/recipes/716429.jpg",
            "readyInMinutes": 12,
            "extendedIngredients": [
                {"original": "1 cup flour"},
                {"original": "2 cloves garlic"}
            ],
            "analyzedInstructions": [
                {"steps": [
                    {"number": 1, "step": "Boil water."},
                    {"number": 2, "step": "Cook the pasta."}
                ]}
            ]
        }"#;

        let info: Information = serde_json::from_str(raw).unwrap();
        let detail = RecipeDetail::from(info);

        assert_eq!(detail.id, 716429);
        assert_eq!(detail.ready_in_minutes, Some(12));
        assert_eq!(detail.ingredients.len(), 2);
        assert_eq!(detail.steps.len(), 2);
        assert_eq!(detail.steps[0].instruction, "Boil water.");
    }

    #[test]
    fn missing_instructions_become_empty_steps() {
        let raw = r#"{"id": 1, "title": "Mystery dish"}"#;

        let info: Information = serde_json::from_str(raw).unwrap();
        let detail = RecipeDetail::from(info);

        assert!(detail.steps.is_empty());
        assert!(detail.ingredients.is_empty());
        assert_eq!(detail.ready_in_minutes, None);
    }

    #[test]
    fn search_response_parses() {
        let raw = r#"{"results": [
            {"id": 1, "title": "Toast", "image": null, "readyInMinutes": 5},
            {"id": 2, "title": "Soup"}
        ], "offset": 0, "number": 8, "totalResults": 2}"#;

        let body: SearchResponse = serde_json::from_str(raw).unwrap();
        let summaries: Vec<RecipeSummary> =
            body.results.into_iter().map(RecipeSummary::from).collect();

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].title, "Toast");
        assert_eq!(summaries[1].ready_in_minutes, None);
    }
}
