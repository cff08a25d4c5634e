use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::{json, Value};

use crate::config::StoreConfig;
use crate::error::AppError;
use crate::model::{ListQuery, NewRecipe, Recipe, SortOrder};
use crate::store::RecipeStore;

/// PostgREST accept header that asks for a single object instead of an
/// array; zero matching rows come back as 406, which maps to `NotFound`.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Recipe store backed by a Supabase-hosted Postgres, accessed through its
/// PostgREST endpoint at `<base>/rest/v1/recipes`.
pub struct SupabaseStore {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SupabaseStore {
    pub fn new(config: &StoreConfig) -> Self {
        Self::with_base_url(config.url.clone(), config.key.clone())
    }

    #[doc(hidden)]
    pub fn with_base_url(base_url: String, api_key: String) -> Self {
        SupabaseStore {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/recipes", self.base_url)
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    /// Decode a PostgREST error body, passing its message through verbatim.
    async fn store_error(response: Response) -> AppError {
        let status = response.status();
        let body: Value = response.json().await.unwrap_or_default();
        let message = body["message"]
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| format!("store returned status {status}"));
        debug!("store error ({status}): {message}");
        AppError::Store(message)
    }
}

#[async_trait]
impl RecipeStore for SupabaseStore {
    async fn list(&self, query: &ListQuery) -> Result<Vec<Recipe>, AppError> {
        let mut params = vec![("select".to_string(), "*".to_string())];

        if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
            params.push(("title".to_string(), format!("ilike.*{search}*")));
        }
        if let Some(tag) = query.tag.as_deref().filter(|t| !t.is_empty()) {
            params.push(("tags".to_string(), format!("cs.{{{tag}}}")));
        }
        let direction = match query.sort {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        };
        params.push(("order".to_string(), format!("created_at.{direction}")));

        let response = self
            .authed(self.client.get(self.table_url()))
            .query(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::store_error(response).await);
        }
        Ok(response.json().await?)
    }

    async fn get(&self, id: &str) -> Result<Recipe, AppError> {
        let id_filter = format!("eq.{id}");
        let response = self
            .authed(self.client.get(self.table_url()))
            .query(&[("select", "*"), ("id", id_filter.as_str())])
            .header("Accept", SINGLE_OBJECT)
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_ACCEPTABLE => Err(AppError::NotFound),
            status if status.is_success() => Ok(response.json().await?),
            _ => Err(Self::store_error(response).await),
        }
    }

    async fn create(&self, recipe: NewRecipe) -> Result<Recipe, AppError> {
        let response = self
            .authed(self.client.post(self.table_url()))
            .header("Accept", SINGLE_OBJECT)
            .header("Prefer", "return=representation")
            .json(&recipe)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::store_error(response).await);
        }
        Ok(response.json().await?)
    }

    async fn update(&self, id: &str, recipe: NewRecipe) -> Result<Recipe, AppError> {
        // updated_at is set client-side; the store does not refresh it on PATCH
        let mut body = json!(recipe);
        body["updated_at"] = json!(Utc::now().to_rfc3339());

        let response = self
            .authed(self.client.patch(self.table_url()))
            .query(&[("id", &format!("eq.{id}"))])
            .header("Accept", SINGLE_OBJECT)
            .header("Prefer", "return=representation")
            .json(&body)
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_ACCEPTABLE => Err(AppError::NotFound),
            status if status.is_success() => Ok(response.json().await?),
            _ => Err(Self::store_error(response).await),
        }
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let response = self
            .authed(self.client.delete(self.table_url()))
            .query(&[("id", &format!("eq.{id}"))])
            .send()
            .await?;

        // a delete that matched no rows still succeeds
        if !response.status().is_success() {
            return Err(Self::store_error(response).await);
        }
        Ok(())
    }
}
