use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::AppError;
use crate::model::{ListQuery, NewRecipe, Recipe, SortOrder};
use crate::store::RecipeStore;

/// In-memory recipe store with the same list/filter semantics as the hosted
/// one. Backs the router tests, which need CRUD without a live endpoint.
#[derive(Default)]
pub struct MemoryStore {
    recipes: RwLock<Vec<Recipe>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecipeStore for MemoryStore {
    async fn list(&self, query: &ListQuery) -> Result<Vec<Recipe>, AppError> {
        let recipes = self.recipes.read().await;
        let mut matched: Vec<Recipe> = recipes
            .iter()
            .filter(|r| match query.search.as_deref() {
                Some(s) if !s.is_empty() => {
                    r.title.to_lowercase().contains(&s.to_lowercase())
                }
                _ => true,
            })
            .filter(|r| match query.tag.as_deref() {
                Some(t) if !t.is_empty() => r
                    .tags
                    .as_ref()
                    .is_some_and(|tags| tags.iter().any(|tag| tag == t)),
                _ => true,
            })
            .cloned()
            .collect();

        matched.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        if query.sort == SortOrder::Desc {
            matched.reverse();
        }
        Ok(matched)
    }

    async fn get(&self, id: &str) -> Result<Recipe, AppError> {
        let recipes = self.recipes.read().await;
        recipes
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(AppError::NotFound)
    }

    async fn create(&self, recipe: NewRecipe) -> Result<Recipe, AppError> {
        let now = Utc::now();
        let stored = Recipe {
            id: Uuid::new_v4().to_string(),
            title: recipe.title,
            ingredients: recipe.ingredients,
            tags: recipe.tags,
            image_url: recipe.image_url,
            created_at: now,
            updated_at: now,
        };
        self.recipes.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: &str, recipe: NewRecipe) -> Result<Recipe, AppError> {
        let mut recipes = self.recipes.write().await;
        let existing = recipes
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(AppError::NotFound)?;

        existing.title = recipe.title;
        existing.ingredients = recipe.ingredients;
        existing.tags = recipe.tags;
        existing.image_url = recipe.image_url;
        existing.updated_at = Utc::now();
        Ok(existing.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.recipes.write().await.retain(|r| r.id != id);
        Ok(())
    }
}
