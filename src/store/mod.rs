mod memory;
mod supabase;

pub use memory::MemoryStore;
pub use supabase::SupabaseStore;

use async_trait::async_trait;

use crate::error::AppError;
use crate::model::{ListQuery, NewRecipe, Recipe};

/// Unified trait for recipe record stores
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// List recipes matching the query; an empty result is not an error
    async fn list(&self, query: &ListQuery) -> Result<Vec<Recipe>, AppError>;

    /// Fetch one recipe, or `AppError::NotFound`
    async fn get(&self, id: &str) -> Result<Recipe, AppError>;

    /// Persist a new recipe; the store assigns id and timestamps
    async fn create(&self, recipe: NewRecipe) -> Result<Recipe, AppError>;

    /// Full replace of the editable fields, refreshing `updated_at`
    async fn update(&self, id: &str, recipe: NewRecipe) -> Result<Recipe, AppError>;

    /// Remove a recipe; deleting an absent id is not an error
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}
