pub mod api;
pub mod config;
pub mod error;
pub mod form;
pub mod model;
pub mod store;
pub mod view;
pub mod web;

use axum::Router;

pub use crate::api::SharedStore;
pub use crate::config::AppConfig;
pub use crate::error::AppError;
pub use crate::model::{ListQuery, NewRecipe, Recipe, RecipeInput, SortOrder};
pub use crate::store::{MemoryStore, RecipeStore, SupabaseStore};

/// Build the full application: the JSON API under `/api` and the
/// server-rendered pages at the root, both talking to the same store.
pub fn app(store: SharedStore) -> Router {
    api::router(store.clone()).merge(web::router(store))
}
