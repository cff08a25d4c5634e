//! The REST endpoints: list, get, create, update, delete. Each handler is
//! stateless; validation happens at the boundary and never reaches the
//! store, and store failures surface their message with status 500.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::AppError;
use crate::model::{ListQuery, Recipe, RecipeInput, SortOrder};
use crate::store::RecipeStore;

pub type SharedStore = Arc<dyn RecipeStore>;

pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/api/recipes", get(list_recipes).post(create_recipe))
        .route(
            "/api/recipes/:id",
            get(get_recipe).put(update_recipe).delete(delete_recipe),
        )
        .with_state(store)
}

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
    pub tag: Option<String>,
    pub sort: Option<String>,
}

impl From<ListParams> for ListQuery {
    fn from(params: ListParams) -> Self {
        ListQuery {
            search: params.search,
            tag: params.tag,
            sort: SortOrder::from_param(params.sort.as_deref()),
        }
    }
}

#[derive(Debug, Serialize)]
struct RecipeList {
    recipes: Vec<Recipe>,
}

async fn list_recipes(
    State(store): State<SharedStore>,
    Query(params): Query<ListParams>,
) -> Result<Json<RecipeList>, AppError> {
    let recipes = store.list(&params.into()).await?;
    Ok(Json(RecipeList { recipes }))
}

async fn get_recipe(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let recipe = store.get(&id).await?;
    Ok(Json(json!({ "recipe": recipe })))
}

async fn create_recipe(
    State(store): State<SharedStore>,
    Json(input): Json<RecipeInput>,
) -> Result<impl IntoResponse, AppError> {
    let new = input.validate()?;
    let recipe = store.create(new).await?;
    info!("created recipe {} ({})", recipe.id, recipe.title);
    Ok((StatusCode::CREATED, Json(json!({ "recipe": recipe }))))
}

async fn update_recipe(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    Json(input): Json<RecipeInput>,
) -> Result<impl IntoResponse, AppError> {
    let new = input.validate()?;
    let recipe = store.update(&id, new).await?;
    info!("updated recipe {}", recipe.id);
    Ok(Json(json!({ "recipe": recipe })))
}

async fn delete_recipe(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    store.delete(&id).await?;
    info!("deleted recipe {id}");
    Ok(Json(json!({ "message": "Recipe deleted successfully" })))
}
