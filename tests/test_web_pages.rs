use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use recipe_share::{app, MemoryStore, NewRecipe, RecipeStore};

async fn seeded_app() -> (Router, String) {
    let store = Arc::new(MemoryStore::new());
    let recipe = store
        .create(NewRecipe {
            title: "Green Tea".to_string(),
            ingredients: "Water\nLeaves".to_string(),
            tags: Some(vec!["Vegan".to_string()]),
            image_url: None,
        })
        .await
        .unwrap();
    (app(store), recipe.id)
}

async fn get_page(app: &Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn post_form(app: &Router, uri: &str, body: &str) -> (StatusCode, Option<String>, String) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, location, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_list_page_renders_recipes_and_tag_options() {
    let (app, _) = seeded_app().await;
    let (status, html) = get_page(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Green Tea"));
    assert!(html.contains("<option value=\"Vegan\""));
    // two-line ingredients render without a truncation ellipsis
    assert!(html.contains("Water, Leaves"));
}

#[tokio::test]
async fn test_list_page_search_filters_cards() {
    let (app, _) = seeded_app().await;
    let (_, html) = get_page(&app, "/?search=coffee").await;
    assert!(!html.contains("Green Tea"));
    assert!(html.contains("Try adjusting your search or filter criteria."));
}

#[tokio::test]
async fn test_empty_store_shows_getting_started_hint() {
    let app = app(Arc::new(MemoryStore::new()));
    let (_, html) = get_page(&app, "/").await;
    assert!(html.contains("Get started by creating your first recipe!"));
}

#[tokio::test]
async fn test_delete_requires_confirmation_step() {
    let (app, id) = seeded_app().await;

    // the list page offers a confirm link, not a delete form
    let (_, html) = get_page(&app, "/").await;
    assert!(html.contains(&format!("confirm={id}")));
    assert!(!html.contains("Confirm Delete"));

    // with confirm= set, the dialog appears with cancel and delete actions
    let (_, html) = get_page(&app, &format!("/?confirm={id}")).await;
    assert!(html.contains("Confirm Delete"));
    assert!(html.contains(&format!("action=\"/delete/{id}\"")));

    // only the posted form actually deletes
    let (status, location, _) = post_form(&app, &format!("/delete/{id}"), "").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert!(location.unwrap().contains("notice="));
    let (_, html) = get_page(&app, "/").await;
    assert!(!html.contains("Green Tea"));
}

#[tokio::test]
async fn test_create_form_blocks_invalid_submission() {
    let app = app(Arc::new(MemoryStore::new()));
    let (status, location, html) = post_form(&app, "/create", "title=&ingredients=Water").await;
    // re-rendered form with a visible message, no redirect
    assert_eq!(status, StatusCode::OK);
    assert!(location.is_none());
    assert!(html.contains("Title is required"));
    // the draft survives the round trip
    assert!(html.contains("Water"));
    let (_, html) = get_page(&app, "/").await;
    assert!(html.contains("Get started by creating your first recipe!"));
}

#[tokio::test]
async fn test_create_form_parses_comma_separated_tags() {
    let store = Arc::new(MemoryStore::new());
    let app = app(store.clone());

    let (status, location, _) = post_form(
        &app,
        "/create",
        "title=Tea&ingredients=Water&tags=Vegan,+Quick,+Vegan,+&image_url=",
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert!(location.unwrap().starts_with("/?notice="));

    let recipes = store.list(&Default::default()).await.unwrap();
    assert_eq!(recipes.len(), 1);
    // trimmed, deduplicated, blanks dropped
    assert_eq!(
        recipes[0].tags,
        Some(vec!["Vegan".to_string(), "Quick".to_string()])
    );
}

#[tokio::test]
async fn test_edit_page_prefills_draft() {
    let (app, id) = seeded_app().await;
    let (status, html) = get_page(&app, &format!("/edit/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("value=\"Green Tea\""));
    assert!(html.contains("Vegan"));
}

#[tokio::test]
async fn test_edit_missing_recipe_redirects_home_with_error() {
    let (app, _) = seeded_app().await;
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/edit/no-such-id")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response.headers()[header::LOCATION].to_str().unwrap();
    assert!(location.starts_with("/?error="));
}

#[tokio::test]
async fn test_edit_submit_updates_record() {
    let (app, id) = seeded_app().await;
    let (status, _, _) = post_form(
        &app,
        &format!("/edit/{id}"),
        "title=Black+Tea&ingredients=Water&tags=&image_url=",
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    let (_, html) = get_page(&app, "/").await;
    assert!(html.contains("Black Tea"));
    assert!(!html.contains("Green Tea"));
}
