//! Server-rendered browser UI: the list view with its filter/sort controls
//! and two-stage delete confirmation, and the create/edit forms. All state
//! lives in the URL (controls, pending confirmation, notices); the pure
//! transforms in `view` and `form` do the actual work.

use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use log::warn;
use serde::Deserialize;

use crate::api::SharedStore;
use crate::error::AppError;
use crate::form::RecipeDraft;
use crate::model::{ListQuery, Recipe};
use crate::view::{derive_view, tag_options, ListControls, TitleSort};

pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/", get(list_page))
        .route("/create", get(create_page).post(create_submit))
        .route("/edit/:id", get(edit_page).post(edit_submit))
        .route("/delete/:id", axum::routing::post(delete_submit))
        .with_state(store)
}

#[derive(Debug, Default, Deserialize)]
struct ListPageParams {
    #[serde(default)]
    search: String,
    tag: Option<String>,
    sort: Option<String>,
    /// id of the recipe awaiting delete confirmation
    confirm: Option<String>,
    notice: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RecipeFormBody {
    #[serde(default)]
    title: String,
    #[serde(default)]
    ingredients: String,
    /// comma-separated; each token goes through the draft's add_tag
    #[serde(default)]
    tags: String,
    #[serde(default)]
    image_url: String,
}

impl RecipeFormBody {
    fn into_draft(self) -> RecipeDraft {
        let mut draft = RecipeDraft {
            title: self.title,
            ingredients: self.ingredients,
            tags: Vec::new(),
            image_url: self.image_url,
        };
        for token in self.tags.split(',') {
            draft.add_tag(token);
        }
        draft
    }
}

fn redirect_home(param: &str, message: &str) -> Redirect {
    let query = serde_urlencoded::to_string([(param, message)]).unwrap_or_default();
    Redirect::to(&format!("/?{query}"))
}

async fn list_page(
    State(store): State<SharedStore>,
    Query(params): Query<ListPageParams>,
) -> Result<Html<String>, AppError> {
    // fetch the full set once; filtering and sorting are local transforms
    let recipes = store.list(&ListQuery::default()).await?;

    let controls = ListControls {
        search: params.search.clone(),
        tag: params.tag.clone().filter(|t| !t.is_empty()),
        sort: TitleSort::from_param(params.sort.as_deref()),
    };
    let view = derive_view(&recipes, &controls);
    let tags = tag_options(&recipes);

    let mut body = String::new();
    body.push_str(
        "<div class=\"header\"><h1>Recipe Sharing App</h1>\
         <p>Discover and manage your favorite recipes</p></div>",
    );
    render_banner(&mut body, params.notice.as_deref(), params.error.as_deref());
    render_controls(&mut body, &controls, &tags);

    if view.is_empty() {
        let hint = if recipes.is_empty() {
            "Get started by creating your first recipe!"
        } else {
            "Try adjusting your search or filter criteria."
        };
        body.push_str(&format!(
            "<div class=\"no-recipes\"><h3>No recipes found</h3><p>{hint}</p></div>"
        ));
    } else {
        body.push_str("<div class=\"recipe-grid\">");
        for recipe in &view {
            render_card(&mut body, recipe, &controls);
        }
        body.push_str("</div>");
    }

    if let Some(id) = params.confirm.as_deref() {
        if let Some(recipe) = recipes.iter().find(|r| r.id == id) {
            render_confirm_dialog(&mut body, recipe, &controls);
        }
    }

    Ok(Html(page("Recipe Sharing App", &body)))
}

async fn create_page() -> Html<String> {
    Html(render_form_page("Create New Recipe", &RecipeDraft::default(), "/create", "Create Recipe", None))
}

async fn create_submit(
    State(store): State<SharedStore>,
    Form(body): Form<RecipeFormBody>,
) -> Result<Response, AppError> {
    let draft = body.into_draft();
    match draft.validate() {
        Ok(new) => {
            store.create(new).await?;
            Ok(redirect_home("notice", "Recipe created successfully!").into_response())
        }
        Err(err) => Ok(Html(render_form_page(
            "Create New Recipe",
            &draft,
            "/create",
            "Create Recipe",
            Some(&err.to_string()),
        ))
        .into_response()),
    }
}

async fn edit_page(State(store): State<SharedStore>, Path(id): Path<String>) -> Response {
    // a record that fails to load redirects home instead of rendering a broken form
    match store.get(&id).await {
        Ok(recipe) => {
            let draft = RecipeDraft::from_recipe(&recipe);
            Html(render_form_page(
                "Edit Recipe",
                &draft,
                &format!("/edit/{}", recipe.id),
                "Save Changes",
                None,
            ))
            .into_response()
        }
        Err(err) => {
            warn!("failed to load recipe {id} for editing: {err}");
            redirect_home("error", &format!("Error fetching recipe: {err}")).into_response()
        }
    }
}

async fn edit_submit(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    Form(body): Form<RecipeFormBody>,
) -> Result<Response, AppError> {
    let draft = body.into_draft();
    match draft.validate() {
        Ok(new) => {
            store.update(&id, new).await?;
            Ok(redirect_home("notice", "Recipe updated successfully!").into_response())
        }
        Err(err) => Ok(Html(render_form_page(
            "Edit Recipe",
            &draft,
            &format!("/edit/{id}"),
            "Save Changes",
            Some(&err.to_string()),
        ))
        .into_response()),
    }
}

async fn delete_submit(State(store): State<SharedStore>, Path(id): Path<String>) -> Response {
    match store.delete(&id).await {
        Ok(()) => redirect_home("notice", "Recipe deleted successfully").into_response(),
        Err(err) => redirect_home("error", &format!("Error deleting recipe: {err}")).into_response(),
    }
}

/// Query string for the list page with the given controls, plus an optional
/// extra pair (used to carry the pending delete confirmation).
fn controls_query(controls: &ListControls, extra: Option<(&str, &str)>) -> String {
    let mut pairs: Vec<(&str, String)> = Vec::new();
    if !controls.search.is_empty() {
        pairs.push(("search", controls.search.clone()));
    }
    if let Some(tag) = controls.tag.as_deref() {
        pairs.push(("tag", tag.to_string()));
    }
    if controls.sort == TitleSort::Desc {
        pairs.push(("sort", "desc".to_string()));
    }
    if let Some((key, value)) = extra {
        pairs.push((key, value.to_string()));
    }
    serde_urlencoded::to_string(&pairs).unwrap_or_default()
}

fn render_banner(out: &mut String, notice: Option<&str>, error: Option<&str>) {
    if let Some(message) = notice {
        out.push_str(&format!("<div class=\"banner notice\">{}</div>", text(message)));
    }
    if let Some(message) = error {
        out.push_str(&format!("<div class=\"banner error\">{}</div>", text(message)));
    }
}

fn render_controls(out: &mut String, controls: &ListControls, tags: &[String]) {
    out.push_str("<form class=\"controls\" method=\"get\" action=\"/\">");
    out.push_str(&format!(
        "<input type=\"text\" name=\"search\" value=\"{}\" \
         placeholder=\"Search recipes by title...\">",
        attr(&controls.search)
    ));

    out.push_str("<select name=\"tag\"><option value=\"\">All Tags</option>");
    for tag in tags {
        let selected = if controls.tag.as_deref() == Some(tag) {
            " selected"
        } else {
            ""
        };
        out.push_str(&format!(
            "<option value=\"{}\"{selected}>{}</option>",
            attr(tag),
            text(tag)
        ));
    }
    out.push_str("</select>");

    let (asc_sel, desc_sel) = match controls.sort {
        TitleSort::Asc => (" selected", ""),
        TitleSort::Desc => ("", " selected"),
    };
    out.push_str(&format!(
        "<select name=\"sort\">\
         <option value=\"asc\"{asc_sel}>Sort A-Z</option>\
         <option value=\"desc\"{desc_sel}>Sort Z-A</option>\
         </select>"
    ));
    out.push_str("<button type=\"submit\" class=\"btn\">Apply</button>");
    out.push_str("<a href=\"/create\" class=\"btn btn-primary\">+ Create Recipe</a>");
    out.push_str("</form>");
}

fn render_card(out: &mut String, recipe: &Recipe, controls: &ListControls) {
    out.push_str("<div class=\"recipe-card\">");
    match recipe.image_url.as_deref() {
        Some(url) => out.push_str(&format!(
            "<img class=\"recipe-image\" src=\"{}\" alt=\"{}\" \
             onerror=\"this.style.display='none'\">",
            attr(url),
            attr(&recipe.title)
        )),
        None => out.push_str("<div class=\"recipe-image\">No Image</div>"),
    }

    out.push_str(&format!("<h2 class=\"recipe-title\">{}</h2>", text(&recipe.title)));

    let lines: Vec<&str> = recipe.ingredients.split('\n').collect();
    let mut preview = lines.iter().take(3).cloned().collect::<Vec<_>>().join(", ");
    if lines.len() > 3 {
        preview.push_str("...");
    }
    out.push_str(&format!(
        "<p class=\"recipe-ingredients\">{}</p>",
        text(&preview)
    ));

    if let Some(tags) = recipe.tags.as_deref() {
        out.push_str("<div class=\"recipe-tags\">");
        for tag in tags {
            out.push_str(&format!("<span class=\"tag\">{}</span>", text(tag)));
        }
        out.push_str("</div>");
    }

    let confirm_query = controls_query(controls, Some(("confirm", &recipe.id)));
    out.push_str(&format!(
        "<div class=\"recipe-actions\">\
         <a class=\"btn btn-secondary\" href=\"/edit/{}\">Edit</a>\
         <a class=\"btn btn-danger\" href=\"/?{confirm_query}\">Delete</a>\
         </div></div>",
        attr(&recipe.id)
    ));
}

fn render_confirm_dialog(out: &mut String, recipe: &Recipe, controls: &ListControls) {
    let cancel_query = controls_query(controls, None);
    out.push_str(&format!(
        "<div class=\"confirm-dialog\"><div class=\"confirm-dialog-content\">\
         <h3>Confirm Delete</h3>\
         <p>Are you sure you want to delete &quot;{}&quot;? \
         This action cannot be undone.</p>\
         <div class=\"confirm-dialog-actions\">\
         <a class=\"btn btn-secondary\" href=\"/?{cancel_query}\">Cancel</a>\
         <form method=\"post\" action=\"/delete/{}\">\
         <button type=\"submit\" class=\"btn btn-danger\">Delete</button>\
         </form></div></div></div>",
        text(&recipe.title),
        attr(&recipe.id)
    ));
}

fn render_form_page(
    heading: &str,
    draft: &RecipeDraft,
    action: &str,
    submit_label: &str,
    error: Option<&str>,
) -> String {
    let mut body = String::new();
    body.push_str(&format!("<div class=\"header\"><h1>{}</h1></div>", text(heading)));
    render_banner(&mut body, None, error);

    body.push_str(&format!(
        "<form class=\"form-container\" method=\"post\" action=\"{}\">",
        attr(action)
    ));

    body.push_str(&format!(
        "<div class=\"form-group\"><label for=\"title\">Title \
         <span class=\"required\">*</span></label>\
         <input type=\"text\" id=\"title\" name=\"title\" value=\"{}\" \
         placeholder=\"Enter recipe title\"></div>",
        attr(&draft.title)
    ));

    body.push_str(&format!(
        "<div class=\"form-group\"><label for=\"ingredients\">Ingredients \
         <span class=\"required\">*</span></label>\
         <textarea id=\"ingredients\" name=\"ingredients\" \
         placeholder=\"Enter ingredients (one per line or comma-separated)\">{}</textarea>\
         <small>You can list ingredients one per line or separated by commas</small></div>",
        text(&draft.ingredients)
    ));

    body.push_str(&format!(
        "<div class=\"form-group\"><label for=\"tags\">Tags (Optional)</label>\
         <input type=\"text\" id=\"tags\" name=\"tags\" value=\"{}\" \
         placeholder=\"Comma-separated, e.g. Vegan, Quick\">\
         <small>Examples: Vegan, Dessert, Quick, Breakfast, etc.</small></div>",
        attr(&draft.tags.join(", "))
    ));

    body.push_str(&format!(
        "<div class=\"form-group\"><label for=\"image_url\">Image URL (Optional)</label>\
         <input type=\"url\" id=\"image_url\" name=\"image_url\" value=\"{}\" \
         placeholder=\"https://example.com/image.jpg\">\
         <small>Enter a URL to an image for this recipe</small>",
        attr(&draft.image_url)
    ));
    if !draft.image_url.is_empty() {
        body.push_str(&format!(
            "<div class=\"image-preview\"><img src=\"{}\" alt=\"Preview\" \
             onerror=\"this.style.display='none'\"></div>",
            attr(&draft.image_url)
        ));
    }
    body.push_str("</div>");

    body.push_str(&format!(
        "<div class=\"form-actions\">\
         <a class=\"btn btn-secondary\" href=\"/\">Cancel</a>\
         <button type=\"submit\" class=\"btn btn-primary\">{}</button>\
         </div></form>",
        text(submit_label)
    ));

    page(heading, &body)
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>{}</title><style>{STYLE}</style></head>\
         <body><div class=\"container\">{body}</div></body></html>",
        text(title)
    )
}

const STYLE: &str = "\
body{font-family:sans-serif;background:#f7f7f7;margin:0}\
.container{max-width:960px;margin:0 auto;padding:20px}\
.header h1{margin-bottom:4px}\
.banner{padding:10px 14px;border-radius:6px;margin:12px 0}\
.banner.notice{background:#e6f7e6;color:#1e6b1e}\
.banner.error{background:#fdecea;color:#a12622}\
.controls{display:flex;gap:10px;margin:16px 0;flex-wrap:wrap}\
.controls input,.controls select{padding:8px}\
.btn{padding:8px 14px;border:1px solid #ccc;border-radius:6px;background:#fff;\
text-decoration:none;color:#222;cursor:pointer}\
.btn-primary{background:#2563eb;border-color:#2563eb;color:#fff}\
.btn-danger{background:#dc2626;border-color:#dc2626;color:#fff}\
.recipe-grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(260px,1fr));gap:16px}\
.recipe-card{background:#fff;border-radius:8px;padding:14px;box-shadow:0 1px 3px rgba(0,0,0,.1)}\
.recipe-image{width:100%;height:140px;object-fit:cover;border-radius:6px;background:#eee;\
display:flex;align-items:center;justify-content:center;color:#888}\
.recipe-tags .tag{display:inline-block;background:#eef2ff;border-radius:10px;\
padding:2px 8px;margin-right:6px;font-size:.85em}\
.recipe-actions{display:flex;gap:8px;margin-top:10px}\
.no-recipes{text-align:center;padding:40px;color:#666}\
.confirm-dialog{position:fixed;inset:0;background:rgba(0,0,0,.4);\
display:flex;align-items:center;justify-content:center}\
.confirm-dialog-content{background:#fff;border-radius:8px;padding:20px;max-width:420px}\
.confirm-dialog-actions{display:flex;gap:10px;justify-content:flex-end}\
.form-container{background:#fff;border-radius:8px;padding:20px}\
.form-group{margin-bottom:16px}\
.form-group label{display:block;margin-bottom:6px;font-weight:600}\
.form-group input,.form-group textarea{width:100%;padding:8px;box-sizing:border-box}\
.form-group textarea{min-height:120px}\
.form-group small{color:#777}\
.required{color:#dc2626}\
.image-preview img{max-width:240px;margin-top:8px;border-radius:6px}\
.form-actions{display:flex;gap:10px;justify-content:flex-end}";
