//! Pure list-view logic: the derived (filtered and sorted) recipe view and
//! the tag options offered by the filter dropdown. Kept free of any I/O so
//! the list page is just `fetch -> derive_view -> render`.

use crate::model::Recipe;

/// Sort direction for the title sort on the list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TitleSort {
    #[default]
    Asc,
    Desc,
}

impl TitleSort {
    /// `desc` sorts Z-A, anything else A-Z (the UI's default).
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("desc") => TitleSort::Desc,
            _ => TitleSort::Asc,
        }
    }
}

/// The three filter/sort controls on the list view.
#[derive(Debug, Clone, Default)]
pub struct ListControls {
    pub search: String,
    pub tag: Option<String>,
    pub sort: TitleSort,
}

/// Compute the derived view: search filter, then tag filter, then a stable
/// title sort. Descending is ascending reversed, so sorting ascending and
/// reversing always equals sorting descending, ties included.
pub fn derive_view<'a>(recipes: &'a [Recipe], controls: &ListControls) -> Vec<&'a Recipe> {
    let search = controls.search.trim().to_lowercase();

    let mut view: Vec<&Recipe> = recipes
        .iter()
        .filter(|r| search.is_empty() || r.title.to_lowercase().contains(&search))
        .filter(|r| match controls.tag.as_deref() {
            Some(tag) if !tag.is_empty() => r
                .tags
                .as_ref()
                .is_some_and(|tags| tags.iter().any(|t| t == tag)),
            _ => true,
        })
        .collect();

    view.sort_by(|a, b| title_key(&a.title).cmp(&title_key(&b.title)));
    if controls.sort == TitleSort::Desc {
        view.reverse();
    }
    view
}

/// Case-insensitive sort key; the original title breaks ties so equal-key
/// ordering stays deterministic across runs.
fn title_key(title: &str) -> (String, &str) {
    (title.to_lowercase(), title)
}

/// All distinct non-blank tags across the fetched set, alphabetically
/// sorted, for the filter dropdown.
pub fn tag_options(recipes: &[Recipe]) -> Vec<String> {
    let mut tags: Vec<String> = recipes
        .iter()
        .flat_map(|r| r.tags.as_deref().unwrap_or_default())
        .filter(|t| !t.trim().is_empty())
        .cloned()
        .collect();
    tags.sort();
    tags.dedup();
    tags
}
