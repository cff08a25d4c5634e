use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A stored recipe row. `id` and the timestamps are owned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub ingredients: String,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Untrusted create/update request body. All fields optional so that a
/// missing field and a blank field fail validation the same way.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipeInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub ingredients: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// A validated, normalized recipe payload ready to persist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewRecipe {
    pub title: String,
    pub ingredients: String,
    pub tags: Option<Vec<String>>,
    pub image_url: Option<String>,
}

impl RecipeInput {
    /// Validate and normalize into a `NewRecipe`.
    ///
    /// Trims `title`, `ingredients` and `image_url`; rejects missing or
    /// whitespace-only `title`/`ingredients`; normalizes an empty tag list
    /// and an empty image URL to `None`. Tag entries are passed through as
    /// given (deduplication is the caller's responsibility).
    pub fn validate(self) -> Result<NewRecipe, AppError> {
        let title = match self.title.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => return Err(AppError::Validation("Title is required".to_string())),
        };

        let ingredients = match self.ingredients.as_deref().map(str::trim) {
            Some(i) if !i.is_empty() => i.to_string(),
            _ => return Err(AppError::Validation("Ingredients is required".to_string())),
        };

        let tags = self.tags.filter(|t| !t.is_empty());

        let image_url = self
            .image_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(str::to_string);

        Ok(NewRecipe {
            title,
            ingredients,
            tags,
            image_url,
        })
    }
}

/// Sort direction for `created_at` ordering in list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Lenient parse: `asc` sorts ascending, anything else (including
    /// absence) descending.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }
}

/// Filters applied by the list endpoint, pushed down to the store.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    /// Case-insensitive substring match on `title`
    pub search: Option<String>,
    /// Exact membership test against `tags`
    pub tag: Option<String>,
    pub sort: SortOrder,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(title: &str, ingredients: &str) -> RecipeInput {
        RecipeInput {
            title: Some(title.to_string()),
            ingredients: Some(ingredients.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_trims_fields() {
        let new = input("  Tea  ", "  Water, Leaves  ").validate().unwrap();
        assert_eq!(new.title, "Tea");
        assert_eq!(new.ingredients, "Water, Leaves");
    }

    #[test]
    fn test_missing_title_rejected() {
        let err = RecipeInput {
            ingredients: Some("Water".to_string()),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.to_string(), "Title is required");
    }

    #[test]
    fn test_blank_title_rejected() {
        let err = input("   ", "Water").validate().unwrap_err();
        assert_eq!(err.to_string(), "Title is required");
    }

    #[test]
    fn test_blank_ingredients_rejected() {
        let err = input("Tea", " \n ").validate().unwrap_err();
        assert_eq!(err.to_string(), "Ingredients is required");
    }

    #[test]
    fn test_empty_tags_normalized_to_none() {
        let mut payload = input("Tea", "Water");
        payload.tags = Some(vec![]);
        let new = payload.validate().unwrap();
        assert_eq!(new.tags, None);
    }

    #[test]
    fn test_tags_passed_through_unchanged() {
        let mut payload = input("Tea", "Water");
        payload.tags = Some(vec!["Vegan".to_string(), "Vegan".to_string()]);
        let new = payload.validate().unwrap();
        // dedup is the caller's job, not validation's
        assert_eq!(
            new.tags,
            Some(vec!["Vegan".to_string(), "Vegan".to_string()])
        );
    }

    #[test]
    fn test_blank_image_url_normalized_to_none() {
        let mut payload = input("Tea", "Water");
        payload.image_url = Some("   ".to_string());
        let new = payload.validate().unwrap();
        assert_eq!(new.image_url, None);
    }

    #[test]
    fn test_image_url_trimmed() {
        let mut payload = input("Tea", "Water");
        payload.image_url = Some(" https://example.com/tea.jpg ".to_string());
        let new = payload.validate().unwrap();
        assert_eq!(new.image_url.as_deref(), Some("https://example.com/tea.jpg"));
    }

    #[test]
    fn test_sort_order_lenient_parse() {
        assert_eq!(SortOrder::from_param(Some("asc")), SortOrder::Asc);
        assert_eq!(SortOrder::from_param(Some("desc")), SortOrder::Desc);
        assert_eq!(SortOrder::from_param(Some("bogus")), SortOrder::Desc);
        assert_eq!(SortOrder::from_param(None), SortOrder::Desc);
    }
}
