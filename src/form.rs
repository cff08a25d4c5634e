//! Draft state for the create and edit forms. Holds the uncommitted field
//! values and the tag add/remove interaction; validation mirrors the server
//! so a bad submission is caught before the request fires.

use crate::error::AppError;
use crate::model::{NewRecipe, Recipe, RecipeInput};

/// Unsaved form field values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeDraft {
    pub title: String,
    pub ingredients: String,
    pub tags: Vec<String>,
    pub image_url: String,
}

impl RecipeDraft {
    /// Pre-fill the edit form from an existing record.
    pub fn from_recipe(recipe: &Recipe) -> Self {
        RecipeDraft {
            title: recipe.title.clone(),
            ingredients: recipe.ingredients.clone(),
            tags: recipe.tags.clone().unwrap_or_default(),
            image_url: recipe.image_url.clone().unwrap_or_default(),
        }
    }

    /// Add a tag, trimmed. Blank input and case-sensitive duplicates are
    /// no-ops. Returns whether the tag was added.
    pub fn add_tag(&mut self, raw: &str) -> bool {
        let tag = raw.trim();
        if tag.is_empty() || self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }

    /// Validate the draft with the same rules the server applies, yielding
    /// the payload to submit or the message to show the user.
    pub fn validate(&self) -> Result<NewRecipe, AppError> {
        RecipeInput {
            title: Some(self.title.clone()),
            ingredients: Some(self.ingredients.clone()),
            tags: Some(self.tags.clone()),
            image_url: Some(self.image_url.clone()),
        }
        .validate()
    }
}
