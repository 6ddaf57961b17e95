use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use super::{Recipe, RecipeId};

/// Shortest title word that counts when matching recommendations.
const MIN_SHARED_WORD_LEN: usize = 3;

/// Recipes whose title contains `term`, case-insensitively. An empty term keeps everything.
pub fn filter<'a>(all: &'a [Recipe], term: &str) -> Vec<&'a Recipe> {
    let needle = term.to_lowercase();
    all.iter()
        .filter(|recipe| recipe.title.to_lowercase().contains(&needle))
        .collect()
}

/// Snapshot of the recipe collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecipeStore {
    recipes: Vec<Recipe>,
    favorites: Vec<RecipeId>,
    search_term: String,
}

impl RecipeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn favorites(&self) -> &[RecipeId] {
        &self.favorites
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn get(&self, id: RecipeId) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    pub fn is_favorite(&self, id: RecipeId) -> bool {
        self.favorites.contains(&id)
    }

    /// Recipes matching the current search term.
    pub fn visible(&self) -> Vec<&Recipe> {
        filter(&self.recipes, &self.search_term)
    }

    #[must_use]
    pub fn set_recipes(self, recipes: Vec<Recipe>) -> Self {
        let ids: HashSet<RecipeId> = recipes.iter().map(|r| r.id).collect();
        Self {
            favorites: self
                .favorites
                .into_iter()
                .filter(|id| ids.contains(id))
                .collect(),
            recipes,
            ..self
        }
    }

    #[must_use]
    pub fn add_recipe(mut self, recipe: Recipe) -> Self {
        debug!(id = recipe.id, "Adding recipe");
        self.recipes.push(recipe);
        self
    }

    /// Replaces the recipe with the same id; unknown ids leave the store unchanged.
    #[must_use]
    pub fn update_recipe(mut self, updated: Recipe) -> Self {
        if let Some(slot) = self.recipes.iter_mut().find(|r| r.id == updated.id) {
            *slot = updated;
        }
        self
    }

    #[must_use]
    pub fn delete_recipe(mut self, id: RecipeId) -> Self {
        self.recipes.retain(|r| r.id != id);
        self.favorites.retain(|f| *f != id);
        self
    }

    #[must_use]
    pub fn set_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    #[must_use]
    pub fn add_favorite(mut self, id: RecipeId) -> Self {
        if !self.favorites.contains(&id) {
            self.favorites.push(id);
        }
        self
    }

    #[must_use]
    pub fn remove_favorite(mut self, id: RecipeId) -> Self {
        self.favorites.retain(|f| *f != id);
        self
    }

    #[must_use]
    pub fn toggle_favorite(self, id: RecipeId) -> Self {
        if self.is_favorite(id) {
            self.remove_favorite(id)
        } else {
            self.add_favorite(id)
        }
    }

    /// Favorite recipes in the order they were favorited.
    pub fn favorite_recipes(&self) -> Vec<&Recipe> {
        self.favorites.iter().filter_map(|id| self.get(*id)).collect()
    }

    /// Non-favorite recipes whose title shares a word with a favorite's title.
    pub fn recommendations(&self) -> Vec<&Recipe> {
        let liked: HashSet<String> = self
            .favorite_recipes()
            .iter()
            .flat_map(|r| title_words(&r.title))
            .collect();

        if liked.is_empty() {
            return Vec::new();
        }

        self.recipes
            .iter()
            .filter(|r| !self.is_favorite(r.id))
            .filter(|r| title_words(&r.title).any(|w| liked.contains(&w)))
            .collect()
    }
}

fn title_words(title: &str) -> impl Iterator<Item = String> + '_ {
    title
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.chars().count() >= MIN_SHARED_WORD_LEN)
        .map(str::to_lowercase)
}
