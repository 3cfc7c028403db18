//! Recipe selection state for shopping list generation.

use std::collections::BTreeSet;

use crate::domain::{Recipe, RecipeId, sorted_active_recipes};

/// Toggle set of selected recipes plus the ingredient search term.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipePicker {
    selected: BTreeSet<RecipeId>,
    search: String,
}

impl RecipePicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip selection for `id`, returning whether it is now selected.
    pub fn toggle(&mut self, id: RecipeId) -> bool {
        if self.selected.remove(&id) {
            false
        } else {
            self.selected.insert(id);
            true
        }
    }

    pub fn is_selected(&self, id: &RecipeId) -> bool {
        self.selected.contains(id)
    }

    /// Selected ids in a stable order.
    pub fn selected_ids(&self) -> Vec<RecipeId> {
        self.selected.iter().copied().collect()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// Active recipes sorted by name, narrowed to those using an ingredient
    /// that contains the search term.
    pub fn visible<'a>(&self, recipes: &'a [Recipe]) -> Vec<&'a Recipe> {
        sorted_active_recipes(recipes)
            .into_iter()
            .filter(|recipe| recipe.uses_ingredient(&self.search))
            .collect()
    }

    /// Drop the selection and the search term.
    pub fn clear(&mut self) {
        self.selected.clear();
        self.search.clear();
    }
}
