//! Recipe documents and their embedded ingredient lines.
//!
//! Lines are never removed from a persisted recipe; deleting one flips its
//! `deleted` flag so positions stay stable while the recipe is edited.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::collation::sort_by_name;
use super::{Quantity, UserId};

#[cfg(test)]
mod tests;

/// Stable identifier of a [`Recipe`] document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(Uuid);

impl RecipeId {
    /// Generate a fresh identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// One ingredient row embedded in a recipe.
///
/// # Examples
/// ```
/// use recipe_companion::domain::{IngredientLine, Quantity};
///
/// let line = IngredientLine::new("Rice", Some(Quantity::from(2)), "cups");
/// assert!(line.is_active());
/// assert!(line.is_consolidatable());
/// assert!(!line.clone().tombstoned().is_active());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientLine {
    /// Catalog name as entered; casing is preserved.
    pub ingredient_name: String,
    /// Amount, absent when the cook left it blank.
    #[serde(default)]
    pub quantity: Option<Quantity>,
    /// Unit label; empty when not chosen.
    #[serde(default)]
    pub unit: String,
    /// Tombstone marker.
    #[serde(default)]
    pub deleted: bool,
}

impl IngredientLine {
    /// Create an active line.
    pub fn new(
        ingredient_name: impl Into<String>,
        quantity: Option<Quantity>,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            ingredient_name: ingredient_name.into(),
            quantity,
            unit: unit.into(),
            deleted: false,
        }
    }

    /// Mark the line deleted, keeping it in place.
    pub fn tombstoned(mut self) -> Self {
        self.deleted = true;
        self
    }

    /// Not deleted and names an ingredient.
    pub fn is_active(&self) -> bool {
        !self.deleted && !self.ingredient_name.trim().is_empty()
    }

    /// Eligible for shopping-list consolidation: not deleted, with a name,
    /// a quantity, and a unit.
    pub fn is_consolidatable(&self) -> bool {
        !self.deleted
            && !self.ingredient_name.is_empty()
            && self.quantity.is_some()
            && !self.unit.is_empty()
    }
}

/// User-editable recipe content, the part an editor save writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeContents {
    /// Recipe title.
    pub name: String,
    /// Ordered ingredient lines, tombstones included.
    pub lines: Vec<IngredientLine>,
    /// Free-form notes.
    pub notes: String,
}

/// Recipe document.
///
/// ## Invariants
/// - Owned by exactly one user; never shared.
/// - At save time at least one line is active. Later edits may tombstone every
///   line, which leaves a recipe that contributes nothing to shopping lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Document identifier.
    pub id: RecipeId,
    /// Recipe title.
    pub name: String,
    /// Owning user.
    pub owner_id: UserId,
    /// Ordered ingredient lines, tombstones included.
    pub lines: Vec<IngredientLine>,
    /// Free-form notes.
    #[serde(default)]
    pub notes: String,
    /// How many shopping lists this recipe has been part of.
    #[serde(default)]
    pub times_added_to_shopping_list: u32,
    /// Soft-delete marker.
    #[serde(default)]
    pub deleted: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last content update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    /// Create a brand-new recipe with a zero usage counter.
    pub fn new(owner_id: UserId, contents: RecipeContents, now: DateTime<Utc>) -> Self {
        Self {
            id: RecipeId::random(),
            name: contents.name,
            owner_id,
            lines: contents.lines,
            notes: contents.notes,
            times_added_to_shopping_list: 0,
            deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace editable content, refreshing `updated_at` only.
    pub fn apply_contents(&mut self, contents: RecipeContents, now: DateTime<Utc>) {
        self.name = contents.name;
        self.lines = contents.lines;
        self.notes = contents.notes;
        self.updated_at = now;
    }

    /// Lines that are not deleted and name an ingredient.
    pub fn active_lines(&self) -> impl Iterator<Item = &IngredientLine> {
        self.lines.iter().filter(|line| line.is_active())
    }

    /// Whether any non-deleted line mentions `term`, ignoring case.
    ///
    /// A blank term matches every recipe.
    pub fn uses_ingredient(&self, term: &str) -> bool {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.lines.iter().any(|line| {
            !line.deleted
                && !line.ingredient_name.is_empty()
                && line.ingredient_name.to_lowercase().contains(&needle)
        })
    }
}

/// Row shown in the recipe list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummary {
    /// Recipe identifier for edit/delete actions.
    pub id: RecipeId,
    /// Recipe title.
    pub name: String,
    /// Usage counter ("Used N times").
    pub times_added_to_shopping_list: u32,
}

impl From<&Recipe> for RecipeSummary {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id,
            name: recipe.name.clone(),
            times_added_to_shopping_list: recipe.times_added_to_shopping_list,
        }
    }
}

/// Active recipes sorted by name.
pub fn sorted_active_recipes(recipes: &[Recipe]) -> Vec<&Recipe> {
    let mut active: Vec<&Recipe> = recipes.iter().filter(|recipe| !recipe.deleted).collect();
    sort_by_name(&mut active, |recipe| recipe.name.as_str());
    active
}

/// Summaries of the active recipes, sorted by name.
pub fn recipe_summaries(recipes: &[Recipe]) -> Vec<RecipeSummary> {
    sorted_active_recipes(recipes)
        .into_iter()
        .map(RecipeSummary::from)
        .collect()
}
