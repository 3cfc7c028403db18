//! Ingredient and unit catalog entries.
//!
//! Ingredients are per-owner and soft-deletable; units form a global,
//! read-only reference list. Recipes refer to both by *name*, so deleting an
//! ingredient never rewrites recipes that already use it.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;
use super::collation::sort_by_name;

/// Stable identifier of an [`Ingredient`] document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IngredientId(Uuid);

impl IngredientId {
    /// Generate a fresh identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for IngredientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Stable identifier of a [`Unit`] document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(Uuid);

impl UnitId {
    /// Generate a fresh identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Catalog ingredient owned by a single user.
///
/// ## Invariants
/// - Active (non-deleted) names are unique per owner ignoring case. The
///   recipe editor enforces this before creating entries; the store does not.
///
/// # Examples
/// ```
/// use recipe_companion::domain::{Ingredient, UserId};
/// use chrono::Utc;
///
/// let ingredient = Ingredient::new(UserId::random(), "Paprika", Utc::now());
/// assert!(!ingredient.deleted);
/// assert!(ingredient.name_matches("  PAPRIKA "));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    /// Document identifier.
    pub id: IngredientId,
    /// Display name, trimmed on creation.
    pub name: String,
    /// Owning user.
    pub owner_id: UserId,
    /// Soft-delete marker.
    #[serde(default)]
    pub deleted: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Ingredient {
    /// Create a new active ingredient with a fresh identifier.
    pub fn new(owner_id: UserId, name: impl AsRef<str>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: IngredientId::random(),
            name: name.as_ref().trim().to_owned(),
            owner_id,
            deleted: false,
            created_at,
        }
    }

    /// Case-insensitive comparison against a candidate name, ignoring
    /// surrounding whitespace.
    pub fn name_matches(&self, candidate: &str) -> bool {
        names_match(&self.name, candidate)
    }
}

/// Global unit label such as `cups` or `tsp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    /// Document identifier.
    pub id: UnitId,
    /// Label stored on ingredient lines.
    pub name: String,
}

impl Unit {
    /// Create a unit with a fresh identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: UnitId::random(),
            name: name.into(),
        }
    }
}

pub(crate) fn names_match(existing: &str, candidate: &str) -> bool {
    existing.trim().to_lowercase() == candidate.trim().to_lowercase()
}

/// Find an active ingredient whose name matches `name` ignoring case.
///
/// This is the linear duplicate check run against the currently loaded
/// catalog before a new entry is created.
pub fn find_active_ingredient<'a>(
    ingredients: &'a [Ingredient],
    name: &str,
) -> Option<&'a Ingredient> {
    ingredients
        .iter()
        .find(|ingredient| !ingredient.deleted && ingredient.name_matches(name))
}

/// Active ingredients sorted by name, as offered to the recipe editor.
pub fn ingredient_options(ingredients: &[Ingredient]) -> Vec<Ingredient> {
    let mut options: Vec<Ingredient> = ingredients
        .iter()
        .filter(|ingredient| !ingredient.deleted)
        .cloned()
        .collect();
    sort_by_name(&mut options, |ingredient| ingredient.name.as_str());
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn owner() -> UserId {
        UserId::random()
    }

    #[rstest]
    fn new_trims_the_name(owner: UserId) {
        let ingredient = Ingredient::new(owner, "  Basil ", Utc::now());
        assert_eq!(ingredient.name, "Basil");
    }

    #[rstest]
    #[case("paprika")]
    #[case("PAPRIKA")]
    #[case(" Paprika ")]
    fn finds_matches_ignoring_case(owner: UserId, #[case] candidate: &str) {
        let catalog = vec![Ingredient::new(owner, "Paprika", Utc::now())];
        assert!(find_active_ingredient(&catalog, candidate).is_some());
    }

    #[rstest]
    fn skips_deleted_entries(owner: UserId) {
        let mut deleted = Ingredient::new(owner, "Paprika", Utc::now());
        deleted.deleted = true;
        let catalog = vec![deleted];
        assert!(find_active_ingredient(&catalog, "paprika").is_none());
    }

    #[rstest]
    fn options_are_sorted_and_active_only(owner: UserId) {
        let mut removed = Ingredient::new(owner.clone(), "Anchovy", Utc::now());
        removed.deleted = true;
        let catalog = vec![
            Ingredient::new(owner.clone(), "salt", Utc::now()),
            removed,
            Ingredient::new(owner.clone(), "Basil", Utc::now()),
            Ingredient::new(owner, "olive oil", Utc::now()),
        ];

        let names: Vec<String> = ingredient_options(&catalog)
            .into_iter()
            .map(|ingredient| ingredient.name)
            .collect();
        assert_eq!(names, vec!["Basil", "olive oil", "salt"]);
    }
}
