//! Shopping list consolidation.
//!
//! Qualifying lines of the selected recipes are bucketed by the exact
//! `(ingredient name, unit)` pair and their quantities summed. Names and units
//! are compared byte for byte: `"Rice"`/`"rice"` and `"cups"`/`"cup"` are
//! separate buckets, and no unit conversion is attempted.

use std::collections::HashMap;

use serde::Serialize;

use super::collation::sort_by_name;
use super::{DomainError, Quantity, Recipe, RecipeId};

mod picker;
mod service;

pub use picker::RecipePicker;
pub use service::ShoppingListService;


/// One consolidated entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListItem {
    /// Ingredient name as stored on the recipe lines.
    pub ingredient_name: String,
    /// Sum of every contributing quantity.
    pub total_quantity: Quantity,
    /// Unit shared by every contributing line.
    pub unit: String,
}

impl ShoppingListItem {
    /// Display text with the quantity at a fixed scale, e.g. `Rice 3.00 cups`.
    pub fn display_line(&self, scale: u32) -> String {
        format!(
            "{} {} {}",
            self.ingredient_name,
            self.total_quantity.to_fixed(scale),
            self.unit
        )
    }
}

/// Consolidated shopping list, sorted by ingredient name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShoppingList {
    items: Vec<ShoppingListItem>,
}

impl ShoppingList {
    /// Entries in display order.
    pub fn items(&self) -> &[ShoppingListItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Display text for every entry.
    pub fn display_lines(&self, scale: u32) -> Vec<String> {
        self.items
            .iter()
            .map(|item| item.display_line(scale))
            .collect()
    }
}

/// Merge the qualifying lines of `recipes` into a shopping list.
///
/// Lines that are deleted, unnamed, or missing a quantity or unit are skipped
/// silently. Entries with the same name but different units keep the order in
/// which they were first seen.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use recipe_companion::domain::{
///     IngredientLine, Quantity, Recipe, RecipeContents, UserId, consolidate,
/// };
///
/// let owner = UserId::random();
/// let recipe = |lines| {
///     Recipe::new(
///         owner.clone(),
///         RecipeContents { name: "R".into(), lines, notes: String::new() },
///         Utc::now(),
///     )
/// };
/// let r1 = recipe(vec![IngredientLine::new("Rice", Some(Quantity::from(2)), "cups")]);
/// let r2 = recipe(vec![IngredientLine::new("Rice", Some(Quantity::from(1)), "cups")]);
///
/// let list = consolidate([&r1, &r2]);
/// assert_eq!(list.display_lines(2), vec!["Rice 3.00 cups".to_owned()]);
/// ```
pub fn consolidate<'a>(recipes: impl IntoIterator<Item = &'a Recipe>) -> ShoppingList {
    let mut items: Vec<ShoppingListItem> = Vec::new();
    let mut buckets: HashMap<(&'a str, &'a str), usize> = HashMap::new();

    for line in recipes
        .into_iter()
        .flat_map(|recipe| recipe.lines.iter())
        .filter(|line| line.is_consolidatable())
    {
        let Some(quantity) = line.quantity else {
            continue;
        };
        let key = (line.ingredient_name.as_str(), line.unit.as_str());
        match buckets.get(&key) {
            Some(&slot) => {
                if let Some(item) = items.get_mut(slot) {
                    item.total_quantity = item.total_quantity + quantity;
                }
            }
            None => {
                buckets.insert(key, items.len());
                items.push(ShoppingListItem {
                    ingredient_name: line.ingredient_name.clone(),
                    total_quantity: quantity,
                    unit: line.unit.clone(),
                });
            }
        }
    }

    sort_by_name(&mut items, |item| item.ingredient_name.as_str());
    ShoppingList { items }
}

/// Active recipes whose id appears in `selected`, in stored order.
///
/// Ids that no longer match an active recipe are ignored, and repeated ids
/// resolve once.
pub fn resolve_selection<'a>(recipes: &'a [Recipe], selected: &[RecipeId]) -> Vec<&'a Recipe> {
    recipes
        .iter()
        .filter(|recipe| !recipe.deleted && selected.contains(&recipe.id))
        .collect()
}

pub(crate) fn empty_selection_error() -> DomainError {
    DomainError::validation("selection", "select at least one recipe")
}
