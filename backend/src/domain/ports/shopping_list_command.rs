//! Driving port for shopping list generation.

use async_trait::async_trait;

use crate::domain::shopping_list::empty_selection_error;
use crate::domain::{
    DomainError, Recipe, RecipeId, ShoppingList, UserId, consolidate, resolve_selection,
};

/// Request to build a shopping list from selected recipes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateShoppingListRequest {
    /// Owner whose usage counters are bumped.
    pub owner: UserId,
    /// The caller's current snapshot of active recipes.
    pub recipes: Vec<Recipe>,
    /// Ids picked by the user.
    pub selected: Vec<RecipeId>,
}

/// Generated list, available before the usage counters are recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateShoppingListResponse {
    /// Consolidated, sorted list.
    pub list: ShoppingList,
}

/// Driving port for the shopping list generator.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShoppingListCommand: Send + Sync {
    /// Consolidate the selected recipes and bump their usage counters.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidRequest` error when no selected id resolves to an
    /// active recipe. The counter update runs in the background, so its
    /// failure is never an error here.
    async fn generate(
        &self,
        request: GenerateShoppingListRequest,
    ) -> Result<GenerateShoppingListResponse, DomainError>;
}

/// Fixture implementation that consolidates without recording usage.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureShoppingListCommand;

#[async_trait]
impl ShoppingListCommand for FixtureShoppingListCommand {
    async fn generate(
        &self,
        request: GenerateShoppingListRequest,
    ) -> Result<GenerateShoppingListResponse, DomainError> {
        let chosen = resolve_selection(&request.recipes, &request.selected);
        if chosen.is_empty() {
            return Err(empty_selection_error());
        }
        Ok(GenerateShoppingListResponse {
            list: consolidate(chosen),
        })
    }
}
