//! Shopping list service implementing the generation driving port.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    GenerateShoppingListRequest, GenerateShoppingListResponse, RecipeRepository,
    ShoppingListCommand,
};
use crate::domain::{DomainError, RecipeId, UserId};

use super::{consolidate, empty_selection_error, resolve_selection};

/// Builds shopping lists and records recipe usage.
#[derive(Clone)]
pub struct ShoppingListService<R> {
    recipes: Arc<R>,
}

impl<R> ShoppingListService<R> {
    /// Create a new service over the recipe store.
    pub fn new(recipes: Arc<R>) -> Self {
        Self { recipes }
    }
}

impl<R> ShoppingListService<R>
where
    R: RecipeRepository + 'static,
{
    /// Bump the usage counters on a detached task so a slow store never
    /// holds back the list. Failures are only logged.
    fn record_usage(&self, owner: UserId, ids: Vec<RecipeId>) {
        let recipes = Arc::clone(&self.recipes);
        tokio::spawn(async move {
            match recipes.increment_usage_counts(&owner, &ids).await {
                Ok(()) => {
                    debug!(owner = %owner, recipes = ids.len(), "recorded shopping list usage");
                }
                Err(err) => warn!(
                    owner = %owner,
                    recipes = ids.len(),
                    error = %err,
                    "failed to record shopping list usage"
                ),
            }
        });
    }
}

#[async_trait]
impl<R> ShoppingListCommand for ShoppingListService<R>
where
    R: RecipeRepository + 'static,
{
    async fn generate(
        &self,
        request: GenerateShoppingListRequest,
    ) -> Result<GenerateShoppingListResponse, DomainError> {
        let chosen = resolve_selection(&request.recipes, &request.selected);
        if chosen.is_empty() {
            return Err(empty_selection_error());
        }
        let ids: Vec<RecipeId> = chosen.iter().map(|recipe| recipe.id).collect();
        let list = consolidate(chosen);

        info!(
            owner = %request.owner,
            recipes = ids.len(),
            items = list.items().len(),
            "shopping list generated"
        );
        self.record_usage(request.owner, ids);
        Ok(GenerateShoppingListResponse { list })
    }
}
