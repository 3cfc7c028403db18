//! Driving port for saving and deleting recipes.
//!
//! Inbound adapters hand over the draft together with the catalog snapshot
//! they are currently showing; duplicate suppression for inline ingredients is
//! checked against that snapshot, not against the store.

use async_trait::async_trait;

use crate::domain::{DomainError, Ingredient, RecipeDraft, RecipeId, UserId};

/// Request to persist a recipe draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRecipeRequest {
    /// Owner of the recipe and of any ingredients created inline.
    pub owner: UserId,
    /// Form state to validate and write.
    pub draft: RecipeDraft,
    /// Catalog as currently loaded by the caller.
    pub catalog: Vec<Ingredient>,
}

/// Whether the save created a new document or overwrote an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Updated,
}

/// Result of a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRecipeResponse {
    /// Identifier of the written recipe.
    pub recipe_id: RecipeId,
    /// Create or update.
    pub outcome: SaveOutcome,
    /// Catalog entries created while saving.
    pub created_ingredients: Vec<Ingredient>,
}

/// Driving port for recipe editing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeEditorCommand: Send + Sync {
    /// Validate and write a draft.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidRequest` error when the name is blank or no line is
    /// active, without touching the store. Store failures surface as generic
    /// `ServiceUnavailable` or `InternalError` errors.
    async fn save_recipe(
        &self,
        request: SaveRecipeRequest,
    ) -> Result<SaveRecipeResponse, DomainError>;

    /// Seed an editing draft from a stored recipe.
    ///
    /// # Errors
    ///
    /// Returns a `NotFound` error when the recipe is missing or deleted.
    async fn open_recipe(&self, owner: &UserId, id: &RecipeId) -> Result<RecipeDraft, DomainError>;

    /// Soft-delete a recipe.
    async fn delete_recipe(&self, owner: &UserId, id: &RecipeId) -> Result<(), DomainError>;
}

/// Fixture implementation that validates but never persists.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRecipeEditorCommand;

#[async_trait]
impl RecipeEditorCommand for FixtureRecipeEditorCommand {
    async fn save_recipe(
        &self,
        request: SaveRecipeRequest,
    ) -> Result<SaveRecipeResponse, DomainError> {
        let plan = request.draft.validate()?;
        let (recipe_id, outcome) = match plan.editing {
            Some(id) => (id, SaveOutcome::Updated),
            None => (RecipeId::random(), SaveOutcome::Created),
        };
        Ok(SaveRecipeResponse {
            recipe_id,
            outcome,
            created_ingredients: Vec::new(),
        })
    }

    async fn open_recipe(
        &self,
        _owner: &UserId,
        id: &RecipeId,
    ) -> Result<RecipeDraft, DomainError> {
        Err(DomainError::not_found(format!("recipe {id} not found")))
    }

    async fn delete_recipe(&self, _owner: &UserId, _id: &RecipeId) -> Result<(), DomainError> {
        Ok(())
    }
}
