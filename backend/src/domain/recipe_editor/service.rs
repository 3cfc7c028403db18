//! Recipe editor service implementing the editing driving port.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    CatalogRepository, RecipeEditorCommand, RecipeRepository, SaveOutcome, SaveRecipeRequest,
    SaveRecipeResponse,
};
use crate::domain::store_errors::{catalog_store_error, recipe_store_error};
use crate::domain::{
    DomainError, Ingredient, Recipe, RecipeContents, RecipeDraft, RecipeId, UserId,
    find_active_ingredient,
};

/// Saves recipe drafts, creating inline catalog entries first.
#[derive(Clone)]
pub struct RecipeEditorService<R, C> {
    recipes: Arc<R>,
    catalog: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<R, C> RecipeEditorService<R, C> {
    /// Create a new service with the given stores and clock.
    pub fn new(recipes: Arc<R>, catalog: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            recipes,
            catalog,
            clock,
        }
    }
}

impl<R, C> RecipeEditorService<R, C>
where
    R: RecipeRepository,
    C: CatalogRepository,
{
    /// Create catalog entries for inline names that match nothing loaded.
    ///
    /// Names are checked against the caller's catalog snapshot and against
    /// entries created earlier in the same save. A failure part way leaves
    /// earlier entries in place.
    async fn create_missing_ingredients(
        &self,
        owner: &UserId,
        catalog: &[Ingredient],
        names: &[String],
    ) -> Result<Vec<Ingredient>, DomainError> {
        let mut created: Vec<Ingredient> = Vec::new();
        for name in names {
            if let Some(existing) = find_active_ingredient(catalog, name) {
                debug!(name = %name, existing = %existing.name, "reusing catalog ingredient");
                continue;
            }
            if find_active_ingredient(&created, name).is_some() {
                continue;
            }
            let ingredient = Ingredient::new(owner.clone(), name, self.clock.utc());
            self.catalog
                .create_ingredient(&ingredient)
                .await
                .map_err(catalog_store_error)?;
            created.push(ingredient);
        }
        Ok(created)
    }

    async fn write_recipe(
        &self,
        owner: &UserId,
        editing: Option<RecipeId>,
        contents: RecipeContents,
    ) -> Result<(RecipeId, SaveOutcome), DomainError> {
        let now = self.clock.utc();
        let written = match editing {
            Some(id) => self
                .recipes
                .update_contents(owner, &id, &contents, now)
                .await
                .map(|()| (id, SaveOutcome::Updated)),
            None => {
                let recipe = Recipe::new(owner.clone(), contents, now);
                self.recipes
                    .create(&recipe)
                    .await
                    .map(|()| (recipe.id, SaveOutcome::Created))
            }
        };
        written.map_err(recipe_store_error)
    }
}

#[async_trait]
impl<R, C> RecipeEditorCommand for RecipeEditorService<R, C>
where
    R: RecipeRepository,
    C: CatalogRepository,
{
    async fn save_recipe(
        &self,
        request: SaveRecipeRequest,
    ) -> Result<SaveRecipeResponse, DomainError> {
        let SaveRecipeRequest {
            owner,
            draft,
            catalog,
        } = request;
        let plan = draft.validate()?;

        let created_ingredients = self
            .create_missing_ingredients(&owner, &catalog, &plan.new_ingredient_names)
            .await?;

        let (recipe_id, outcome) = self
            .write_recipe(&owner, plan.editing, plan.contents)
            .await
            .inspect_err(|_| {
                if !created_ingredients.is_empty() {
                    warn!(
                        owner = %owner,
                        created = created_ingredients.len(),
                        "recipe write failed after catalog entries were created; keeping them"
                    );
                }
            })?;

        info!(owner = %owner, recipe_id = %recipe_id, ?outcome, "recipe saved");
        Ok(SaveRecipeResponse {
            recipe_id,
            outcome,
            created_ingredients,
        })
    }

    async fn open_recipe(&self, owner: &UserId, id: &RecipeId) -> Result<RecipeDraft, DomainError> {
        let recipe = self
            .recipes
            .find_active(owner, id)
            .await
            .map_err(recipe_store_error)?
            .ok_or_else(|| DomainError::not_found(format!("recipe {id} not found")))?;
        Ok(RecipeDraft::from_recipe(&recipe))
    }

    async fn delete_recipe(&self, owner: &UserId, id: &RecipeId) -> Result<(), DomainError> {
        self.recipes
            .soft_delete(owner, id)
            .await
            .map_err(recipe_store_error)?;
        info!(owner = %owner, recipe_id = %id, "recipe soft-deleted");
        Ok(())
    }
}
