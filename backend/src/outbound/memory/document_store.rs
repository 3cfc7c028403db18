//! Catalog and recipe store adapter over in-memory collections.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::debug;

use crate::domain::ports::{
    CatalogRepository, CatalogRepositoryError, LiveQuery, RecipeRepository, RecipeRepositoryError,
};
use crate::domain::{
    Ingredient, IngredientId, Recipe, RecipeContents, RecipeId, Unit, UserId,
};

#[derive(Debug, Clone, Default)]
struct Documents {
    recipes: BTreeMap<RecipeId, Recipe>,
    ingredients: BTreeMap<IngredientId, Ingredient>,
    units: Vec<Unit>,
}

impl Documents {
    fn active_recipes(&self, owner: &UserId) -> Vec<Recipe> {
        self.recipes
            .values()
            .filter(|recipe| recipe.owner_id == *owner && !recipe.deleted)
            .cloned()
            .collect()
    }

    fn active_ingredients(&self, owner: &UserId) -> Vec<Ingredient> {
        self.ingredients
            .values()
            .filter(|ingredient| ingredient.owner_id == *owner && !ingredient.deleted)
            .cloned()
            .collect()
    }

    fn owned_recipe(&mut self, owner: &UserId, id: &RecipeId) -> Option<&mut Recipe> {
        self.recipes
            .get_mut(id)
            .filter(|recipe| recipe.owner_id == *owner)
    }

    fn owned_active_recipe(&mut self, owner: &UserId, id: &RecipeId) -> Option<&mut Recipe> {
        self.owned_recipe(owner, id).filter(|recipe| !recipe.deleted)
    }
}

/// Document store keeping every collection in memory.
///
/// Listings always apply the owner and not-deleted predicates. Soft-deleted
/// documents stay stored and can be inspected with
/// [`InMemoryDocumentStore::recipe_document`].
///
/// # Examples
/// ```
/// use recipe_companion::outbound::memory::InMemoryDocumentStore;
///
/// let store = InMemoryDocumentStore::with_unit_names(["cups", "g"]);
/// assert_eq!(store.unit_count(), 2);
/// ```
#[derive(Debug)]
pub struct InMemoryDocumentStore {
    documents: watch::Sender<Documents>,
    offline: AtomicBool,
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl InMemoryDocumentStore {
    /// Create a store whose global unit list is `units`.
    pub fn new(units: Vec<Unit>) -> Self {
        let (documents, _) = watch::channel(Documents {
            units,
            ..Documents::default()
        });
        Self {
            documents,
            offline: AtomicBool::new(false),
        }
    }

    /// Create a store seeded with freshly identified units.
    pub fn with_unit_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(names.into_iter().map(Unit::new).collect())
    }

    /// Number of units in the reference list.
    pub fn unit_count(&self) -> usize {
        self.documents.borrow().units.len()
    }

    /// Stored recipe document regardless of owner or deletion state.
    pub fn recipe_document(&self, id: &RecipeId) -> Option<Recipe> {
        self.documents.borrow().recipes.get(id).cloned()
    }

    /// Simulate losing the connection to the store. While offline every
    /// operation fails with a connection error.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn is_offline(&self) -> bool {
        self.offline.load(Ordering::SeqCst)
    }

    /// Apply `change` atomically. Subscribers are notified only on success.
    fn mutate<T, E>(
        &self,
        change: impl FnOnce(&mut Documents) -> Result<T, E>,
        not_run: impl FnOnce() -> E,
    ) -> Result<T, E> {
        let mut outcome = Err(not_run());
        self.documents.send_if_modified(|documents| {
            outcome = change(documents);
            outcome.is_ok()
        });
        outcome
    }

    /// Live projection of the collections, re-sent only when it changes.
    fn project<T>(&self, projection: impl Fn(&Documents) -> T + Send + 'static) -> LiveQuery<T>
    where
        T: Clone + PartialEq + Send + Sync + 'static,
    {
        let mut source = self.documents.subscribe();
        let initial = projection(&source.borrow_and_update());
        let (sender, receiver) = watch::channel(initial);

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    changed = source.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let next = projection(&source.borrow_and_update());
                        sender.send_if_modified(|current| {
                            if *current == next {
                                return false;
                            }
                            *current = next;
                            true
                        });
                    }
                    () = sender.closed() => break,
                }
            }
            debug!("live query closed");
        });

        LiveQuery::new(receiver)
    }
}

fn recipe_offline() -> RecipeRepositoryError {
    RecipeRepositoryError::connection("document store offline")
}

fn catalog_offline() -> CatalogRepositoryError {
    CatalogRepositoryError::connection("document store offline")
}

fn not_applied() -> RecipeRepositoryError {
    RecipeRepositoryError::query("write was not applied")
}

#[async_trait]
impl RecipeRepository for InMemoryDocumentStore {
    async fn list_active(&self, owner: &UserId) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        if self.is_offline() {
            return Err(recipe_offline());
        }
        Ok(self.documents.borrow().active_recipes(owner))
    }

    async fn find_active(
        &self,
        owner: &UserId,
        id: &RecipeId,
    ) -> Result<Option<Recipe>, RecipeRepositoryError> {
        if self.is_offline() {
            return Err(recipe_offline());
        }
        Ok(self
            .documents
            .borrow()
            .recipes
            .get(id)
            .filter(|recipe| recipe.owner_id == *owner && !recipe.deleted)
            .cloned())
    }

    async fn create(&self, recipe: &Recipe) -> Result<(), RecipeRepositoryError> {
        if self.is_offline() {
            return Err(recipe_offline());
        }
        self.mutate(
            |documents| {
                if documents.recipes.contains_key(&recipe.id) {
                    return Err(RecipeRepositoryError::query(format!(
                        "recipe {} already exists",
                        recipe.id
                    )));
                }
                documents.recipes.insert(recipe.id, recipe.clone());
                Ok(())
            },
            not_applied,
        )
    }

    async fn update_contents(
        &self,
        owner: &UserId,
        id: &RecipeId,
        contents: &RecipeContents,
        updated_at: DateTime<Utc>,
    ) -> Result<(), RecipeRepositoryError> {
        if self.is_offline() {
            return Err(recipe_offline());
        }
        self.mutate(
            |documents| {
                let recipe = documents
                    .owned_active_recipe(owner, id)
                    .ok_or_else(|| RecipeRepositoryError::not_found(id.to_string()))?;
                recipe.apply_contents(contents.clone(), updated_at);
                Ok(())
            },
            not_applied,
        )
    }

    async fn soft_delete(&self, owner: &UserId, id: &RecipeId) -> Result<(), RecipeRepositoryError> {
        if self.is_offline() {
            return Err(recipe_offline());
        }
        self.mutate(
            |documents| {
                let recipe = documents
                    .owned_recipe(owner, id)
                    .ok_or_else(|| RecipeRepositoryError::not_found(id.to_string()))?;
                recipe.deleted = true;
                Ok(())
            },
            not_applied,
        )
    }

    async fn increment_usage_counts(
        &self,
        owner: &UserId,
        ids: &[RecipeId],
    ) -> Result<(), RecipeRepositoryError> {
        if self.is_offline() {
            return Err(recipe_offline());
        }
        // Soft-deleted recipes still exist, so they are counted too.
        let targets: BTreeSet<RecipeId> = ids.iter().copied().collect();
        self.mutate(
            |documents| {
                if let Some(missing) = targets
                    .iter()
                    .find(|id| documents.owned_recipe(owner, id).is_none())
                {
                    return Err(RecipeRepositoryError::not_found(missing.to_string()));
                }
                for id in &targets {
                    if let Some(recipe) = documents.owned_recipe(owner, id) {
                        recipe.times_added_to_shopping_list =
                            recipe.times_added_to_shopping_list.saturating_add(1);
                    }
                }
                Ok(())
            },
            not_applied,
        )
    }

    async fn watch_active(
        &self,
        owner: &UserId,
    ) -> Result<LiveQuery<Vec<Recipe>>, RecipeRepositoryError> {
        if self.is_offline() {
            return Err(recipe_offline());
        }
        let owner = owner.clone();
        debug!(owner = %owner, "subscribing to active recipes");
        Ok(self.project(move |documents| documents.active_recipes(&owner)))
    }
}

#[async_trait]
impl CatalogRepository for InMemoryDocumentStore {
    async fn list_active_ingredients(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Ingredient>, CatalogRepositoryError> {
        if self.is_offline() {
            return Err(catalog_offline());
        }
        Ok(self.documents.borrow().active_ingredients(owner))
    }

    async fn create_ingredient(
        &self,
        ingredient: &Ingredient,
    ) -> Result<(), CatalogRepositoryError> {
        if self.is_offline() {
            return Err(catalog_offline());
        }
        self.mutate(
            |documents| {
                if documents.ingredients.contains_key(&ingredient.id) {
                    return Err(CatalogRepositoryError::query(format!(
                        "ingredient {} already exists",
                        ingredient.id
                    )));
                }
                documents
                    .ingredients
                    .insert(ingredient.id, ingredient.clone());
                Ok(())
            },
            || CatalogRepositoryError::query("write was not applied"),
        )
    }

    async fn soft_delete_ingredient(
        &self,
        owner: &UserId,
        id: &IngredientId,
    ) -> Result<(), CatalogRepositoryError> {
        if self.is_offline() {
            return Err(catalog_offline());
        }
        self.documents.send_if_modified(|documents| {
            match documents
                .ingredients
                .get_mut(id)
                .filter(|ingredient| ingredient.owner_id == *owner && !ingredient.deleted)
            {
                Some(ingredient) => {
                    ingredient.deleted = true;
                    true
                }
                None => false,
            }
        });
        Ok(())
    }

    async fn list_units(&self) -> Result<Vec<Unit>, CatalogRepositoryError> {
        if self.is_offline() {
            return Err(catalog_offline());
        }
        Ok(self.documents.borrow().units.clone())
    }

    async fn watch_active_ingredients(
        &self,
        owner: &UserId,
    ) -> Result<LiveQuery<Vec<Ingredient>>, CatalogRepositoryError> {
        if self.is_offline() {
            return Err(catalog_offline());
        }
        let owner = owner.clone();
        debug!(owner = %owner, "subscribing to active ingredients");
        Ok(self.project(move |documents| documents.active_ingredients(&owner)))
    }

    async fn watch_units(&self) -> Result<LiveQuery<Vec<Unit>>, CatalogRepositoryError> {
        if self.is_offline() {
            return Err(catalog_offline());
        }
        Ok(self.project(|documents| documents.units.clone()))
    }
}
