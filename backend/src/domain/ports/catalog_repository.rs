//! Port for the ingredient and unit catalog.
//!
//! The store holds per-owner ingredients and the global unit list. It does not
//! enforce name uniqueness; duplicate suppression happens in the domain before
//! `create_ingredient` is called, so two sessions racing can still produce
//! near-identical entries.

use async_trait::async_trait;

use crate::domain::{Ingredient, IngredientId, Unit, UserId};

use super::{LiveQuery, define_port_error};

define_port_error! {
    /// Errors raised by catalog store adapters.
    pub enum CatalogRepositoryError {
        /// Store connection could not be established.
        Connection { message: String } =>
            "catalog store connection failed: {message}",
        /// Read or write failed during execution.
        Query { message: String } =>
            "catalog store query failed: {message}",
    }
}

/// Port for catalog storage and live listing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Active (non-deleted) ingredients belonging to `owner`.
    async fn list_active_ingredients(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Ingredient>, CatalogRepositoryError>;

    /// Persist a new ingredient document as given.
    async fn create_ingredient(
        &self,
        ingredient: &Ingredient,
    ) -> Result<(), CatalogRepositoryError>;

    /// Mark an ingredient deleted. Unknown or foreign ids are a no-op.
    async fn soft_delete_ingredient(
        &self,
        owner: &UserId,
        id: &IngredientId,
    ) -> Result<(), CatalogRepositoryError>;

    /// Every unit in the global reference list.
    async fn list_units(&self) -> Result<Vec<Unit>, CatalogRepositoryError>;

    /// Live view of `owner`'s active ingredients.
    async fn watch_active_ingredients(
        &self,
        owner: &UserId,
    ) -> Result<LiveQuery<Vec<Ingredient>>, CatalogRepositoryError>;

    /// Live view of the unit list.
    async fn watch_units(&self) -> Result<LiveQuery<Vec<Unit>>, CatalogRepositoryError>;
}

/// Fixture implementation for tests where catalog behaviour is not under test.
///
/// Lookups return empty lists and writes are discarded.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCatalogRepository;

#[async_trait]
impl CatalogRepository for FixtureCatalogRepository {
    async fn list_active_ingredients(
        &self,
        _owner: &UserId,
    ) -> Result<Vec<Ingredient>, CatalogRepositoryError> {
        Ok(Vec::new())
    }

    async fn create_ingredient(
        &self,
        _ingredient: &Ingredient,
    ) -> Result<(), CatalogRepositoryError> {
        Ok(())
    }

    async fn soft_delete_ingredient(
        &self,
        _owner: &UserId,
        _id: &IngredientId,
    ) -> Result<(), CatalogRepositoryError> {
        Ok(())
    }

    async fn list_units(&self) -> Result<Vec<Unit>, CatalogRepositoryError> {
        Ok(Vec::new())
    }

    async fn watch_active_ingredients(
        &self,
        _owner: &UserId,
    ) -> Result<LiveQuery<Vec<Ingredient>>, CatalogRepositoryError> {
        Ok(LiveQuery::fixed(Vec::new()))
    }

    async fn watch_units(&self) -> Result<LiveQuery<Vec<Unit>>, CatalogRepositoryError> {
        Ok(LiveQuery::fixed(Vec::new()))
    }
}
