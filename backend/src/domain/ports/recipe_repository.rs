//! Port for recipe persistence.
//!
//! Single-document writes follow last-write-wins semantics; there is no
//! revision token. The usage-counter bump is the only multi-document write and
//! must be applied atomically by adapters.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Recipe, RecipeContents, RecipeId, UserId};

use super::{LiveQuery, define_port_error};

define_port_error! {
    /// Errors raised by recipe store adapters.
    pub enum RecipeRepositoryError {
        /// Store connection could not be established.
        Connection { message: String } =>
            "recipe store connection failed: {message}",
        /// Read or write failed during execution.
        Query { message: String } =>
            "recipe store query failed: {message}",
        /// The addressed recipe does not exist for this owner.
        NotFound { id: String } =>
            "recipe {id} not found",
    }
}

/// Port for recipe storage, soft deletion, and usage counters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Active (non-deleted) recipes belonging to `owner`.
    async fn list_active(&self, owner: &UserId) -> Result<Vec<Recipe>, RecipeRepositoryError>;

    /// Fetch one active recipe, `None` when missing, deleted, or foreign.
    async fn find_active(
        &self,
        owner: &UserId,
        id: &RecipeId,
    ) -> Result<Option<Recipe>, RecipeRepositoryError>;

    /// Persist a new recipe document as given.
    async fn create(&self, recipe: &Recipe) -> Result<(), RecipeRepositoryError>;

    /// Overwrite a recipe's editable content and `updated_at`.
    ///
    /// `created_at` and the usage counter stay as stored.
    async fn update_contents(
        &self,
        owner: &UserId,
        id: &RecipeId,
        contents: &RecipeContents,
        updated_at: DateTime<Utc>,
    ) -> Result<(), RecipeRepositoryError>;

    /// Mark a recipe deleted without removing the document.
    async fn soft_delete(&self, owner: &UserId, id: &RecipeId) -> Result<(), RecipeRepositoryError>;

    /// Add one to `timesAddedToShoppingList` for every id, all or nothing.
    ///
    /// Soft-deleted recipes are still counted; ids that are unknown or owned
    /// by someone else abort the batch.
    async fn increment_usage_counts(
        &self,
        owner: &UserId,
        ids: &[RecipeId],
    ) -> Result<(), RecipeRepositoryError>;

    /// Live view of `owner`'s active recipes.
    async fn watch_active(
        &self,
        owner: &UserId,
    ) -> Result<LiveQuery<Vec<Recipe>>, RecipeRepositoryError>;
}

/// Fixture implementation for tests where persistence is not under test.
///
/// Lookups return nothing and writes are discarded.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRecipeRepository;

#[async_trait]
impl RecipeRepository for FixtureRecipeRepository {
    async fn list_active(&self, _owner: &UserId) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_active(
        &self,
        _owner: &UserId,
        _id: &RecipeId,
    ) -> Result<Option<Recipe>, RecipeRepositoryError> {
        Ok(None)
    }

    async fn create(&self, _recipe: &Recipe) -> Result<(), RecipeRepositoryError> {
        Ok(())
    }

    async fn update_contents(
        &self,
        _owner: &UserId,
        _id: &RecipeId,
        _contents: &RecipeContents,
        _updated_at: DateTime<Utc>,
    ) -> Result<(), RecipeRepositoryError> {
        Ok(())
    }

    async fn soft_delete(
        &self,
        _owner: &UserId,
        _id: &RecipeId,
    ) -> Result<(), RecipeRepositoryError> {
        Ok(())
    }

    async fn increment_usage_counts(
        &self,
        _owner: &UserId,
        _ids: &[RecipeId],
    ) -> Result<(), RecipeRepositoryError> {
        Ok(())
    }

    async fn watch_active(
        &self,
        _owner: &UserId,
    ) -> Result<LiveQuery<Vec<Recipe>>, RecipeRepositoryError> {
        Ok(LiveQuery::fixed(Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[tokio::test]
    async fn fixture_lookup_returns_none() {
        let repo = FixtureRecipeRepository;
        let found = repo
            .find_active(&UserId::random(), &RecipeId::random())
            .await
            .expect("fixture lookup should succeed");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn fixture_watch_yields_empty_snapshot() {
        let repo = FixtureRecipeRepository;
        let mut live = repo
            .watch_active(&UserId::random())
            .await
            .expect("fixture watch should succeed");
        assert!(live.snapshot().is_empty());
        assert!(live.next().await.is_none());
    }

    #[rstest]
    fn not_found_error_names_the_recipe() {
        let error = RecipeRepositoryError::not_found("abc");
        assert_eq!(error.to_string(), "recipe abc not found");
    }
}
