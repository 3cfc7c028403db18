//! Driving port for maintaining the ingredient catalog directly, outside the
//! recipe editor.

use async_trait::async_trait;

use crate::domain::{DomainError, Ingredient, IngredientId, Unit, UserId};

/// Result of adding a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddIngredientResponse {
    /// The new entry, or the existing one the name matched.
    pub ingredient: Ingredient,
    /// `false` when an active entry already matched ignoring case.
    pub created: bool,
}

/// Driving port for catalog maintenance and editor options.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogCommand: Send + Sync {
    /// Add an ingredient unless an active one already matches ignoring case.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidRequest` error for a blank name.
    async fn add_ingredient(
        &self,
        owner: &UserId,
        name: &str,
    ) -> Result<AddIngredientResponse, DomainError>;

    /// Soft-delete an ingredient. Recipes already naming it are unaffected.
    async fn remove_ingredient(&self, owner: &UserId, id: &IngredientId) -> Result<(), DomainError>;

    /// Active ingredients sorted by name.
    async fn ingredient_options(&self, owner: &UserId) -> Result<Vec<Ingredient>, DomainError>;

    /// Unit labels sorted by name.
    async fn units(&self) -> Result<Vec<Unit>, DomainError>;
}

/// Fixture implementation backed by nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCatalogCommand;

#[async_trait]
impl CatalogCommand for FixtureCatalogCommand {
    async fn add_ingredient(
        &self,
        owner: &UserId,
        name: &str,
    ) -> Result<AddIngredientResponse, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::validation("name", "ingredient name must not be blank"));
        }
        Ok(AddIngredientResponse {
            ingredient: Ingredient::new(owner.clone(), name, chrono::Utc::now()),
            created: true,
        })
    }

    async fn remove_ingredient(
        &self,
        _owner: &UserId,
        _id: &IngredientId,
    ) -> Result<(), DomainError> {
        Ok(())
    }

    async fn ingredient_options(&self, _owner: &UserId) -> Result<Vec<Ingredient>, DomainError> {
        Ok(Vec::new())
    }

    async fn units(&self) -> Result<Vec<Unit>, DomainError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", false)]
    #[case("   ", false)]
    #[case("Cumin", true)]
    #[tokio::test]
    async fn fixture_add_requires_a_name(#[case] name: &str, #[case] accepted: bool) {
        let result = FixtureCatalogCommand
            .add_ingredient(&UserId::random(), name)
            .await;
        assert_eq!(result.is_ok(), accepted);
    }
}
