//! Catalog maintenance service implementing [`CatalogCommand`].

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{AddIngredientResponse, CatalogCommand, CatalogRepository};
use crate::domain::store_errors::catalog_store_error;
use crate::domain::{
    DomainError, Ingredient, IngredientId, Unit, UserId, find_active_ingredient, ingredient_options,
};

use super::collation::sort_by_name;

/// Adds, removes, and lists catalog entries for one store.
#[derive(Clone)]
pub struct CatalogService<C> {
    catalog: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<C> CatalogService<C> {
    /// Create a new service over the catalog store.
    pub fn new(catalog: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self { catalog, clock }
    }
}

#[async_trait]
impl<C> CatalogCommand for CatalogService<C>
where
    C: CatalogRepository,
{
    async fn add_ingredient(
        &self,
        owner: &UserId,
        name: &str,
    ) -> Result<AddIngredientResponse, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::validation("name", "ingredient name must not be blank"));
        }
        let loaded = self
            .catalog
            .list_active_ingredients(owner)
            .await
            .map_err(catalog_store_error)?;
        if let Some(existing) = find_active_ingredient(&loaded, name) {
            return Ok(AddIngredientResponse {
                ingredient: existing.clone(),
                created: false,
            });
        }

        let ingredient = Ingredient::new(owner.clone(), name, self.clock.utc());
        self.catalog
            .create_ingredient(&ingredient)
            .await
            .map_err(catalog_store_error)?;
        info!(owner = %owner, ingredient_id = %ingredient.id, "ingredient added");
        Ok(AddIngredientResponse {
            ingredient,
            created: true,
        })
    }

    async fn remove_ingredient(
        &self,
        owner: &UserId,
        id: &IngredientId,
    ) -> Result<(), DomainError> {
        self.catalog
            .soft_delete_ingredient(owner, id)
            .await
            .map_err(catalog_store_error)
    }

    async fn ingredient_options(&self, owner: &UserId) -> Result<Vec<Ingredient>, DomainError> {
        let loaded = self
            .catalog
            .list_active_ingredients(owner)
            .await
            .map_err(catalog_store_error)?;
        Ok(ingredient_options(&loaded))
    }

    async fn units(&self) -> Result<Vec<Unit>, DomainError> {
        let mut units = self
            .catalog
            .list_units()
            .await
            .map_err(catalog_store_error)?;
        sort_by_name(&mut units, |unit| unit.name.as_str());
        Ok(units)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{CatalogRepositoryError, MockCatalogRepository};
    use mockable::DefaultClock;
    use rstest::{fixture, rstest};

    fn make_service(repo: MockCatalogRepository) -> CatalogService<MockCatalogRepository> {
        CatalogService::new(Arc::new(repo), Arc::new(DefaultClock))
    }

    #[fixture]
    fn owner() -> UserId {
        UserId::random()
    }

    #[rstest]
    #[tokio::test]
    async fn add_reuses_case_insensitive_match(owner: UserId) {
        let existing = Ingredient::new(owner.clone(), "paprika", chrono::Utc::now());
        let existing_id = existing.id;
        let mut repo = MockCatalogRepository::new();
        repo.expect_list_active_ingredients()
            .times(1)
            .return_once(move |_| Ok(vec![existing]));
        repo.expect_create_ingredient().times(0);

        let response = make_service(repo)
            .add_ingredient(&owner, "Paprika")
            .await
            .expect("add succeeds");
        assert!(!response.created);
        assert_eq!(response.ingredient.id, existing_id);
    }

    #[rstest]
    #[tokio::test]
    async fn add_creates_trimmed_entry(owner: UserId) {
        let mut repo = MockCatalogRepository::new();
        repo.expect_list_active_ingredients()
            .times(1)
            .return_once(|_| Ok(Vec::new()));
        repo.expect_create_ingredient()
            .withf(|ingredient: &Ingredient| ingredient.name == "Za'atar")
            .times(1)
            .return_once(|_| Ok(()));

        let response = make_service(repo)
            .add_ingredient(&owner, " Za'atar ")
            .await
            .expect("add succeeds");
        assert!(response.created);
        assert_eq!(response.ingredient.owner_id, owner);
    }

    #[rstest]
    #[tokio::test]
    async fn blank_name_skips_the_store(owner: UserId) {
        let mut repo = MockCatalogRepository::new();
        repo.expect_list_active_ingredients().times(0);
        repo.expect_create_ingredient().times(0);

        let error = make_service(repo)
            .add_ingredient(&owner, "  ")
            .await
            .expect_err("blank name");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    #[tokio::test]
    async fn units_are_sorted() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_list_units()
            .times(1)
            .return_once(|| Ok(vec![Unit::new("tsp"), Unit::new("cups"), Unit::new("g")]));

        let units = make_service(repo).units().await.expect("units load");
        let names: Vec<&str> = units.iter().map(|unit| unit.name.as_str()).collect();
        assert_eq!(names, vec!["cups", "g", "tsp"]);
    }

    #[rstest]
    #[tokio::test]
    async fn store_failure_is_generic(owner: UserId) {
        let mut repo = MockCatalogRepository::new();
        repo.expect_list_active_ingredients()
            .times(1)
            .return_once(|_| Err(CatalogRepositoryError::connection("dns failure")));

        let error = make_service(repo)
            .ingredient_options(&owner)
            .await
            .expect_err("store offline");
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }
}
