//! Mapping from store port failures to user-facing domain errors.
//!
//! Store failures are logged with their detail here and surfaced with a
//! generic message; callers never retry automatically.

use tracing::error;

use super::DomainError;
use super::ports::{CatalogRepositoryError, RecipeRepositoryError};

pub(crate) fn recipe_store_error(err: RecipeRepositoryError) -> DomainError {
    match err {
        RecipeRepositoryError::Connection { message } => {
            error!(%message, "recipe store unavailable");
            DomainError::service_unavailable("recipe store unavailable, please try again")
        }
        RecipeRepositoryError::Query { message } => {
            error!(%message, "recipe store request failed");
            DomainError::internal("could not save recipe changes")
        }
        RecipeRepositoryError::NotFound { id } => {
            DomainError::not_found(format!("recipe {id} not found"))
        }
    }
}

pub(crate) fn catalog_store_error(err: CatalogRepositoryError) -> DomainError {
    match err {
        CatalogRepositoryError::Connection { message } => {
            error!(%message, "catalog store unavailable");
            DomainError::service_unavailable("ingredient catalog unavailable, please try again")
        }
        CatalogRepositoryError::Query { message } => {
            error!(%message, "catalog store request failed");
            DomainError::internal("could not update the ingredient catalog")
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(RecipeRepositoryError::connection("down"), ErrorCode::ServiceUnavailable)]
    #[case(RecipeRepositoryError::query("quota"), ErrorCode::InternalError)]
    #[case(RecipeRepositoryError::not_found("r1"), ErrorCode::NotFound)]
    fn recipe_errors_map_to_codes(#[case] err: RecipeRepositoryError, #[case] code: ErrorCode) {
        assert_eq!(recipe_store_error(err).code(), code);
    }

    #[rstest]
    fn store_detail_is_not_surfaced() {
        let mapped = catalog_store_error(CatalogRepositoryError::query("permission denied"));
        assert!(!mapped.message().contains("permission denied"));
    }
}
