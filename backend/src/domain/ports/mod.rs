//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`CatalogRepository`, `RecipeRepository`, `Authenticator`)
//! describe the external document store and identity provider. Driving ports
//! (`RecipeEditorCommand`, `ShoppingListCommand`, `CatalogCommand`) are what
//! inbound adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod authenticator;
mod catalog_command;
mod catalog_repository;
mod live_query;
mod recipe_editor_command;
mod recipe_repository;
mod shopping_list_command;

#[cfg(test)]
pub use authenticator::MockAuthenticator;
pub use authenticator::{Authenticator, AuthenticatorError, FixtureAuthenticator};
#[cfg(test)]
pub use catalog_command::MockCatalogCommand;
pub use catalog_command::{AddIngredientResponse, CatalogCommand, FixtureCatalogCommand};
#[cfg(test)]
pub use catalog_repository::MockCatalogRepository;
pub use catalog_repository::{
    CatalogRepository, CatalogRepositoryError, FixtureCatalogRepository,
};
pub use live_query::LiveQuery;
#[cfg(test)]
pub use recipe_editor_command::MockRecipeEditorCommand;
pub use recipe_editor_command::{
    FixtureRecipeEditorCommand, RecipeEditorCommand, SaveOutcome, SaveRecipeRequest,
    SaveRecipeResponse,
};
#[cfg(test)]
pub use recipe_repository::MockRecipeRepository;
pub use recipe_repository::{FixtureRecipeRepository, RecipeRepository, RecipeRepositoryError};
#[cfg(test)]
pub use shopping_list_command::MockShoppingListCommand;
pub use shopping_list_command::{
    FixtureShoppingListCommand, GenerateShoppingListRequest, GenerateShoppingListResponse,
    ShoppingListCommand,
};
