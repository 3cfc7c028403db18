//! Domain primitives, aggregates, and services.
//!
//! Purpose: define the recipe, catalog, and shopping list model together with
//! the services that validate and persist it through the ports in
//! [`ports`]. Types document their invariants and serialisation contracts in
//! their own Rustdoc.
//!
//! Public surface:
//! - DomainError / ErrorCode: user-facing failure payload.
//! - UserId / Identity: authenticated owner of every document.
//! - Ingredient / Unit, Recipe / IngredientLine: stored documents.
//! - RecipeDraft + RecipeEditorService: the recipe editor.
//! - consolidate + ShoppingListService: the shopping list generator.
//! - CatalogService: direct catalog maintenance.

pub mod catalog;
mod catalog_service;
pub mod collation;
pub mod error;
pub mod ports;
pub mod quantity;
pub mod recipe;
pub mod recipe_editor;
pub mod shopping_list;
mod store_errors;
pub mod user;

pub use self::catalog::{
    Ingredient, IngredientId, Unit, UnitId, find_active_ingredient, ingredient_options,
};
pub use self::catalog_service::CatalogService;
pub use self::collation::locale_cmp;
pub use self::error::{DomainError, DomainErrorValidationError, ErrorCode};
pub use self::quantity::{Quantity, QuantityParseError};
pub use self::recipe::{
    IngredientLine, Recipe, RecipeContents, RecipeId, RecipeSummary, recipe_summaries,
    sorted_active_recipes,
};
pub use self::recipe_editor::{
    DraftEditError, IngredientChoice, LineDraft, RecipeDraft, RecipeEditorService,
    RecipeValidationError, SavePlan,
};
pub use self::shopping_list::{
    RecipePicker, ShoppingList, ShoppingListItem, ShoppingListService, consolidate,
    resolve_selection,
};
pub use self::user::{Identity, IdentityValidationError, UserId};

