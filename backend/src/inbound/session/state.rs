//! Session view state as an event-driven state machine.
//!
//! The state holds the latest snapshot of each live collection. Push events
//! replace a snapshot wholesale; everything the views show is derived from the
//! current snapshots.

use serde::Serialize;

use crate::domain::{
    Identity, Ingredient, Recipe, RecipeId, RecipeSummary, Unit, ingredient_options,
    recipe_summaries,
};
use crate::domain::collation::sort_by_name;

/// Top-level navigation tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Tab {
    #[default]
    AddRecipe,
    AllRecipes,
    ShoppingList,
}

impl Tab {
    /// Label shown on the tab. The editor tab is renamed while editing.
    pub fn label(self, editing: bool) -> &'static str {
        match self {
            Self::AddRecipe if editing => "Edit Recipe",
            Self::AddRecipe => "Add Recipe",
            Self::AllRecipes => "See All Recipes",
            Self::ShoppingList => "Shopping List",
        }
    }
}

/// Everything shown to a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedInView {
    pub identity: Identity,
    pub recipes: Vec<Recipe>,
    pub ingredients: Vec<Ingredient>,
    pub units: Vec<Unit>,
    pub tab: Tab,
    pub editing: Option<RecipeId>,
}

impl SignedInView {
    fn new(identity: Identity) -> Self {
        Self {
            identity,
            recipes: Vec::new(),
            ingredients: Vec::new(),
            units: Vec::new(),
            tab: Tab::default(),
            editing: None,
        }
    }

    /// Recipe list rows, sorted by name.
    pub fn recipe_list(&self) -> Vec<RecipeSummary> {
        recipe_summaries(&self.recipes)
    }

    /// Catalog options for the editor, sorted by name.
    pub fn ingredient_options(&self) -> Vec<Ingredient> {
        ingredient_options(&self.ingredients)
    }

    /// Unit labels for the editor, sorted by name.
    pub fn unit_names(&self) -> Vec<String> {
        let mut units = self.units.clone();
        sort_by_name(&mut units, |unit| unit.name.as_str());
        units.into_iter().map(|unit| unit.name).collect()
    }

    /// Recipe currently being edited, if it is still in the snapshot.
    pub fn editing_recipe(&self) -> Option<&Recipe> {
        let id = self.editing?;
        self.recipes.iter().find(|recipe| recipe.id == id)
    }

    /// Label of the active tab.
    pub fn tab_label(&self) -> &'static str {
        self.tab.label(self.editing.is_some())
    }
}

/// Signed out, or signed in with the latest snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    SignedOut,
    SignedIn(SignedInView),
}

/// Inputs that move the session between states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Identity pushed by the authenticator.
    IdentityChanged(Option<Identity>),
    RecipesSnapshot(Vec<Recipe>),
    IngredientsSnapshot(Vec<Ingredient>),
    UnitsSnapshot(Vec<Unit>),
    TabSelected(Tab),
    /// Open the editor on a stored recipe.
    EditStarted(RecipeId),
    /// Leave the editor, whether the edit was saved or cancelled.
    EditFinished,
}

impl SessionState {
    /// Signed-in view, if any.
    pub fn view(&self) -> Option<&SignedInView> {
        match self {
            Self::SignedIn(view) => Some(view),
            Self::SignedOut => None,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self, Self::SignedIn(_))
    }

    /// Apply one event, returning whether the state changed.
    ///
    /// Snapshot and navigation events are ignored while signed out. A change
    /// to a different user starts from a fresh view.
    pub fn apply(&mut self, event: SessionEvent) -> bool {
        let before = self.clone();
        match event {
            SessionEvent::IdentityChanged(None) => *self = Self::SignedOut,
            SessionEvent::IdentityChanged(Some(identity)) => match self {
                Self::SignedIn(view) if view.identity.user_id == identity.user_id => {
                    view.identity = identity;
                }
                _ => *self = Self::SignedIn(SignedInView::new(identity)),
            },
            event => {
                if let Self::SignedIn(view) = self {
                    apply_to_view(view, event);
                }
            }
        }
        *self != before
    }
}

fn apply_to_view(view: &mut SignedInView, event: SessionEvent) {
    match event {
        SessionEvent::RecipesSnapshot(recipes) => {
            view.recipes = recipes;
            if view.editing_recipe().is_none() {
                view.editing = None;
            }
        }
        SessionEvent::IngredientsSnapshot(ingredients) => view.ingredients = ingredients,
        SessionEvent::UnitsSnapshot(units) => view.units = units,
        SessionEvent::TabSelected(tab) => view.tab = tab,
        SessionEvent::EditStarted(id) => {
            if view.recipes.iter().any(|recipe| recipe.id == id) {
                view.editing = Some(id);
                view.tab = Tab::AddRecipe;
            }
        }
        SessionEvent::EditFinished => view.editing = None,
        SessionEvent::IdentityChanged(_) => {}
    }
}
