//! Composition root: wires the in-memory adapters, domain services, and
//! session controller from settings.

use std::sync::Arc;

use mockable::Clock;
use tracing::info;

use crate::domain::ports::{CatalogCommand, RecipeEditorCommand, ShoppingListCommand};
use crate::domain::{CatalogService, RecipeEditorService, ShoppingListService};
use crate::inbound::session::{SessionController, SessionPorts};
use crate::outbound::auth::InMemoryAuthenticator;
use crate::outbound::memory::InMemoryDocumentStore;
use crate::settings::RecipeCompanionSettings;

/// Ports handed to the views.
#[derive(Clone)]
pub struct RecipeCompanion {
    /// Document store shared by every service.
    pub store: Arc<InMemoryDocumentStore>,
    /// Identity provider driving the session.
    pub authenticator: Arc<InMemoryAuthenticator>,
    pub editor: Arc<dyn RecipeEditorCommand>,
    pub shopping_list: Arc<dyn ShoppingListCommand>,
    pub catalog: Arc<dyn CatalogCommand>,
    pub session: Arc<SessionController>,
    /// Decimal places for rendering shopping-list quantities.
    pub quantity_scale: u32,
}

impl RecipeCompanion {
    /// Build every component from `settings`, stamping writes with `clock`.
    pub fn build(settings: &RecipeCompanionSettings, clock: Arc<dyn Clock>) -> Self {
        let store = Arc::new(InMemoryDocumentStore::with_unit_names(
            settings.unit_names(),
        ));
        let authenticator = Arc::new(InMemoryAuthenticator::new());

        let editor = Arc::new(RecipeEditorService::new(
            store.clone(),
            store.clone(),
            clock.clone(),
        ));
        let shopping_list = Arc::new(ShoppingListService::new(store.clone()));
        let catalog = Arc::new(CatalogService::new(store.clone(), clock));
        let session = Arc::new(SessionController::new(SessionPorts {
            authenticator: authenticator.clone(),
            catalog: store.clone(),
            recipes: store.clone(),
        }));

        info!(units = store.unit_count(), "recipe companion ready");
        Self {
            store,
            authenticator,
            editor,
            shopping_list,
            catalog,
            session,
            quantity_scale: settings.quantity_scale(),
        }
    }
}

#[cfg(test)]
mod tests {
    //! End-to-end wiring through the composition root.

    use super::*;
    use std::time::Duration;

    use mockable::DefaultClock;
    use rstest::{fixture, rstest};
    use tokio::time::timeout;

    use crate::domain::ports::{GenerateShoppingListRequest, RecipeRepository, SaveRecipeRequest};
    use crate::domain::{Identity, RecipeDraft, UserId};

    #[fixture]
    fn app() -> RecipeCompanion {
        let settings = RecipeCompanionSettings {
            log_json: false,
            units: Some("cups,g".to_owned()),
            quantity_scale: Some(1),
        };
        RecipeCompanion::build(&settings, Arc::new(DefaultClock))
    }

    #[rstest]
    #[tokio::test]
    async fn saved_recipes_feed_the_shopping_list(app: RecipeCompanion) {
        let owner = UserId::random();
        let mut draft = RecipeDraft::new();
        draft.set_name("Rice bowl");
        let line = draft.add_line();
        draft.rename_new_ingredient(line, "Rice").expect("line exists");
        draft.set_quantity(line, "1.5").expect("numeric quantity");
        draft.set_unit(line, "cups").expect("line exists");

        let saved = app
            .editor
            .save_recipe(SaveRecipeRequest {
                owner: owner.clone(),
                draft,
                catalog: Vec::new(),
            })
            .await
            .expect("save succeeds");
        assert_eq!(saved.created_ingredients.len(), 1);

        let recipes = app.store.list_active(&owner).await.expect("list succeeds");
        let mut live = app.store.watch_active(&owner).await.expect("watch succeeds");
        let generated = app
            .shopping_list
            .generate(GenerateShoppingListRequest {
                owner,
                recipes,
                selected: vec![saved.recipe_id],
            })
            .await
            .expect("generate succeeds");
        assert_eq!(
            generated.list.display_lines(app.quantity_scale),
            vec!["Rice 1.5 cups".to_owned()]
        );

        let counted = timeout(
            Duration::from_secs(2),
            live.wait_for(|recipes| {
                recipes
                    .iter()
                    .any(|recipe| recipe.times_added_to_shopping_list == 1)
            }),
        )
        .await
        .expect("usage recorded before timeout")
        .expect("store alive");
        assert_eq!(counted.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn session_sees_configured_units(app: RecipeCompanion) {
        app.authenticator
            .queue_sign_in(Ok(Identity::new(UserId::random())));
        app.session.sign_in().await.expect("sign in");

        let mut states = app.session.state();
        let runner = app.session.clone();
        let (stop, stopped) = tokio::sync::oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            runner
                .run_until(async {
                    let _ = stopped.await;
                })
                .await;
        });

        let state = timeout(
            Duration::from_secs(2),
            states.wait_for(|state| state.view().is_some_and(|view| view.units.len() == 2)),
        )
        .await
        .expect("units arrive before timeout")
        .expect("controller alive");
        let units = state.view().map(|view| view.unit_names());
        assert_eq!(units, Some(vec!["cups".to_owned(), "g".to_owned()]));

        let _ = stop.send(());
        task.await.expect("runtime joins");
    }
}
