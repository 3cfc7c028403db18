//! Session controller: wires authenticator pushes and live store queries into
//! [`SessionState`].

use std::future::{Future, pending};
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::domain::ports::{
    Authenticator, AuthenticatorError, CatalogRepository, LiveQuery, RecipeRepository,
};
use crate::domain::{DomainError, Identity, Ingredient, Recipe, RecipeId, Unit, UserId};

use super::state::{SessionEvent, SessionState, Tab};

/// Ports the controller depends on.
#[derive(Clone)]
pub struct SessionPorts {
    pub authenticator: Arc<dyn Authenticator>,
    pub catalog: Arc<dyn CatalogRepository>,
    pub recipes: Arc<dyn RecipeRepository>,
}

#[derive(Default)]
struct Subscriptions {
    owner: Option<UserId>,
    recipes: Option<LiveQuery<Vec<Recipe>>>,
    ingredients: Option<LiveQuery<Vec<Ingredient>>>,
    units: Option<LiveQuery<Vec<Unit>>>,
}

async fn next_snapshot<T: Clone>(query: &mut Option<LiveQuery<T>>) -> Option<T> {
    match query {
        Some(live) => live.next().await,
        None => pending().await,
    }
}

/// Drives [`SessionState`] from authenticator and store pushes.
///
/// Views observe the state through [`SessionController::state`]; user actions
/// come in through the navigation and sign-in methods.
pub struct SessionController {
    ports: SessionPorts,
    state: watch::Sender<SessionState>,
}

impl SessionController {
    /// Signed-out controller over the given ports.
    pub fn new(ports: SessionPorts) -> Self {
        let (state, _) = watch::channel(SessionState::SignedOut);
        Self { ports, state }
    }

    /// Live view of the session state.
    pub fn state(&self) -> LiveQuery<SessionState> {
        LiveQuery::new(self.state.subscribe())
    }

    /// Current state.
    pub fn current(&self) -> SessionState {
        self.state.borrow().clone()
    }

    fn dispatch(&self, event: SessionEvent) {
        self.state.send_if_modified(|state| state.apply(event));
    }

    /// Run the interactive sign-in flow.
    ///
    /// # Errors
    ///
    /// Returns an `Unauthorized` error when the user cancels or the provider
    /// fails; the session stays signed out.
    pub async fn sign_in(&self) -> Result<Identity, DomainError> {
        match self.ports.authenticator.sign_in().await {
            Ok(identity) => {
                info!(user_id = %identity.user_id, "signed in");
                self.dispatch(SessionEvent::IdentityChanged(Some(identity.clone())));
                Ok(identity)
            }
            Err(AuthenticatorError::UserCancelled) => {
                info!("sign-in cancelled");
                Err(DomainError::unauthorized("sign-in was cancelled"))
            }
            Err(err) => {
                warn!(error = %err, "sign-in failed");
                Err(DomainError::unauthorized("sign-in failed, please try again"))
            }
        }
    }

    /// Sign out and reset the session.
    ///
    /// # Errors
    ///
    /// Returns an `Unauthorized` error when the provider rejects the request.
    pub async fn sign_out(&self) -> Result<(), DomainError> {
        self.ports.authenticator.sign_out().await.map_err(|err| {
            warn!(error = %err, "sign-out failed");
            DomainError::unauthorized("sign-out failed, please try again")
        })?;
        info!("signed out");
        self.dispatch(SessionEvent::IdentityChanged(None));
        Ok(())
    }

    pub fn select_tab(&self, tab: Tab) {
        self.dispatch(SessionEvent::TabSelected(tab));
    }

    /// Open the editor on `id` and switch to the editor tab.
    pub fn start_edit(&self, id: RecipeId) {
        self.dispatch(SessionEvent::EditStarted(id));
    }

    /// Leave the editor after a save or a cancel.
    pub fn finish_edit(&self) {
        self.dispatch(SessionEvent::EditFinished);
    }

    /// Process pushes until `shutdown` resolves or the authenticator goes
    /// away. Live queries are dropped, and so unsubscribed, on return.
    pub async fn run_until(&self, shutdown: impl Future<Output = ()>) {
        tokio::pin!(shutdown);
        let mut identities = self.ports.authenticator.identity_changes();
        let mut subscriptions = Subscriptions::default();
        self.on_identity(identities.snapshot(), &mut subscriptions)
            .await;

        loop {
            tokio::select! {
                () = &mut shutdown => break,
                identity = identities.next() => match identity {
                    Some(identity) => self.on_identity(identity, &mut subscriptions).await,
                    None => {
                        debug!("identity stream closed");
                        break;
                    }
                },
                recipes = next_snapshot(&mut subscriptions.recipes) => match recipes {
                    Some(recipes) => self.dispatch(SessionEvent::RecipesSnapshot(recipes)),
                    None => subscriptions.recipes = None,
                },
                ingredients = next_snapshot(&mut subscriptions.ingredients) => match ingredients {
                    Some(ingredients) => {
                        self.dispatch(SessionEvent::IngredientsSnapshot(ingredients));
                    }
                    None => subscriptions.ingredients = None,
                },
                units = next_snapshot(&mut subscriptions.units) => match units {
                    Some(units) => self.dispatch(SessionEvent::UnitsSnapshot(units)),
                    None => subscriptions.units = None,
                },
            }
        }
        debug!("session runtime stopped");
    }

    async fn on_identity(&self, identity: Option<Identity>, subscriptions: &mut Subscriptions) {
        let owner = identity.as_ref().map(|identity| identity.user_id.clone());
        if owner != subscriptions.owner {
            if subscriptions.owner.is_some() {
                debug!("closing live queries");
            }
            *subscriptions = Subscriptions::default();
        }
        self.dispatch(SessionEvent::IdentityChanged(identity));

        let Some(owner) = owner else {
            return;
        };
        if subscriptions.owner.is_none() {
            self.open_subscriptions(&owner, subscriptions).await;
            subscriptions.owner = Some(owner);
        }
    }

    async fn open_subscriptions(&self, owner: &UserId, subscriptions: &mut Subscriptions) {
        match self.ports.recipes.watch_active(owner).await {
            Ok(mut live) => {
                self.dispatch(SessionEvent::RecipesSnapshot(live.snapshot()));
                subscriptions.recipes = Some(live);
            }
            Err(err) => error!(owner = %owner, error = %err, "recipe subscription failed"),
        }
        match self.ports.catalog.watch_active_ingredients(owner).await {
            Ok(mut live) => {
                self.dispatch(SessionEvent::IngredientsSnapshot(live.snapshot()));
                subscriptions.ingredients = Some(live);
            }
            Err(err) => error!(owner = %owner, error = %err, "ingredient subscription failed"),
        }
        match self.ports.catalog.watch_units().await {
            Ok(mut live) => {
                self.dispatch(SessionEvent::UnitsSnapshot(live.snapshot()));
                subscriptions.units = Some(live);
            }
            Err(err) => error!(error = %err, "unit subscription failed"),
        }
        debug!(owner = %owner, "live queries opened");
    }
}
