use std::sync::Arc;

use boxcraft_client::guard::RoleSource;
use boxcraft_client::{
    ApiClient, ClientConfig, GuardDecision, KeyValueStore, Navigator, RouteGuard, Session,
    SessionContext, SessionStore,
};
use boxcraft_types::Role;
use leptos::prelude::*;

/// Session state shared through Leptos context. The signals mirror the
/// [`SessionContext`] so views re-render on login, logout and 401s.
#[derive(Clone)]
pub struct AuthState {
    pub sessions: SessionStore,
    pub session: RwSignal<Session>,
    pub loading: RwSignal<bool>,
}

impl AuthState {
    pub fn api(&self) -> ApiClient {
        self.sessions.api().clone()
    }

    pub fn role(&self) -> Option<Role> {
        self.session.with(|s| s.role())
    }

    pub fn decide(&self, guard: RouteGuard) -> GuardDecision {
        guard.decide(self)
    }
}

// Reactive view of the session for the route guard.
impl RoleSource for AuthState {
    fn is_loading(&self) -> bool {
        self.loading.get()
    }

    fn authenticated_role(&self) -> Option<Role> {
        self.role()
    }
}

#[cfg(feature = "hydrate")]
fn adapters() -> (Arc<dyn KeyValueStore>, Arc<dyn Navigator>) {
    use crate::browser::{LocalStorage, LocationNavigator};
    (Arc::new(LocalStorage), Arc::new(LocationNavigator))
}

// No storage on the server: the session stays in the loading state until
// the browser restores it.
#[cfg(not(feature = "hydrate"))]
fn adapters() -> (Arc<dyn KeyValueStore>, Arc<dyn Navigator>) {
    use boxcraft_client::navigate::RecordingNavigator;
    use boxcraft_client::storage::MemoryStore;
    (Arc::new(MemoryStore::new()), Arc::new(RecordingNavigator::new()))
}

#[component]
pub fn SessionProvider(children: Children) -> impl IntoView {
    let (storage, navigator) = adapters();
    let context = SessionContext::new(storage);
    let api = ApiClient::new(ClientConfig::from_env(), context.clone(), navigator);

    let session = RwSignal::new(Session::default());
    let loading = RwSignal::new(true);
    context.subscribe(move |current| {
        session.set(current.clone());
        loading.set(false);
    });

    let state = AuthState {
        sessions: SessionStore::new(api),
        session,
        loading,
    };
    provide_context(state.clone());

    // Effects only run in the browser, after hydration.
    Effect::new(move |_| {
        state.sessions.context().restore();
    });

    children()
}

pub fn use_auth() -> AuthState {
    expect_context::<AuthState>()
}
