use crate::api::ApiClient;
use crate::config::EnvConfig;
use crate::drafts::DraftStore;
use crate::notify::{show_toast, Toasts};
use crate::query::{load_embedded_state, NotesQueryClient};
use crate::scheduler::{BrowserScheduler, Scheduler};
use crate::storage::default_store;
use leptos::prelude::*;
use std::sync::Arc;

/// App-wide services, provided once through context.
#[derive(Clone)]
pub(crate) struct AppState {
    pub api: ApiClient,
    pub query_client: NotesQueryClient,
    pub drafts: DraftStore,
    pub scheduler: Arc<dyn Scheduler>,

    pub toasts: RwSignal<Toasts>,

    /// Bumped after the notes cache is invalidated so active lists refetch.
    pub notes_generation: RwSignal<u64>,
}

impl AppState {
    pub fn new(cfg: &EnvConfig) -> Self {
        let query_client = NotesQueryClient::default();
        if let Some(state) = load_embedded_state() {
            tracing::debug!(queries = state.queries.len(), "hydrating embedded query state");
            query_client.hydrate(state);
        }

        Self {
            api: ApiClient::from_config(cfg),
            query_client,
            drafts: DraftStore::load(default_store()),
            scheduler: Arc::new(BrowserScheduler),
            toasts: RwSignal::new(Toasts::default()),
            notes_generation: RwSignal::new(0),
        }
    }

    pub fn toast(&self, message: &str) {
        show_toast(self.toasts, self.scheduler.as_ref(), message);
    }

    pub fn notes_invalidated(&self) {
        self.notes_generation.update(|g| *g = g.wrapping_add(1));
    }
}

#[derive(Clone)]
pub(crate) struct AppContext(pub AppState);
