use crate::config::EnvConfig;
use crate::pages::{HomePage, NotFoundPage, NotesPage, ALL_NOTES_PATH};
use crate::state::{AppContext, AppState};
use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn App() -> impl IntoView {
    let cfg = EnvConfig::new();
    tracing::info!(api_url = %cfg.api_url, "starting NoteHub");
    provide_context(AppContext(AppState::new(&cfg)));

    // Router hooks (params, navigate) need the <Router> context.
    view! {
        <Router>
            <Routes fallback=NotFoundPage>
                <Route path=path!("") view=HomePage />
                <Route path=path!("notes") view=|| view! { <Redirect path=ALL_NOTES_PATH /> } />
                <Route path=path!("notes/filter/*slug") view=NotesPage />
            </Routes>
        </Router>
    }
}
