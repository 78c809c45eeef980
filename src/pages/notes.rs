use crate::components::ui::{Button, Spinner};
use crate::components::{Modal, NoteForm, NoteList, Pagination, SearchBox, Toaster};
use crate::config::SEARCH_DEBOUNCE;
use crate::notify::NO_NOTES_FOUND;
use crate::query::{NotesQueryState, Observed, QueryKey, Settled};
use crate::scheduler::Debouncer;
use crate::state::AppContext;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params_map;

/// Tag filter for a `/notes/filter/*slug` route.
///
/// Only the first segment counts. `All` (any case) or an empty slug means
/// no tag filter.
pub(crate) fn tag_from_slug(slug: &str) -> Option<String> {
    let first = slug.split('/').find(|s| !s.is_empty())?;
    let decoded = urlencoding::decode(first)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| first.to_string());
    let decoded = decoded.trim();

    if decoded.is_empty() || decoded.eq_ignore_ascii_case("all") {
        None
    } else {
        Some(decoded.to_string())
    }
}

/// Search, page and tag the list view has committed to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct NotesFilter {
    pub search: String,
    pub page: u32,
    pub tag: Option<String>,
}

impl Default for NotesFilter {
    fn default() -> Self {
        Self::for_tag(None)
    }
}

impl NotesFilter {
    pub fn for_tag(tag: Option<String>) -> Self {
        Self {
            search: String::new(),
            page: 1,
            tag,
        }
    }

    /// A new search always starts from the first page.
    pub fn commit_search(&mut self, raw: &str) {
        self.search = raw.trim().to_string();
        self.page = 1;
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// Switch to another tag's list, starting from page 1. Returns whether
    /// anything changed.
    pub fn set_tag(&mut self, tag: Option<String>) -> bool {
        if self.tag == tag {
            return false;
        }
        self.tag = tag;
        self.page = 1;
        true
    }

    pub fn key(&self) -> QueryKey {
        QueryKey::notes(self.search.clone(), self.page, self.tag.clone())
    }
}

fn no_notes_notice(empty: bool) -> Option<&'static str> {
    empty.then_some(NO_NOTES_FOUND)
}

/// Route entry: resolves the tag, seeds the cache for the first default key,
/// then renders the list. Later tag changes are fetched by the list itself.
#[component]
pub fn NotesPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let params = use_params_map();
    let tag = Memo::new(move |_| tag_from_slug(&params.with(|p| p.get("slug").unwrap_or_default())));

    let ready: RwSignal<bool> = RwSignal::new(false);
    Effect::new(move |_| {
        if ready.get_untracked() {
            return;
        }
        let key = NotesFilter::for_tag(tag.get_untracked()).key();
        let state = app_state.0.clone();
        if state.query_client.cached(&key).is_some() {
            ready.set(true);
            return;
        }

        spawn_local(async move {
            state.query_client.prefetch(&state.api, &key).await;
            ready.try_set(true);
        });
    });

    view! {
        <Show
            when=move || ready.get()
            fallback=|| view! {
                <div class="flex items-center gap-2 px-4 py-8 text-xs text-muted-foreground">
                    <Spinner />
                    "Loading..."
                </div>
            }
        >
            <NotesClient tag=Signal::derive(move || tag.get()) />
        </Show>
    }
}

/// Searchable, paginated notes list with a create-note modal.
#[component]
pub fn NotesClient(#[prop(into)] tag: Signal<Option<String>>) -> impl IntoView {
    let app_state = expect_context::<AppContext>();

    let filter: RwSignal<NotesFilter> = RwSignal::new(NotesFilter::for_tag(tag.get_untracked()));
    let query_state: RwSignal<NotesQueryState> = RwSignal::new(NotesQueryState::default());
    let modal_open: RwSignal<bool> = RwSignal::new(false);

    let debouncer = Debouncer::new(
        app_state.0.scheduler.clone(),
        SEARCH_DEBOUNCE,
        move |value: String| {
            filter.try_update(|f| f.commit_search(&value));
        },
    );
    let on_search = {
        let debouncer = debouncer.clone();
        Callback::new(move |value: String| debouncer.call(value))
    };
    on_cleanup(move || debouncer.cancel());

    Effect::new(move |_| {
        let current = tag.get();
        filter.maybe_update(|f| f.set_tag(current));
    });

    Effect::new(move |_| {
        let key = filter.with(NotesFilter::key);
        app_state.0.notes_generation.track();

        let state = app_state.0.clone();
        let cached = state.query_client.cached(&key);
        let Some(observed) = query_state.try_update(|s| s.observe(key, cached)) else {
            return;
        };

        match observed {
            Observed::Cached { empty } => {
                if let Some(msg) = no_notes_notice(empty) {
                    state.toast(msg);
                }
            }
            Observed::Fetch(ticket) => {
                spawn_local(async move {
                    let result = state.query_client.fetch(&state.api, &ticket.key).await;
                    let settled = query_state.try_update(|s| s.settle(&ticket, result));
                    if let Some(Settled::Loaded { empty }) = settled {
                        if let Some(msg) = no_notes_notice(empty) {
                            state.toast(msg);
                        }
                    }
                });
            }
        }
    });

    let close_modal = Callback::new(move |_: ()| modal_open.set(false));
    let reset_page = Callback::new(move |_: ()| filter.update(|f| f.set_page(1)));
    let notes = Signal::derive(move || {
        query_state.with(|s| s.data().map(|d| d.notes.clone()).unwrap_or_default())
    });

    view! {
        <div data-name="NotesClient" class="mx-auto flex max-w-5xl flex-col gap-6 px-4 py-8">
            <Toaster />

            <header class="flex flex-wrap items-center justify-between gap-3">
                <SearchBox on_search=on_search />

                <Show when=move || query_state.with(|s| s.total_pages() > 1)>
                    <Pagination
                        page_count=Signal::derive(move || query_state.with(|s| s.total_pages()))
                        current_page=Signal::derive(move || filter.with(|f| f.page))
                        on_page_change=Callback::new(move |p: u32| filter.update(|f| f.set_page(p)))
                    />
                </Show>

                <Button on:click=move |_| modal_open.set(true)>"Create note +"</Button>
            </header>

            <Show when=move || query_state.with(|s| s.is_loading())>
                <div class="flex items-center gap-2 text-xs text-muted-foreground">
                    <Spinner />
                    "Loading..."
                </div>
            </Show>

            <Show when=move || query_state.with(|s| s.is_fetching() && s.data().is_some())>
                <div class="flex items-center gap-2 text-xs text-muted-foreground">
                    <Spinner />
                    "Updating..."
                </div>
            </Show>

            <Show when=move || query_state.with(|s| s.error().is_some())>
                <p class="text-sm text-destructive">"Error loading notes."</p>
            </Show>

            <Show when=move || query_state.with(|s| s.data().is_some())>
                <div class=move || {
                    if query_state.with(|s| s.is_placeholder()) { "opacity-60" } else { "" }
                }>
                    <NoteList notes=notes />
                </div>
            </Show>

            <Show when=move || modal_open.get()>
                <Modal on_close=close_modal title="Create note">
                    <NoteForm on_close=close_modal on_created=reset_page />
                </Modal>
            </Show>
        </div>
    }
}
