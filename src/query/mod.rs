mod state;

pub(crate) use state::{NotesQueryState, Observed, Settled};

use crate::api::{ApiResult, NotesApi};
use crate::config::{NOTES_NAMESPACE, NOTES_PER_PAGE, QUERY_RETRY_COUNT};
use crate::models::{FetchNotesParams, FetchNotesResponse};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Structured cache key: `(namespace, search, page, tag)`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct QueryKey {
    pub namespace: String,
    pub search: String,
    pub page: u32,
    pub tag: Option<String>,
}

impl QueryKey {
    pub fn notes(search: impl Into<String>, page: u32, tag: Option<String>) -> Self {
        Self {
            namespace: NOTES_NAMESPACE.to_string(),
            search: search.into(),
            page: page.max(1),
            tag,
        }
    }

    /// Request parameters for this key. An empty search is omitted.
    pub fn to_params(&self) -> FetchNotesParams {
        FetchNotesParams {
            search: Some(self.search.clone()).filter(|s| !s.is_empty()),
            page: self.page,
            per_page: NOTES_PER_PAGE,
            tag: self.tag.clone(),
        }
    }
}

#[derive(Clone, Debug)]
struct CacheEntry {
    data: FetchNotesResponse,
    stale: bool,
}

/// Query results by key, with staleness marks.
#[derive(Clone, Debug, Default)]
pub(crate) struct QueryCache {
    entries: HashMap<QueryKey, CacheEntry>,
    /// Bumped by every invalidation.
    generation: u64,
}

impl QueryCache {
    /// Data that has not been invalidated since it was stored.
    pub fn get_fresh(&self, key: &QueryKey) -> Option<&FetchNotesResponse> {
        self.entries
            .get(key)
            .filter(|e| !e.stale)
            .map(|e| &e.data)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn insert(&mut self, key: QueryKey, data: FetchNotesResponse) {
        self.entries.insert(key, CacheEntry { data, stale: false });
    }

    /// Store a result fetched while the cache was at `generation`. If an
    /// invalidation happened since, the entry is stored already stale.
    pub fn insert_fetched(&mut self, key: QueryKey, data: FetchNotesResponse, generation: u64) {
        let stale = generation != self.generation;
        self.entries.insert(key, CacheEntry { data, stale });
    }

    /// Mark every entry whose key matches as stale. Returns how many matched.
    pub fn invalidate_where(&mut self, pred: impl Fn(&QueryKey) -> bool) -> usize {
        self.generation += 1;
        let mut n = 0;
        for (key, entry) in self.entries.iter_mut() {
            if pred(key) {
                entry.stale = true;
                n += 1;
            }
        }
        n
    }

    pub fn invalidate_namespace(&mut self, namespace: &str) -> usize {
        self.invalidate_where(|k| k.namespace == namespace)
    }

    /// Seed the cache with precomputed results. Existing fresh entries win.
    pub fn hydrate(&mut self, state: DehydratedState) {
        for q in state.queries {
            if self.get_fresh(&q.key).is_none() {
                self.insert(q.key, q.data);
            }
        }
    }
}

#[cfg(test)]
impl QueryCache {
    pub fn get(&self, key: &QueryKey) -> Option<&FetchNotesResponse> {
        self.entries.get(key).map(|e| &e.data)
    }

    pub fn is_stale(&self, key: &QueryKey) -> Option<bool> {
        self.entries.get(key).map(|e| e.stale)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Snapshot of fresh entries, as a host page would embed it.
    pub fn dehydrate(&self) -> DehydratedState {
        let mut queries: Vec<DehydratedQuery> = self
            .entries
            .iter()
            .filter(|(_, e)| !e.stale)
            .map(|(key, e)| DehydratedQuery {
                key: key.clone(),
                data: e.data.clone(),
            })
            .collect();
        queries.sort_by(|a, b| {
            (&a.key.search, a.key.page, &a.key.tag).cmp(&(&b.key.search, b.key.page, &b.key.tag))
        });
        DehydratedState { queries }
    }
}

/// Serializable snapshot of fresh cache entries.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct DehydratedState {
    pub queries: Vec<DehydratedQuery>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct DehydratedQuery {
    pub key: QueryKey,
    pub data: FetchNotesResponse,
}

/// Shared handle to the notes query cache.
#[derive(Clone, Default)]
pub(crate) struct NotesQueryClient {
    cache: Arc<Mutex<QueryCache>>,
}

impl NotesQueryClient {
    pub fn cached(&self, key: &QueryKey) -> Option<FetchNotesResponse> {
        self.cache.lock().ok()?.get_fresh(key).cloned()
    }

    /// Fetch `key` from the API and store the result under exactly that key.
    ///
    /// Transport failures are retried up to [`QUERY_RETRY_COUNT`] times.
    /// An invalidation that lands while the request is in flight leaves the
    /// result stored as stale.
    pub async fn fetch<A: NotesApi>(&self, api: &A, key: &QueryKey) -> ApiResult<FetchNotesResponse> {
        let params = key.to_params();
        let generation = self.cache.lock().map(|c| c.generation()).unwrap_or_default();
        let mut attempt = 0;

        let data = loop {
            tracing::debug!(?key, attempt, "fetching notes");
            match api.fetch_notes(&params).await {
                Ok(data) => break data,
                Err(e) if e.is_retryable() && attempt < QUERY_RETRY_COUNT => {
                    attempt += 1;
                    tracing::warn!(error = %e, attempt, "notes fetch failed; retrying");
                }
                Err(e) => {
                    tracing::warn!(error = %e, ?key, "notes fetch failed");
                    return Err(e);
                }
            }
        };

        if let Ok(mut cache) = self.cache.lock() {
            cache.insert_fetched(key.clone(), data.clone(), generation);
        }
        tracing::debug!(?key, notes = data.notes.len(), total_pages = data.total_pages, "notes fetched");
        Ok(data)
    }

    /// Fill the cache ahead of rendering. Failures are left for the view's
    /// own fetch to surface.
    pub async fn prefetch<A: NotesApi>(&self, api: &A, key: &QueryKey) {
        if self.cached(key).is_some() {
            return;
        }
        if let Err(e) = self.fetch(api, key).await {
            tracing::info!(error = %e, "prefetch failed");
        }
    }

    pub fn invalidate_namespace(&self, namespace: &str) -> usize {
        let n = self
            .cache
            .lock()
            .map(|mut c| c.invalidate_namespace(namespace))
            .unwrap_or(0);
        tracing::debug!(namespace, invalidated = n, "cache invalidated");
        n
    }

    pub fn hydrate(&self, state: DehydratedState) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.hydrate(state);
        }
    }

}

#[cfg(test)]
impl NotesQueryClient {
    pub fn with_cache<R>(&self, f: impl FnOnce(&QueryCache) -> R) -> Option<R> {
        self.cache.lock().ok().map(|c| f(&c))
    }
}

/// Read a dehydrated cache the host page embedded as `window.__NOTES_STATE__`.
pub(crate) fn load_embedded_state() -> Option<DehydratedState> {
    if !cfg!(target_arch = "wasm32") {
        return None;
    }
    let value = web_sys::window()?.get(crate::config::DEHYDRATED_STATE_GLOBAL)?;
    let json = js_sys::JSON::stringify(&value).ok()?.as_string()?;
    match serde_json::from_str(&json) {
        Ok(state) => Some(state),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring malformed embedded query state");
            None
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::api::{ApiError, ApiResult, NotesApi};
    use crate::models::{FetchNotesParams, FetchNotesResponse, Note, NoteFormValues, NoteTag};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    pub(crate) fn note(id: &str, title: &str) -> Note {
        Note {
            id: id.to_string(),
            title: title.to_string(),
            content: String::new(),
            tag: NoteTag::Todo,
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: None,
        }
    }

    pub(crate) fn page_of(titles: &[&str], total_pages: u32) -> FetchNotesResponse {
        FetchNotesResponse {
            notes: titles
                .iter()
                .enumerate()
                .map(|(i, t)| note(&format!("n{i}"), t))
                .collect(),
            total_pages,
        }
    }

    /// Scripted API: queued results are returned in order, then an empty page.
    #[derive(Default)]
    pub(crate) struct FakeApi {
        pub fetches: Mutex<Vec<FetchNotesParams>>,
        pub fetch_results: Mutex<VecDeque<ApiResult<FetchNotesResponse>>>,
        pub creates: Mutex<Vec<NoteFormValues>>,
        pub create_error: Mutex<Option<ApiError>>,
        /// Runs once while the next fetch is in flight.
        pub during_fetch: Mutex<Option<Box<dyn FnOnce() + Send>>>,
    }

    impl FakeApi {
        pub fn push_fetch(&self, r: ApiResult<FetchNotesResponse>) {
            self.fetch_results.lock().expect("lock").push_back(r);
        }

        pub fn fetch_count(&self) -> usize {
            self.fetches.lock().expect("lock").len()
        }

        pub fn create_count(&self) -> usize {
            self.creates.lock().expect("lock").len()
        }
    }

    impl NotesApi for FakeApi {
        async fn fetch_notes(&self, params: &FetchNotesParams) -> ApiResult<FetchNotesResponse> {
            self.fetches.lock().expect("lock").push(params.clone());
            let during = self.during_fetch.lock().expect("lock").take();
            if let Some(f) = during {
                f();
            }
            self.fetch_results
                .lock()
                .expect("lock")
                .pop_front()
                .unwrap_or_else(|| Ok(FetchNotesResponse::default()))
        }

        async fn create_note(&self, values: &NoteFormValues) -> ApiResult<Note> {
            self.creates.lock().expect("lock").push(values.clone());
            if let Some(e) = self.create_error.lock().expect("lock").clone() {
                return Err(e);
            }
            Ok(Note {
                id: "created-1".to_string(),
                title: values.title.clone(),
                content: values.content.clone(),
                tag: values.tag,
                created_at: "2024-01-02T00:00:00Z".to_string(),
                updated_at: None,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{page_of, FakeApi};
    use super::*;
    use crate::api::ApiError;

    #[test]
    fn test_key_params_omit_empty_search() {
        let p = QueryKey::notes("", 1, None).to_params();
        assert!(p.search.is_none());
        assert_eq!(p.per_page, 12);

        let p = QueryKey::notes("milk", 3, Some("Shopping".to_string())).to_params();
        assert_eq!(p.search.as_deref(), Some("milk"));
        assert_eq!(p.page, 3);
        assert_eq!(p.tag.as_deref(), Some("Shopping"));
    }

    #[test]
    fn test_key_page_is_at_least_one() {
        assert_eq!(QueryKey::notes("", 0, None).page, 1);
    }

    #[test]
    fn test_distinct_filters_are_distinct_entries() {
        let mut cache = QueryCache::default();
        let a = QueryKey::notes("milk", 1, None);
        let b = QueryKey::notes("milk", 1, Some("Work".to_string()));
        let c = QueryKey::notes("eggs", 1, None);
        cache.insert(a.clone(), page_of(&["a"], 1));
        cache.insert(b.clone(), page_of(&["b"], 1));
        cache.insert(c.clone(), page_of(&["c"], 1));

        assert_eq!(cache.len(), 3);
        assert_eq!(cache.get(&b).map(|d| d.notes[0].title.as_str()), Some("b"));
    }

    #[test]
    fn test_invalidate_namespace_marks_every_notes_entry() {
        let mut cache = QueryCache::default();
        let milk = QueryKey::notes("milk", 1, None);
        let eggs = QueryKey::notes("eggs", 2, Some("Shopping".to_string()));
        let other = QueryKey {
            namespace: "note".to_string(),
            search: String::new(),
            page: 1,
            tag: None,
        };
        cache.insert(milk.clone(), page_of(&["m"], 1));
        cache.insert(eggs.clone(), page_of(&["e"], 1));
        cache.insert(other.clone(), page_of(&["o"], 1));

        assert_eq!(cache.invalidate_namespace("notes"), 2);
        assert_eq!(cache.is_stale(&milk), Some(true));
        assert_eq!(cache.is_stale(&eggs), Some(true));
        assert_eq!(cache.is_stale(&other), Some(false));

        assert!(cache.get_fresh(&milk).is_none());
        assert!(cache.get(&milk).is_some());
    }

    #[test]
    fn test_insert_clears_stale_mark() {
        let mut cache = QueryCache::default();
        let key = QueryKey::notes("", 1, None);
        cache.insert(key.clone(), page_of(&["old"], 1));
        cache.invalidate_namespace("notes");
        cache.insert(key.clone(), page_of(&["new"], 1));
        assert_eq!(cache.is_stale(&key), Some(false));
    }

    #[test]
    fn test_dehydrate_then_hydrate_seeds_fresh_entries() {
        let mut server = QueryCache::default();
        let key = QueryKey::notes("", 1, Some("Work".to_string()));
        server.insert(key.clone(), page_of(&["standup"], 2));

        let json = serde_json::to_string(&server.dehydrate()).expect("should serialize");
        let state: DehydratedState = serde_json::from_str(&json).expect("should parse");

        let client = NotesQueryClient::default();
        client.hydrate(state);
        let data = client.cached(&key).expect("hydrated entry should be fresh");
        assert_eq!(data.total_pages, 2);
        assert_eq!(data.notes[0].title, "standup");
    }

    #[test]
    fn test_dehydrate_skips_stale_entries() {
        let mut cache = QueryCache::default();
        cache.insert(QueryKey::notes("", 1, None), page_of(&["a"], 1));
        cache.invalidate_namespace("notes");
        assert!(cache.dehydrate().queries.is_empty());
    }

    #[test]
    fn test_hydrate_does_not_replace_fresh_data() {
        let client = NotesQueryClient::default();
        let key = QueryKey::notes("", 1, None);
        client.hydrate(DehydratedState {
            queries: vec![DehydratedQuery {
                key: key.clone(),
                data: page_of(&["first"], 1),
            }],
        });
        client.hydrate(DehydratedState {
            queries: vec![DehydratedQuery {
                key: key.clone(),
                data: page_of(&["second"], 1),
            }],
        });
        assert_eq!(client.cached(&key).expect("cached").notes[0].title, "first");
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[tokio::test]
    async fn test_fetch_stores_under_its_own_key() {
        let api = FakeApi::default();
        api.push_fetch(Ok(page_of(&["a", "b"], 3)));
        let client = NotesQueryClient::default();
        let key = QueryKey::notes("plan", 2, Some("Work".to_string()));

        let data = client.fetch(&api, &key).await.expect("fetch should succeed");
        assert_eq!(data.notes.len(), 2);
        assert_eq!(client.cached(&key), Some(data));
        assert!(client.cached(&QueryKey::notes("plan", 1, None)).is_none());

        let sent = api.fetches.lock().expect("lock");
        assert_eq!(sent[0].search.as_deref(), Some("plan"));
        assert_eq!(sent[0].page, 2);
        assert_eq!(sent[0].per_page, 12);
        assert_eq!(sent[0].tag.as_deref(), Some("Work"));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[tokio::test]
    async fn test_fetch_retries_network_errors_only() {
        let api = FakeApi::default();
        api.push_fetch(Err(ApiError::Network("offline".to_string())));
        api.push_fetch(Err(ApiError::Network("offline".to_string())));
        api.push_fetch(Ok(page_of(&["x"], 1)));
        let client = NotesQueryClient::default();
        assert!(client.fetch(&api, &QueryKey::notes("", 1, None)).await.is_ok());
        assert_eq!(api.fetch_count(), 3);

        let api = FakeApi::default();
        api.push_fetch(Err(ApiError::Unauthorized));
        let err = client
            .fetch(&api, &QueryKey::notes("", 2, None))
            .await
            .expect_err("401 should not be retried");
        assert_eq!(err, ApiError::Unauthorized);
        assert_eq!(api.fetch_count(), 1);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[tokio::test]
    async fn test_fetch_gives_up_after_retry_budget() {
        let api = FakeApi::default();
        for _ in 0..10 {
            api.push_fetch(Err(ApiError::Network("offline".to_string())));
        }
        let client = NotesQueryClient::default();
        let res = client.fetch(&api, &QueryKey::notes("", 1, None)).await;
        assert!(res.is_err());
        assert_eq!(api.fetch_count(), 4);
    }

    #[test]
    fn test_insert_fetched_after_invalidation_is_stale() {
        let mut cache = QueryCache::default();
        let key = QueryKey::notes("", 1, None);
        let started_at = cache.generation();

        cache.invalidate_namespace("notes");
        cache.insert_fetched(key.clone(), page_of(&["old"], 1), started_at);
        assert_eq!(cache.is_stale(&key), Some(true));

        cache.insert_fetched(key.clone(), page_of(&["new"], 1), cache.generation());
        assert_eq!(cache.is_stale(&key), Some(false));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[tokio::test]
    async fn test_invalidation_during_fetch_keeps_result_out_of_fresh_cache() {
        let api = FakeApi::default();
        let client = NotesQueryClient::default();
        let key = QueryKey::notes("", 1, None);

        // A note gets created while the first list request is still out.
        let c = client.clone();
        *api.during_fetch.lock().expect("lock") = Some(Box::new(move || {
            c.invalidate_namespace("notes");
        }));
        api.push_fetch(Ok(page_of(&["old"], 1)));
        let data = client.fetch(&api, &key).await.expect("fetch should succeed");
        assert_eq!(data.notes.len(), 1);
        assert!(client.cached(&key).is_none());

        api.push_fetch(Ok(page_of(&["old", "created"], 1)));
        client.fetch(&api, &key).await.expect("refetch should succeed");
        let titles: Vec<String> = client
            .cached(&key)
            .expect("refetched entry should be fresh")
            .notes
            .into_iter()
            .map(|n| n.title)
            .collect();
        assert_eq!(titles, vec!["old", "created"]);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[tokio::test]
    async fn test_prefetch_skips_fresh_and_swallows_errors() {
        let api = FakeApi::default();
        let client = NotesQueryClient::default();
        let key = QueryKey::notes("", 1, None);

        api.push_fetch(Err(ApiError::Parse("bad json".to_string())));
        client.prefetch(&api, &key).await;
        assert!(client.cached(&key).is_none());

        api.push_fetch(Ok(page_of(&["a"], 1)));
        client.prefetch(&api, &key).await;
        client.prefetch(&api, &key).await;
        assert_eq!(api.fetch_count(), 2);
        assert!(client.cached(&key).is_some());
    }
}
