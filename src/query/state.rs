use super::QueryKey;
use crate::api::ApiResult;
use crate::models::FetchNotesResponse;

/// A fetch the view started; only the latest ticket may update the view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct QueryTicket {
    pub id: u64,
    pub key: QueryKey,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Observed {
    /// Served from fresh cache; nothing to fetch.
    Cached { empty: bool },
    Fetch(QueryTicket),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Settled {
    Loaded { empty: bool },
    Failed,
    /// A newer key or request took over; the result was not displayed.
    Superseded,
}

/// What one notes list view shows for its current key.
///
/// While a new key loads, the previous key's data stays displayed.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct NotesQueryState {
    current: Option<QueryKey>,
    data: Option<FetchNotesResponse>,
    data_key: Option<QueryKey>,
    latest_request: u64,
    fetching: bool,
    error: Option<String>,
}

impl NotesQueryState {
    pub fn observe(&mut self, key: QueryKey, cached: Option<FetchNotesResponse>) -> Observed {
        self.current = Some(key.clone());
        self.error = None;

        if let Some(data) = cached {
            // Any request still in flight is now for an older key.
            self.latest_request += 1;
            self.fetching = false;
            let empty = data.notes.is_empty();
            self.data = Some(data);
            self.data_key = Some(key);
            return Observed::Cached { empty };
        }

        self.latest_request += 1;
        self.fetching = true;
        Observed::Fetch(QueryTicket {
            id: self.latest_request,
            key,
        })
    }

    pub fn settle(&mut self, ticket: &QueryTicket, result: ApiResult<FetchNotesResponse>) -> Settled {
        if ticket.id != self.latest_request || self.current.as_ref() != Some(&ticket.key) {
            return Settled::Superseded;
        }

        self.fetching = false;
        match result {
            Ok(data) => {
                let empty = data.notes.is_empty();
                self.data = Some(data);
                self.data_key = Some(ticket.key.clone());
                self.error = None;
                Settled::Loaded { empty }
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Settled::Failed
            }
        }
    }

    pub fn data(&self) -> Option<&FetchNotesResponse> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_fetching(&self) -> bool {
        self.fetching
    }

    /// Nothing at all to show yet.
    pub fn is_loading(&self) -> bool {
        self.fetching && self.data.is_none()
    }

    /// Displayed data belongs to a previous key.
    pub fn is_placeholder(&self) -> bool {
        self.data.is_some() && self.data_key != self.current
    }

    pub fn total_pages(&self) -> u32 {
        self.data.as_ref().map(|d| d.total_pages).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::query::test_support::page_of;

    fn ticket(o: Observed) -> QueryTicket {
        match o {
            Observed::Fetch(t) => t,
            other => panic!("expected a fetch, got {other:?}"),
        }
    }

    #[test]
    fn test_first_load_is_loading_until_settled() {
        let mut s = NotesQueryState::default();
        let t = ticket(s.observe(QueryKey::notes("", 1, None), None));
        assert!(s.is_loading());

        assert_eq!(s.settle(&t, Ok(page_of(&["a"], 2))), Settled::Loaded { empty: false });
        assert!(!s.is_loading());
        assert_eq!(s.total_pages(), 2);
        assert!(!s.is_placeholder());
    }

    #[test]
    fn test_cached_hit_needs_no_fetch() {
        let mut s = NotesQueryState::default();
        let o = s.observe(QueryKey::notes("", 1, None), Some(page_of(&["a"], 1)));
        assert_eq!(o, Observed::Cached { empty: false });
        assert!(!s.is_fetching());
        assert_eq!(s.data().map(|d| d.notes.len()), Some(1));
    }

    #[test]
    fn test_page_change_keeps_previous_data_as_placeholder() {
        let mut s = NotesQueryState::default();
        let t1 = ticket(s.observe(QueryKey::notes("", 1, None), None));
        s.settle(&t1, Ok(page_of(&["page one"], 3)));

        let t2 = ticket(s.observe(QueryKey::notes("", 2, None), None));
        assert!(!s.is_loading());
        assert!(s.is_placeholder());
        assert_eq!(s.data().map(|d| d.notes[0].title.as_str()), Some("page one"));

        s.settle(&t2, Ok(page_of(&["page two"], 3)));
        assert!(!s.is_placeholder());
        assert_eq!(s.data().map(|d| d.notes[0].title.as_str()), Some("page two"));
    }

    #[test]
    fn test_stale_response_does_not_replace_newer_key() {
        let mut s = NotesQueryState::default();
        let old = ticket(s.observe(QueryKey::notes("mi", 1, None), None));
        let new = ticket(s.observe(QueryKey::notes("milk", 1, None), None));

        assert_eq!(s.settle(&new, Ok(page_of(&["milk"], 1))), Settled::Loaded { empty: false });
        assert_eq!(s.settle(&old, Ok(page_of(&["mi"], 1))), Settled::Superseded);
        assert_eq!(s.data().map(|d| d.notes[0].title.as_str()), Some("milk"));
    }

    #[test]
    fn test_cached_hit_supersedes_in_flight_request() {
        let mut s = NotesQueryState::default();
        let t = ticket(s.observe(QueryKey::notes("", 2, None), None));
        s.observe(QueryKey::notes("", 1, None), Some(page_of(&["cached"], 2)));

        assert_eq!(s.settle(&t, Ok(page_of(&["late"], 2))), Settled::Superseded);
        assert_eq!(s.data().map(|d| d.notes[0].title.as_str()), Some("cached"));
    }

    #[test]
    fn test_empty_result_is_not_an_error() {
        let mut s = NotesQueryState::default();
        let t = ticket(s.observe(QueryKey::notes("zzz", 1, None), None));
        let settled = s.settle(
            &t,
            Ok(FetchNotesResponse {
                notes: vec![],
                total_pages: 0,
            }),
        );
        assert_eq!(settled, Settled::Loaded { empty: true });
        assert!(s.error().is_none());
        assert_eq!(s.total_pages(), 0);
    }

    #[test]
    fn test_failure_sets_error_and_keeps_data() {
        let mut s = NotesQueryState::default();
        let t1 = ticket(s.observe(QueryKey::notes("", 1, None), None));
        s.settle(&t1, Ok(page_of(&["a"], 2)));

        let t2 = ticket(s.observe(QueryKey::notes("", 2, None), None));
        let settled = s.settle(&t2, Err(ApiError::Network("offline".to_string())));
        assert_eq!(settled, Settled::Failed);
        assert!(s.error().is_some());
        assert!(s.data().is_some());
        assert!(!s.is_fetching());
    }

    #[test]
    fn test_observe_clears_previous_error() {
        let mut s = NotesQueryState::default();
        let t = ticket(s.observe(QueryKey::notes("", 1, None), None));
        s.settle(&t, Err(ApiError::Unauthorized));
        assert!(s.error().is_some());

        s.observe(QueryKey::notes("", 1, None), None);
        assert!(s.error().is_none());
    }
}
