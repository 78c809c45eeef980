use crate::config::NOTE_DRAFT_KEY;
use crate::models::NoteDraft;
use crate::storage::{load_json, save_json, KeyValueStore};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// Stored record layout: `{"state":{"draft":{...}},"version":0}`.
///
/// Same envelope the previous JavaScript client wrote, so its drafts restore.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
struct PersistedDraft {
    state: PersistedDraftState,
    #[serde(default)]
    version: u32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
struct PersistedDraftState {
    draft: NoteDraft,
}

/// Holds the in-progress note and mirrors every change to durable storage.
///
/// One instance per app, handed to components through context. It stores
/// whatever it is given; validation happens at submit time.
#[derive(Clone)]
pub(crate) struct DraftStore {
    storage: Arc<dyn KeyValueStore>,
    draft: Arc<Mutex<NoteDraft>>,
}

impl DraftStore {
    /// Restore the persisted draft, or start from the empty one.
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let draft = load_json::<PersistedDraft>(storage.as_ref(), NOTE_DRAFT_KEY)
            .map(|p| p.state.draft)
            .unwrap_or_default();

        Self {
            storage,
            draft: Arc::new(Mutex::new(draft)),
        }
    }

    pub fn get_draft(&self) -> NoteDraft {
        self.draft
            .lock()
            .map(|d| d.clone())
            .unwrap_or_default()
    }

    pub fn set_draft(&self, draft: NoteDraft) {
        if let Ok(mut d) = self.draft.lock() {
            *d = draft.clone();
        }
        self.persist(draft);
    }

    pub fn clear_draft(&self) {
        self.set_draft(NoteDraft::default());
    }

    fn persist(&self, draft: NoteDraft) {
        let record = PersistedDraft {
            state: PersistedDraftState { draft },
            version: 0,
        };
        if let Err(e) = save_json(self.storage.as_ref(), NOTE_DRAFT_KEY, &record) {
            tracing::warn!(error = %e, "failed to persist note draft");
        }
    }
}
