use crate::api::{ApiError, ApiResult, NotesApi};
use crate::config::NOTES_NAMESPACE;
use crate::drafts::DraftStore;
use crate::models::{Note, NoteFormValues, RawNoteFields};
use crate::query::NotesQueryClient;
use crate::validation::{validate, FieldErrors};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum MutationStatus {
    #[default]
    Idle,
    Pending,
    Failed(String),
    Succeeded,
}

impl MutationStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum SubmitOutcome {
    Invalid(FieldErrors),
    Created(Note),
    Failed(ApiError),
}

/// Create the note, then clear the draft and invalidate every cached notes
/// list. Nothing local changes when the request fails.
pub(crate) async fn create_note<A: NotesApi>(
    api: &A,
    drafts: &DraftStore,
    query_client: &NotesQueryClient,
    values: NoteFormValues,
) -> ApiResult<Note> {
    let note = api.create_note(&values).await?;

    drafts.clear_draft();
    query_client.invalidate_namespace(NOTES_NAMESPACE);

    tracing::info!(id = %note.id, tag = %note.tag, "note created");
    Ok(note)
}

/// Validate the form fields and, when they pass, run [`create_note`].
pub(crate) async fn submit_note<A: NotesApi>(
    api: &A,
    drafts: &DraftStore,
    query_client: &NotesQueryClient,
    fields: &RawNoteFields,
) -> SubmitOutcome {
    let values = match validate(fields) {
        Ok(v) => v,
        Err(errors) => return SubmitOutcome::Invalid(errors),
    };

    match create_note(api, drafts, query_client, values).await {
        Ok(note) => SubmitOutcome::Created(note),
        Err(e) => {
            tracing::warn!(error = %e, "note creation failed");
            SubmitOutcome::Failed(e)
        }
    }
}

/// What the create form does around a submit.
pub(crate) trait SubmitSteps {
    fn show_status(&self, status: MutationStatus);
    fn show_errors(&self, errors: FieldErrors);
    /// Refetch whatever lists are on screen.
    fn lists_invalidated(&self);
    fn navigate_to_all(&self);
    fn created(&self);
    fn close(&self);
}

/// Run one form submit through `steps`.
///
/// On success the draft is already cleared and the cache invalidated when
/// the view steps run, in order: refresh lists, navigate, `created`, `close`.
/// On failure the status is `Failed` and the form stays as it was.
pub(crate) async fn run_form_submit<A: NotesApi>(
    api: &A,
    drafts: &DraftStore,
    query_client: &NotesQueryClient,
    fields: &RawNoteFields,
    steps: &impl SubmitSteps,
) {
    steps.show_status(MutationStatus::Pending);

    match submit_note(api, drafts, query_client, fields).await {
        SubmitOutcome::Invalid(errors) => {
            steps.show_errors(errors);
            steps.show_status(MutationStatus::Idle);
        }
        SubmitOutcome::Failed(e) => {
            steps.show_errors(FieldErrors::default());
            steps.show_status(MutationStatus::Failed(e.to_string()));
        }
        SubmitOutcome::Created(_) => {
            steps.show_errors(FieldErrors::default());
            steps.show_status(MutationStatus::Succeeded);
            steps.lists_invalidated();
            steps.navigate_to_all();
            steps.created();
            steps.close();
        }
    }
}
