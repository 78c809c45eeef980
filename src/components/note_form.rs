use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonVariant, FieldError, Input, Label, NativeSelect, Spinner,
    Textarea,
};
use crate::models::{DraftField, NoteTag, RawNoteFields};
use crate::mutation::{run_form_submit, MutationStatus, SubmitSteps};
use crate::pages::ALL_NOTES_PATH;
use crate::state::{AppContext, AppState};
use crate::validation::FieldErrors;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use strum::IntoEnumIterator;

/// Signals and callbacks a submit reports back into.
struct FormSteps {
    state: AppState,
    status: RwSignal<MutationStatus>,
    errors: RwSignal<FieldErrors>,
    navigate_to_all: Callback<()>,
    on_created: Callback<()>,
    on_close: Callback<()>,
}

impl SubmitSteps for FormSteps {
    fn show_status(&self, status: MutationStatus) {
        self.status.try_set(status);
    }

    fn show_errors(&self, errors: FieldErrors) {
        self.errors.try_set(errors);
    }

    fn lists_invalidated(&self) {
        self.state.notes_invalidated();
    }

    fn navigate_to_all(&self) {
        self.navigate_to_all.run(());
    }

    fn created(&self) {
        self.on_created.run(());
    }

    fn close(&self) {
        self.on_close.run(());
    }
}

/// Create-note form backed by the persisted draft.
///
/// Every edit is written to the draft store as a complete draft. After a
/// successful create the draft is cleared, the notes cache invalidated, the
/// view navigates to all notes, then `on_created` and `on_close` run.
#[component]
pub fn NoteForm(
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_created: Callback<()>,
) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let navigate = StoredValue::new(use_navigate());

    let initial = RawNoteFields::from(&app_state.0.drafts.get_draft());
    let title: RwSignal<String> = RwSignal::new(initial.title);
    let content: RwSignal<String> = RwSignal::new(initial.content);
    let tag: RwSignal<String> = RwSignal::new(initial.tag);

    let errors: RwSignal<FieldErrors> = RwSignal::new(FieldErrors::default());
    let status: RwSignal<MutationStatus> = RwSignal::new(MutationStatus::Idle);

    let draft_writer = |field: DraftField| {
        let drafts = app_state.0.drafts.clone();
        Callback::new(move |value: String| {
            drafts.set_draft(drafts.get_draft().with_field(field, &value));
        })
    };
    let on_title = draft_writer(DraftField::Title);
    let on_content = draft_writer(DraftField::Content);
    let on_tag = draft_writer(DraftField::Tag);

    let navigate_to_all =
        Callback::new(move |_: ()| navigate.with_value(|nav| nav(ALL_NOTES_PATH, Default::default())));

    let state = app_state.0.clone();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if status.get_untracked().is_pending() {
            return;
        }

        let fields = RawNoteFields {
            title: title.get_untracked(),
            content: content.get_untracked(),
            tag: tag.get_untracked(),
        };

        status.set(MutationStatus::Pending);
        let steps = FormSteps {
            state: state.clone(),
            status,
            errors,
            navigate_to_all,
            on_created,
            on_close,
        };
        spawn_local(async move {
            let s = &steps.state;
            run_form_submit(&s.api, &s.drafts, &s.query_client, &fields, &steps).await;
        });
    };

    let pending = move || status.get().is_pending();
    let tag_options: Vec<String> = NoteTag::iter().map(|t| t.to_string()).collect();

    view! {
        <form data-name="NoteForm" class="flex flex-col gap-4" on:submit=on_submit novalidate=true>
            <div class="flex flex-col gap-2">
                <Label html_for="title">"Title"</Label>
                <Input
                    id="title"
                    name="title"
                    bind_value=title
                    on_change=on_title
                    invalid=Signal::derive(move || errors.get().title.is_some())
                />
                <FieldError message=Signal::derive(move || errors.get().title) />
            </div>

            <div class="flex flex-col gap-2">
                <Label html_for="content">"Content"</Label>
                <Textarea
                    id="content"
                    name="content"
                    rows=8
                    bind_value=content
                    on_change=on_content
                    invalid=Signal::derive(move || errors.get().content.is_some())
                />
                <FieldError message=Signal::derive(move || errors.get().content) />
            </div>

            <div class="flex flex-col gap-2">
                <Label html_for="tag">"Tag"</Label>
                <NativeSelect
                    id="tag"
                    name="tag"
                    options=tag_options
                    bind_value=tag
                    on_change=on_tag
                    invalid=Signal::derive(move || errors.get().tag.is_some())
                />
                <FieldError message=Signal::derive(move || errors.get().tag) />
            </div>

            <Show when=move || status.get().error().is_some()>
                <Alert class="border-destructive/50">
                    <AlertDescription class="text-destructive text-xs">
                        {move || {
                            format!(
                                "Could not create note: {}",
                                status.get().error().unwrap_or_default(),
                            )
                        }}
                    </AlertDescription>
                </Alert>
            </Show>

            <div class="flex justify-end gap-2">
                <Button
                    variant=ButtonVariant::Outline
                    attr:r#type="button"
                    on:click=move |_| on_close.run(())
                >
                    "Cancel"
                </Button>
                <Button attr:r#type="submit" attr:disabled=pending>
                    <Show when=pending>
                        <Spinner />
                    </Show>
                    {move || if pending() { "Creating..." } else { "Create note" }}
                </Button>
            </div>
        </form>
    }
}
