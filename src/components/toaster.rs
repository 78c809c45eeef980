use crate::state::AppContext;
use leptos::prelude::*;

#[component]
pub fn Toaster() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let toasts = app_state.0.toasts;

    view! {
        <div
            data-name="Toaster"
            aria-live="polite"
            class="pointer-events-none fixed top-4 right-4 z-[200] flex flex-col items-end gap-2"
        >
            <For
                each=move || toasts.get().items().to_vec()
                key=|t| t.id
                children=move |t| {
                    let id = t.id;
                    view! {
                        <div
                            role="status"
                            class="pointer-events-auto rounded-md border bg-background px-4 py-2 text-sm shadow-md"
                            on:click=move |_| toasts.update(|ts| ts.dismiss(id))
                        >
                            {t.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
