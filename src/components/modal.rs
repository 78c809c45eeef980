use icons::X;
use leptos::ev;
use leptos::prelude::*;
use leptos_dom::helpers::window_event_listener;

/// Centered dialog over a backdrop. Closes on backdrop click and Escape.
#[component]
pub fn Modal(
    #[prop(into)] on_close: Callback<()>,
    #[prop(into, optional)] title: String,
    children: Children,
) -> impl IntoView {
    let key_handle = window_event_listener(ev::keydown, move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Escape" {
            ev.prevent_default();
            on_close.run(());
        }
    });
    on_cleanup(move || key_handle.remove());

    view! {
        <div
            data-name="ModalBackdrop"
            class="fixed inset-0 z-60 bg-black/50"
            on:click=move |_| on_close.run(())
        />
        <div
            data-name="ModalContent"
            role="dialog"
            aria-modal="true"
            class="fixed top-[50%] left-[50%] z-100 w-full max-w-[calc(100%-2rem)] sm:max-w-lg max-h-[85vh] overflow-y-auto translate-x-[-50%] translate-y-[-50%] rounded-2xl border bg-background p-6 shadow-lg"
        >
            <button
                type="button"
                class="absolute top-4 right-4 rounded-sm p-1 focus:outline-none focus:ring-2 focus:ring-ring [&_svg:not([class*='size-'])]:size-4"
                aria-label="Close dialog"
                on:click=move |_| on_close.run(())
            >
                <X />
            </button>

            {(!title.is_empty())
                .then(|| view! { <h3 class="mb-4 text-lg leading-none font-semibold">{title}</h3> })}

            {children()}
        </div>
    }
}
