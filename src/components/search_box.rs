use crate::components::ui::Input;
use leptos::prelude::*;

/// Search input. Reports every edit; callers debounce.
#[component]
pub fn SearchBox(#[prop(into)] on_search: Callback<String>) -> impl IntoView {
    let value: RwSignal<String> = RwSignal::new(String::new());

    view! {
        <Input
            class="max-w-xs"
            r#type="search"
            name="search"
            placeholder="Search notes"
            bind_value=value
            on_change=on_search
        />
    }
}
