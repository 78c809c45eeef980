use leptos::html;
use leptos::prelude::*;
use tw_merge::tw_merge;

const FIELD_CLASS: &str = "placeholder:text-muted-foreground selection:bg-primary selection:text-primary-foreground border-input w-full min-w-0 rounded-md border bg-transparent px-3 py-1 text-base shadow-xs transition-[color,box-shadow] outline-none disabled:pointer-events-none disabled:cursor-not-allowed disabled:opacity-50 md:text-sm focus-visible:border-ring focus-visible:ring-ring/50 focus-visible:ring-2 aria-invalid:border-destructive aria-invalid:ring-destructive/20";

#[component]
pub fn Input(
    #[prop(into, optional)] class: String,
    #[prop(into, default = "text")] r#type: &'static str,
    #[prop(into, optional)] placeholder: String,
    #[prop(into, optional)] name: String,
    #[prop(into, optional)] id: String,
    #[prop(optional)] autofocus: bool,
    #[prop(into, optional)] invalid: Signal<bool>,

    // Manual two-way wiring; `bind:value` has shifted across Leptos versions.
    #[prop(into)] bind_value: RwSignal<String>,

    /// Called with the new value after `bind_value` is updated.
    #[prop(into, optional)] on_change: Option<Callback<String>>,

    #[prop(optional)] node_ref: NodeRef<html::Input>,
) -> impl IntoView {
    let merged_class = tw_merge!("flex h-9", FIELD_CLASS, class);

    let on_input = move |ev: web_sys::Event| {
        let value = event_target_value(&ev);
        bind_value.set(value.clone());
        if let Some(cb) = on_change {
            cb.run(value);
        }
    };

    view! {
        <input
            data-name="Input"
            type=r#type
            class=merged_class
            placeholder=placeholder
            name=name
            id=id
            autofocus=autofocus
            aria-invalid=move || invalid.get().to_string()
            prop:value=move || bind_value.get()
            on:input=on_input
            node_ref=node_ref
        />
    }
}

#[component]
pub fn Textarea(
    #[prop(into, optional)] class: String,
    #[prop(into, optional)] name: String,
    #[prop(into, optional)] id: String,
    #[prop(default = 8)] rows: u32,
    #[prop(into, optional)] invalid: Signal<bool>,
    #[prop(into)] bind_value: RwSignal<String>,
    #[prop(into, optional)] on_change: Option<Callback<String>>,
) -> impl IntoView {
    let merged_class = tw_merge!("min-h-24 py-2 resize-y", FIELD_CLASS, class);

    let on_input = move |ev: web_sys::Event| {
        let value = event_target_value(&ev);
        bind_value.set(value.clone());
        if let Some(cb) = on_change {
            cb.run(value);
        }
    };

    view! {
        <textarea
            data-name="Textarea"
            class=merged_class
            name=name
            id=id
            rows=rows
            aria-invalid=move || invalid.get().to_string()
            prop:value=move || bind_value.get()
            on:input=on_input
        />
    }
}

/// Plain `<select>` over a fixed list of option values.
#[component]
pub fn NativeSelect(
    #[prop(into, optional)] class: String,
    #[prop(into, optional)] name: String,
    #[prop(into, optional)] id: String,
    options: Vec<String>,
    #[prop(into, optional)] invalid: Signal<bool>,
    #[prop(into)] bind_value: RwSignal<String>,
    #[prop(into, optional)] on_change: Option<Callback<String>>,
) -> impl IntoView {
    let merged_class = tw_merge!("flex h-9", FIELD_CLASS, class);

    let on_select = move |ev: web_sys::Event| {
        let value = event_target_value(&ev);
        bind_value.set(value.clone());
        if let Some(cb) = on_change {
            cb.run(value);
        }
    };

    view! {
        <select
            data-name="NativeSelect"
            class=merged_class
            name=name
            id=id
            aria-invalid=move || invalid.get().to_string()
            prop:value=move || bind_value.get()
            on:change=on_select
        >
            {options
                .into_iter()
                .map(|opt| {
                    let label = opt.clone();
                    let this = opt.clone();
                    view! {
                        <option value=opt selected=move || bind_value.get() == this>
                            {label}
                        </option>
                    }
                })
                .collect_view()}
        </select>
    }
}
