use crate::components::ui::{Button, ButtonSize, ButtonVariant};
use icons::{ChevronLeft, ChevronRight};
use leptos::prelude::*;

/// Pages shown around the current one.
const PAGE_RANGE: u32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PageItem {
    Page(u32),
    Ellipsis,
}

/// Buttons to render for `current` of `total` pages (both 1-based).
///
/// A window of [`PAGE_RANGE`] pages around `current`, the first and last
/// page always, and an ellipsis for each skipped run.
pub(crate) fn page_items(current: u32, total: u32) -> Vec<PageItem> {
    if total == 0 {
        return vec![];
    }
    let current = current.clamp(1, total);

    if total <= PAGE_RANGE + 2 {
        return (1..=total).map(PageItem::Page).collect();
    }

    let half = PAGE_RANGE / 2;
    let mut start = current.saturating_sub(half).max(1);
    let end = (start + PAGE_RANGE - 1).min(total);
    start = end.saturating_sub(PAGE_RANGE - 1).max(1);

    let mut out = Vec::with_capacity(PAGE_RANGE as usize + 4);
    if start > 1 {
        out.push(PageItem::Page(1));
        if start > 2 {
            out.push(PageItem::Ellipsis);
        }
    }
    out.extend((start..=end).map(PageItem::Page));
    if end < total {
        if end < total - 1 {
            out.push(PageItem::Ellipsis);
        }
        out.push(PageItem::Page(total));
    }
    out
}

#[component]
pub fn Pagination(
    #[prop(into)] page_count: Signal<u32>,
    #[prop(into)] current_page: Signal<u32>,
    #[prop(into)] on_page_change: Callback<u32>,
) -> impl IntoView {
    let go = move |p: u32| {
        if p != current_page.get_untracked() {
            on_page_change.run(p);
        }
    };

    view! {
        <nav data-name="Pagination" aria-label="Pagination" class="flex items-center gap-1">
            <Button
                variant=ButtonVariant::Ghost
                size=ButtonSize::Icon
                attr:aria-label="Previous page"
                attr:disabled=move || current_page.get() <= 1
                on:click=move |_| go(current_page.get_untracked().saturating_sub(1).max(1))
            >
                <ChevronLeft />
            </Button>

            {move || {
                let current = current_page.get();
                page_items(current, page_count.get())
                    .into_iter()
                    .map(|item| match item {
                        PageItem::Page(p) => {
                            let variant = if p == current {
                                ButtonVariant::Default
                            } else {
                                ButtonVariant::Ghost
                            };
                            view! {
                                <Button
                                    variant=variant
                                    size=ButtonSize::Icon
                                    attr:aria-current=move || (p == current).then_some("page")
                                    on:click=move |_| go(p)
                                >
                                    {p.to_string()}
                                </Button>
                            }
                            .into_any()
                        }
                        PageItem::Ellipsis => {
                            view! { <span class="px-2 text-muted-foreground">"…"</span> }.into_any()
                        }
                    })
                    .collect_view()
            }}

            <Button
                variant=ButtonVariant::Ghost
                size=ButtonSize::Icon
                attr:aria-label="Next page"
                attr:disabled=move || current_page.get() >= page_count.get()
                on:click=move |_| go((current_page.get_untracked() + 1).min(page_count.get_untracked()))
            >
                <ChevronRight />
            </Button>
        </nav>
    }
}
