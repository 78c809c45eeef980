use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Card, li, "bg-card text-card-foreground flex flex-col gap-3 rounded-xl border p-4 shadow-sm"}
    clx! {CardTitle, h2, "leading-none font-semibold"}
    clx! {CardContent, p, "text-sm text-muted-foreground whitespace-pre-wrap break-words"}
    clx! {CardFooter, footer, "flex items-center justify-between gap-2"}
    clx! {CardList, ul, "grid gap-4 sm:grid-cols-2 lg:grid-cols-3"}
}

pub use components::*;
