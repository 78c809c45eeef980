use super::ALL_NOTES_PATH;
use crate::components::ui::{Card, CardContent, CardTitle};
use leptos::prelude::*;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <main class="mx-auto flex max-w-2xl flex-col gap-6 px-4 py-12">
            <h1 class="text-2xl font-semibold">"NoteHub"</h1>
            <ul class="list-none p-0">
                <Card>
                    <CardTitle>"Your notes, in one place"</CardTitle>
                    <CardContent>
                        <p class="text-sm text-muted-foreground">
                            "Write short notes, tag them, and find them again with search."
                        </p>
                        <a class="text-sm text-primary underline-offset-4 hover:underline" href=ALL_NOTES_PATH>
                            "Browse all notes"
                        </a>
                    </CardContent>
                </Card>
            </ul>
        </main>
    }
}
