use crate::components::ui::{Card, CardContent, CardFooter, CardList, CardTitle};
use crate::models::Note;
use leptos::prelude::*;

#[component]
pub fn NoteList(#[prop(into)] notes: Signal<Vec<Note>>) -> impl IntoView {
    view! {
        <CardList>
            <For
                each=move || notes.get()
                key=|n| n.id.clone()
                children=move |n| {
                    view! {
                        <Card>
                            <CardTitle class="truncate">{n.title}</CardTitle>
                            <CardContent>{n.content}</CardContent>
                            <CardFooter>
                                <span class="rounded-full border px-2.5 py-0.5 text-xs">
                                    {n.tag.to_string()}
                                </span>
                            </CardFooter>
                        </Card>
                    }
                }
            />
        </CardList>
    }
}
