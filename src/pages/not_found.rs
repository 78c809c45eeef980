use crate::config::NOT_FOUND_REDIRECT_DELAY;
use crate::scheduler::{Scheduler, TaskHandle};
use crate::state::AppContext;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

/// Run `navigate` once after [`NOT_FOUND_REDIRECT_DELAY`].
pub(crate) fn schedule_home_redirect(
    scheduler: &dyn Scheduler,
    navigate: impl FnOnce() + Send + 'static,
) -> TaskHandle {
    scheduler.schedule(NOT_FOUND_REDIRECT_DELAY, Box::new(navigate))
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let navigate = use_navigate();

    let handle = schedule_home_redirect(app_state.0.scheduler.as_ref(), move || {
        tracing::debug!("redirecting unknown route to home");
        navigate("/", Default::default());
    });
    on_cleanup(move || handle.cancel());

    view! {
        <main class="mx-auto flex max-w-2xl flex-col gap-4 px-4 py-12">
            <h1 class="text-2xl font-semibold">"404 - Page not found"</h1>
            <p class="text-sm text-muted-foreground">
                "Sorry, the page you are looking for does not exist."
            </p>
            <a class="text-sm text-primary underline-offset-4 hover:underline" href="/">
                "Go back home"
            </a>
            <p class="text-sm text-muted-foreground">
                "You will be redirected to the homepage in 3 seconds."
            </p>
        </main>
    }
}
