use crate::config::TOAST_DURATION;
use crate::scheduler::Scheduler;
use leptos::prelude::*;

pub(crate) const NO_NOTES_FOUND: &str = "No notes found for your query.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Toast {
    pub id: u64,
    pub message: String,
}

/// Transient notifications, newest last.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Toasts {
    items: Vec<Toast>,
    next_id: u64,
}

impl Toasts {
    pub fn push(&mut self, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Toast {
            id,
            message: message.into(),
        });
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|t| t.id != id);
    }

    pub fn items(&self) -> &[Toast] {
        &self.items
    }
}

/// Show `message` and dismiss it after [`TOAST_DURATION`].
pub(crate) fn show_toast(toasts: RwSignal<Toasts>, scheduler: &dyn Scheduler, message: &str) {
    let Some(id) = toasts.try_update(|t| t.push(message)) else {
        return;
    };

    // Dropping the handle leaves the dismissal scheduled.
    let _ = scheduler.schedule(
        TOAST_DURATION,
        Box::new(move || {
            toasts.try_update(|t| t.dismiss(id));
        }),
    );
}
