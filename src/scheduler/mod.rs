use std::sync::{Arc, Mutex};
use std::time::Duration;

pub(crate) type Task = Box<dyn FnOnce() + Send + 'static>;

/// Runs one-shot tasks after a delay on the UI event loop.
pub(crate) trait Scheduler: Send + Sync {
    fn schedule(&self, delay: Duration, task: Task) -> TaskHandle;
}

/// Disposable handle to a scheduled task.
///
/// Dropping the handle does not cancel; owners cancel explicitly on teardown.
pub(crate) struct TaskHandle {
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl TaskHandle {
    pub fn new(cancel: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Cancel the task if it has not run yet. Idempotent.
    pub fn cancel(mut self) {
        if let Some(f) = self.cancel.take() {
            f();
        }
    }
}

/// `setTimeout` / `clearTimeout` on the browser window.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TaskHandle {
        use wasm_bindgen::JsCast;

        let Some(win) = web_sys::window() else {
            tracing::warn!("no window; scheduled task dropped");
            return TaskHandle::new(|| {});
        };

        let cb = wasm_bindgen::closure::Closure::once_into_js(move || task());
        let timeout_ms = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        let tid = match win.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            timeout_ms,
        ) {
            Ok(tid) => tid,
            Err(_) => {
                tracing::warn!("setTimeout failed; scheduled task dropped");
                return TaskHandle::new(|| {});
            }
        };

        TaskHandle::new(move || {
            if let Some(win) = web_sys::window() {
                win.clear_timeout_with_handle(tid);
            }
        })
    }
}

/// Calls `callback` with the latest value once calls stop for `delay`.
pub(crate) struct Debouncer<T> {
    scheduler: Arc<dyn Scheduler>,
    delay: Duration,
    callback: Arc<dyn Fn(T) + Send + Sync>,
    pending: Arc<Mutex<Option<TaskHandle>>>,
}

impl<T> Clone for Debouncer<T> {
    fn clone(&self) -> Self {
        Self {
            scheduler: self.scheduler.clone(),
            delay: self.delay,
            callback: self.callback.clone(),
            pending: self.pending.clone(),
        }
    }
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(
        scheduler: Arc<dyn Scheduler>,
        delay: Duration,
        callback: impl Fn(T) + Send + Sync + 'static,
    ) -> Self {
        Self {
            scheduler,
            delay,
            callback: Arc::new(callback),
            pending: Arc::new(Mutex::new(None)),
        }
    }

    pub fn call(&self, value: T) {
        self.cancel();

        let callback = self.callback.clone();
        let pending = self.pending.clone();
        let handle = self.scheduler.schedule(
            self.delay,
            Box::new(move || {
                if let Ok(mut p) = pending.lock() {
                    p.take();
                }
                callback(value);
            }),
        );

        if let Ok(mut p) = self.pending.lock() {
            *p = Some(handle);
        }
    }

    /// Drop the pending call, if any.
    pub fn cancel(&self) {
        let prev = self.pending.lock().ok().and_then(|mut p| p.take());
        if let Some(h) = prev {
            h.cancel();
        }
    }
}
