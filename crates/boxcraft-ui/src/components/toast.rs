use std::time::Duration;

use leptos::prelude::*;

const MAX_TOASTS: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

impl ToastLevel {
    fn class(&self) -> &'static str {
        match self {
            ToastLevel::Success => "toast toast-success",
            ToastLevel::Error => "toast toast-error",
        }
    }

    // Failures stay up long enough to read the backend message.
    fn lifetime(&self) -> Duration {
        match self {
            ToastLevel::Success => Duration::from_secs(4),
            ToastLevel::Error => Duration::from_secs(8),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub level: ToastLevel,
}

/// Notifications currently on screen, oldest first.
#[derive(Clone, Debug, Default)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    next_id: u64,
}

impl ToastQueue {
    /// Adds a toast, dropping the oldest past [`MAX_TOASTS`]. Returns its id.
    pub fn push(&mut self, message: String, level: ToastLevel) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push(Toast { id, message, level });
        if self.toasts.len() > MAX_TOASTS {
            let excess = self.toasts.len() - MAX_TOASTS;
            self.toasts.drain(..excess);
        }
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|t| t.id != id);
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }
}

#[derive(Clone, Copy)]
pub struct ToastContext {
    queue: RwSignal<ToastQueue>,
}

impl ToastContext {
    pub fn push(&self, message: impl Into<String>, level: ToastLevel) {
        let message = message.into();
        let queue = self.queue;
        let id = queue
            .try_update(|q| q.push(message, level))
            .unwrap_or_default();
        set_timeout(move || queue.update(|q| q.dismiss(id)), level.lifetime());
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(message, ToastLevel::Success);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(message, ToastLevel::Error);
    }

    pub fn dismiss(&self, id: u64) {
        self.queue.update(|q| q.dismiss(id));
    }
}

pub fn use_toasts() -> ToastContext {
    expect_context::<ToastContext>()
}

/// Provides [`ToastContext`] to `children` and renders the toast stack.
#[component]
pub fn ToastProvider(children: Children) -> impl IntoView {
    let ctx = ToastContext {
        queue: RwSignal::new(ToastQueue::default()),
    };
    provide_context(ctx);

    view! {
        {children()}
        <div class="toast-container">
            <For
                each=move || ctx.queue.with(|q| q.toasts().to_vec())
                key=|toast| toast.id
                let:toast
            >
                <div class=toast.level.class() on:click=move |_| ctx.dismiss(toast.id)>
                    {toast.message.clone()}
                </div>
            </For>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oldest_toasts_fall_off() {
        let mut queue = ToastQueue::default();
        for n in 0..6 {
            queue.push(format!("saved {n}"), ToastLevel::Success);
        }
        let ids: Vec<u64> = queue.toasts().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 3, 4, 5]);
    }

    #[test]
    fn dismiss_removes_only_that_toast() {
        let mut queue = ToastQueue::default();
        let first = queue.push("Product created".into(), ToastLevel::Success);
        queue.push("Delete failed".into(), ToastLevel::Error);

        queue.dismiss(first);
        assert_eq!(queue.toasts().len(), 1);
        assert_eq!(queue.toasts()[0].level, ToastLevel::Error);
        assert!(ToastLevel::Error.lifetime() > ToastLevel::Success.lifetime());
    }
}
