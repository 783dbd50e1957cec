pub mod bulletins;
pub mod dashboard;
pub mod products;
pub mod users;

use boxcraft_client::screen::{CrudResource, CrudScreen};
use leptos::prelude::*;

use crate::components::toast::ToastContext;

/// What the record form on an admin screen is doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(u64),
}

impl FormMode {
    pub fn heading(&self, label: &str) -> String {
        match self {
            FormMode::Create => format!("New {label}"),
            FormMode::Edit(id) => format!("Edit {label} #{id}"),
        }
    }
}

/// Runs an async screen operation on a copy of `screen`, then folds the
/// outcome back in without touching filters the user changed meanwhile.
#[allow(unused_variables)]
pub fn spawn_screen_task<R, F, Fut>(
    screen: RwSignal<CrudScreen<R>>,
    toasts: ToastContext,
    success: Option<&'static str>,
    task: F,
) where
    R: CrudResource,
    CrudScreen<R>: Send + Sync,
    F: FnOnce(CrudScreen<R>) -> Fut + 'static,
    Fut: std::future::Future<Output = (CrudScreen<R>, Result<(), boxcraft_client::ClientError>)>
        + 'static,
{
    #[cfg(feature = "hydrate")]
    {
        let working = screen.get_untracked();
        wasm_bindgen_futures::spawn_local(async move {
            let (finished, result) = task(working).await;
            screen.update(|s| s.absorb(finished));
            match result {
                Ok(()) => {
                    if let Some(message) = success {
                        toasts.success(message);
                    }
                }
                Err(e) => toasts.error(e.to_string()),
            }
        });
    }
}

/// Browser confirm dialog.
#[cfg(feature = "hydrate")]
pub fn confirm(message: &str) -> bool {
    window().confirm_with_message(message).unwrap_or(false)
}

#[cfg(not(feature = "hydrate"))]
pub fn confirm(_message: &str) -> bool {
    false
}

/// Error banner for the last failed screen operation.
pub fn screen_error<R>(screen: RwSignal<CrudScreen<R>>) -> impl IntoView
where
    R: CrudResource,
    CrudScreen<R>: Send + Sync,
{
    move || {
        screen.with(|s| s.error().map(str::to_string)).map(|message| {
            view! {
                <div class="login-error">
                    {message}
                    <button class="btn btn-ghost btn-sm" on:click=move |_| screen.update(|s| s.clear_error())>
                        "Dismiss"
                    </button>
                </div>
            }
        })
    }
}
