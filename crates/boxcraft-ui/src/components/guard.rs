use boxcraft_client::{AdminSection, GuardDecision, RouteGuard};
use leptos::prelude::*;
use leptos_router::components::Redirect;

use crate::session::use_auth;

/// Renders `children` only for roles allowed into `section`.
#[component]
pub fn RequireSection(section: AdminSection, children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let guard = RouteGuard::for_section(section);

    move || match auth.decide(guard) {
        GuardDecision::Loading => view! {
            <div class="loading">
                <div class="spinner"></div>
                "Checking your session..."
            </div>
        }
        .into_any(),
        GuardDecision::Redirect(path) => view! { <Redirect path=path /> }.into_any(),
        GuardDecision::Render => children().into_any(),
    }
}
