use boxcraft_client::guard::visible_sections;
use leptos::prelude::*;
use leptos_router::components::A;

use crate::session::use_auth;

const PUBLIC_LINKS: &[(&str, &str)] = &[
    ("/", "Home"),
    ("/about", "About"),
    ("/products", "Products"),
    ("/bulletin", "Bulletin"),
    ("/contact", "Contact"),
];

/// Sign-out button; the session is cleared even if the request fails.
#[component]
fn LogoutButton() -> impl IntoView {
    #[allow(unused_variables)]
    let auth = use_auth();
    #[allow(unused_variables)]
    let navigate = leptos_router::hooks::use_navigate();

    let handleLogout = move |_| {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen_futures::spawn_local;
            let sessions = auth.sessions.clone();
            let navigate = navigate.clone();
            spawn_local(async move {
                sessions.logout().await;
                navigate("/login", Default::default());
            });
        }
    };

    view! {
        <button class="btn btn-ghost btn-sm" on:click=handleLogout>
            "Sign out"
        </button>
    }
}

#[component]
pub fn SiteNav() -> impl IntoView {
    let auth = use_auth();

    view! {
        <header class="site-header">
            <div class="nav-brand">
                <div class="brand-icon">"B"</div>
                <span class="brand-text">"Boxcraft Packaging"</span>
            </div>
            <ul class="nav-links">
                {PUBLIC_LINKS
                    .iter()
                    .map(|(href, label)| {
                        view! {
                            <li class="nav-item">
                                <A href=*href>{*label}</A>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
            <div class="nav-account">
                {move || {
                    let session = auth.session.get();
                    match session.user.filter(|_| session.access_token.is_some()) {
                        Some(user) => {
                            let isStaff = user.role.is_staff();
                            view! {
                                <span class="nav-user">{user.name.clone()}</span>
                                {isStaff.then(|| view! { <A href="/admin">"Admin"</A> })}
                                <LogoutButton />
                            }
                                .into_any()
                        }
                        None => {
                            view! {
                                <A href="/login">"Sign in"</A>
                                <A href="/register">"Register"</A>
                            }
                                .into_any()
                        }
                    }
                }}
            </div>
        </header>
    }
}

#[component]
pub fn AdminNav() -> impl IntoView {
    let auth = use_auth();

    view! {
        <nav class="nav-sidebar">
            <div class="nav-brand">
                <div class="brand-icon">"B"</div>
                <span class="brand-text">"Back Office"</span>
            </div>
            <ul class="nav-links">
                {move || {
                    auth.role()
                        .map(visible_sections)
                        .unwrap_or_default()
                        .into_iter()
                        .map(|section| {
                            view! {
                                <li class="nav-item">
                                    <A href=section.path()>{section.title()}</A>
                                </li>
                            }
                        })
                        .collect_view()
                }}
                <li class="nav-item">
                    <A href="/">"View site"</A>
                </li>
            </ul>
            <div class="nav-footer">
                <LogoutButton />
            </div>
        </nav>
    }
}
