use leptos::prelude::*;
use leptos_router::components::A;

use crate::session::use_auth;

#[component]
pub fn LoginPage() -> impl IntoView {
    #[allow(unused_variables)]
    let auth = use_auth();
    #[allow(unused_variables)]
    let navigate = leptos_router::hooks::use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(Option::<String>::None);
    let pending = RwSignal::new(false);

    let handleSubmit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }

        #[cfg(feature = "hydrate")]
        {
            use boxcraft_client::landing_path;
            use boxcraft_types::Credentials;
            use wasm_bindgen_futures::spawn_local;

            let sessions = auth.sessions.clone();
            let navigate = navigate.clone();
            let credentials = Credentials {
                email: email.get_untracked().trim().to_string(),
                password: password.get_untracked(),
            };
            pending.set(true);
            error.set(None);
            spawn_local(async move {
                match sessions.login(&credentials).await {
                    Ok(user) => navigate(landing_path(user.role), Default::default()),
                    Err(e) => error.set(Some(e.to_string())),
                }
                pending.set(false);
            });
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <div class="login-header">
                    <div class="login-icon">"B"</div>
                    <h1>"Boxcraft Packaging"</h1>
                    <p>"Sign in to your account"</p>
                </div>

                {move || error.get().map(|message| view! { <div class="login-error">{message}</div> })}

                <form on:submit=handleSubmit>
                    <div class="form-group">
                        <label for="email">"Email"</label>
                        <input
                            type="email"
                            id="email"
                            placeholder="you@company.com"
                            required
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label for="password">"Password"</label>
                        <input
                            type="password"
                            id="password"
                            required
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                    </div>
                    <button type="submit" class="btn btn-primary" disabled=move || pending.get()>
                        {move || if pending.get() { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>
                <p class="login-footer">
                    "No account yet? " <A href="/register">"Register"</A>
                </p>
            </div>
        </div>
    }
}
