use leptos::prelude::*;
use leptos_router::components::A;

use crate::session::use_auth;

#[component]
pub fn RegisterPage() -> impl IntoView {
    #[allow(unused_variables)]
    let auth = use_auth();
    #[allow(unused_variables)]
    let navigate = leptos_router::hooks::use_navigate();

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirmation = RwSignal::new(String::new());
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
            use boxcraft_types::RegisterRequest;
            use wasm_bindgen_futures::spawn_local;

            let sessions = auth.sessions.clone();
            let navigate = navigate.clone();
            let request = RegisterRequest {
                name: name.get_untracked().trim().to_string(),
                email: email.get_untracked().trim().to_string(),
                password: password.get_untracked(),
                password_confirmation: confirmation.get_untracked(),
            };
            pending.set(true);
            error.set(None);
            spawn_local(async move {
                match sessions.register(&request).await {
                    Ok(user) => navigate(landing_path(user.role), Default::default()),
                    Err(e) => error.set(Some(e.to_string())),
                }
                pending.set(false);
            });
        }
    };

    let mismatch = move || {
        let confirm = confirmation.get();
        !confirm.is_empty() && confirm != password.get()
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <div class="login-header">
                    <div class="login-icon">"B"</div>
                    <h1>"Create an account"</h1>
                    <p>"Track quotes and orders with Boxcraft"</p>
                </div>

                {move || error.get().map(|message| view! { <div class="login-error">{message}</div> })}

                <form on:submit=handleSubmit>
                    <div class="form-group">
                        <label for="name">"Full name"</label>
                        <input
                            type="text"
                            id="name"
                            required
                            prop:value=move || name.get()
                            on:input=move |ev| name.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label for="email">"Email"</label>
                        <input
                            type="email"
                            id="email"
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
                    <div class="form-group">
                        <label for="password_confirmation">"Confirm password"</label>
                        <input
                            type="password"
                            id="password_confirmation"
                            required
                            prop:value=move || confirmation.get()
                            on:input=move |ev| confirmation.set(event_target_value(&ev))
                        />
                        {move || mismatch().then(|| view! { <span class="field-hint">"Passwords do not match"</span> })}
                    </div>
                    <button type="submit" class="btn btn-primary" disabled=move || pending.get()>
                        {move || if pending.get() { "Creating account..." } else { "Register" }}
                    </button>
                </form>
                <p class="login-footer">
                    "Already registered? " <A href="/login">"Sign in"</A>
                </p>
            </div>
        </div>
    }
}
