use boxcraft_types::ContactMessage;
use leptos::prelude::*;

use crate::components::toast::use_toasts;
use crate::pages::optional_text;
use crate::session::use_auth;

#[component]
pub fn ContactPage() -> impl IntoView {
    #[allow(unused_variables)]
    let auth = use_auth();
    #[allow(unused_variables)]
    let toasts = use_toasts();

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let subject = RwSignal::new(String::new());
    let message = RwSignal::new(String::new());
    let error = RwSignal::new(Option::<String>::None);
    let sent = RwSignal::new(false);
    let pending = RwSignal::new(false);

    let collect = move || ContactMessage {
        name: name.get_untracked().trim().to_string(),
        email: email.get_untracked().trim().to_string(),
        phone: optional_text(&phone.get_untracked()),
        subject: optional_text(&subject.get_untracked()),
        message: message.get_untracked().trim().to_string(),
    };

    let handleSubmit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        #[allow(unused_variables)]
        let outgoing = collect();

        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen_futures::spawn_local;

            let api = auth.api();
            pending.set(true);
            error.set(None);
            spawn_local(async move {
                match api.send_contact(&outgoing).await {
                    Ok(()) => {
                        sent.set(true);
                        for field in [name, email, phone, subject, message] {
                            field.set(String::new());
                        }
                        toasts.success("Thanks, we will get back to you shortly.");
                    }
                    Err(e) => {
                        error.set(Some(e.to_string()));
                        toasts.error("Your message could not be sent.");
                    }
                }
                pending.set(false);
            });
        }
    };

    view! {
        <div class="page-header">
            <h1>"Contact us"</h1>
            <p class="subtitle">"Tell us about your packaging and we will send a quote within two working days."</p>
        </div>
        <div class="contact-layout">
            <div class="card contact-details">
                <div class="card-title">"Plant & showroom"</div>
                <p>"Jl. Industri Raya 18, Cikarang"</p>
                <p>"Mon\u{2013}Fri, 08:00\u{2013}17:00"</p>
                <p>"sales@boxcraft.example"</p>
            </div>
            <form class="card" on:submit=handleSubmit>
                {move || sent.get().then(|| view! { <div class="form-success">"Message sent."</div> })}
                {move || error.get().map(|message| view! { <div class="login-error">{message}</div> })}
                <div class="form-group">
                    <label for="name">"Name"</label>
                    <input type="text" id="name" required
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev)) />
                </div>
                <div class="form-group">
                    <label for="email">"Email"</label>
                    <input type="email" id="email" required
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev)) />
                </div>
                <div class="form-group">
                    <label for="phone">"Phone"</label>
                    <input type="tel" id="phone"
                        prop:value=move || phone.get()
                        on:input=move |ev| phone.set(event_target_value(&ev)) />
                </div>
                <div class="form-group">
                    <label for="subject">"Subject"</label>
                    <input type="text" id="subject"
                        prop:value=move || subject.get()
                        on:input=move |ev| subject.set(event_target_value(&ev)) />
                </div>
                <div class="form-group">
                    <label for="message">"Message"</label>
                    <textarea id="message" rows="6" required
                        prop:value=move || message.get()
                        on:input=move |ev| message.set(event_target_value(&ev))></textarea>
                </div>
                <button type="submit" class="btn btn-primary" disabled=move || pending.get()>
                    {move || if pending.get() { "Sending..." } else { "Send message" }}
                </button>
            </form>
        </div>
    }
}
