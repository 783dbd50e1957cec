use leptos::prelude::*;
use leptos_router::components::A;

const HIGHLIGHTS: &[(&str, &str)] = &[
    (
        "Corrugated boxes",
        "Single, double and triple wall shipping cartons cut to your dimensions.",
    ),
    (
        "Rigid packaging",
        "Premium set-up boxes for retail, gifting and subscription brands.",
    ),
    (
        "Custom printing",
        "Flexo and offset print runs from a few hundred to a few hundred thousand.",
    ),
];

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <section class="hero">
            <h1>"Packaging that protects what you make"</h1>
            <p class="subtitle">
                "Boxcraft designs and manufactures boxes, trays and inserts for manufacturers, retailers and online stores."
            </p>
            <div class="hero-actions">
                <A href="/products">"Browse products"</A>
                <A href="/contact">"Request a quote"</A>
            </div>
        </section>
        <section class="highlights">
            {HIGHLIGHTS
                .iter()
                .map(|(title, body)| {
                    view! {
                        <div class="card">
                            <div class="card-title">{*title}</div>
                            <p>{*body}</p>
                        </div>
                    }
                })
                .collect_view()}
        </section>
    }
}
