use leptos::prelude::*;

#[component]
pub fn AboutPage() -> impl IntoView {
    view! {
        <div class="page-header">
            <h1>"About Boxcraft"</h1>
        </div>
        <div class="card">
            <p>
                "We are a packaging manufacturer running corrugating, die-cutting and printing lines under one roof. "
                "Every order is engineered, sampled and produced in-house."
            </p>
            <p>
                "Our customers range from food producers and electronics assemblers to small online shops "
                "ordering their first branded mailer."
            </p>
        </div>
    }
}
