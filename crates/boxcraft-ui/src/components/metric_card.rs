use leptos::prelude::*;

/// Card with a title and one large figure, used on the admin dashboard.
#[component]
pub fn MetricCard(
    title: String,
    /// Figure shown under the title; `None` while loading.
    #[prop(into)]
    value: Signal<Option<String>>,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    view! {
        <div class="card metric-card">
            <div class="card-title">{title}</div>
            <div class="metric-value">
                {move || value.get().unwrap_or_else(|| "\u{2026}".to_string())}
            </div>
            {children.map(|c| c())}
        </div>
    }
}
