use leptos::prelude::*;

#[component]
pub fn Pager(
    #[prop(into)] page: Signal<usize>,
    #[prop(into)] total_pages: Signal<usize>,
    #[prop(into)] summary: Signal<String>,
    on_change: Callback<usize>,
) -> impl IntoView {
    view! {
        <div class="pager">
            <span class="pager-summary">{move || summary.get()}</span>
            <button
                class="btn btn-ghost btn-sm"
                disabled=move || page.get() <= 1
                on:click=move |_| on_change.run(page.get_untracked().saturating_sub(1))
            >
                "Previous"
            </button>
            <span class="pager-position">
                {move || format!("Page {} of {}", page.get(), total_pages.get())}
            </span>
            <button
                class="btn btn-ghost btn-sm"
                disabled=move || page.get() >= total_pages.get()
                on:click=move |_| on_change.run(page.get_untracked() + 1)
            >
                "Next"
            </button>
        </div>
    }
}
