use boxcraft_client::listing::{filter_items, BulletinFilter};
use boxcraft_types::Bulletin;
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;

use crate::session::use_auth;

fn event_line(bulletin: &Bulletin) -> Option<String> {
    match (&bulletin.event_date, &bulletin.event_location) {
        (Some(date), Some(place)) => Some(format!("{date} \u{00B7} {place}")),
        (Some(date), None) => Some(date.clone()),
        (None, Some(place)) => Some(place.clone()),
        (None, None) => None,
    }
}

fn excerpt(content: &Option<String>) -> String {
    let text = content.as_deref().unwrap_or_default();
    if text.chars().count() <= 180 {
        return text.to_string();
    }
    let cut: String = text.chars().take(180).collect();
    format!("{}\u{2026}", cut.trim_end())
}

#[component]
pub fn BulletinPage() -> impl IntoView {
    #[allow(unused_variables)]
    let auth = use_auth();
    #[allow(unused_variables)]
    let (bulletins, setBulletins) = signal(Option::<Result<Vec<Bulletin>, String>>::None);
    let search = RwSignal::new(String::new());

    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen_futures::spawn_local;
        let api = auth.api();
        spawn_local(async move {
            let result = api.list_bulletins().await.map_err(|e| e.to_string());
            setBulletins.set(Some(result));
        });
    }

    view! {
        <div class="page-header">
            <h1>"Bulletin"</h1>
            <p class="subtitle">"Company news, trade fairs and plant open days."</p>
        </div>
        <div class="toolbar">
            <input
                type="search"
                placeholder="Search the bulletin"
                prop:value=move || search.get()
                on:input=move |ev| search.set(event_target_value(&ev))
            />
        </div>
        {move || match bulletins.get() {
            None => {
                view! {
                    <div class="loading">
                        <div class="spinner"></div>
                        "Loading bulletin..."
                    </div>
                }
                    .into_any()
            }
            Some(Err(e)) => {
                view! {
                    <div class="card">
                        <p class="login-error">"Failed to load bulletin: " {e}</p>
                    </div>
                }
                    .into_any()
            }
            Some(Ok(list)) => {
                let filter = BulletinFilter {
                    search: search.get(),
                    category: None,
                };
                let shown = filter_items(&list, &filter);
                if shown.is_empty() {
                    view! { <div class="card"><p>"Nothing posted yet."</p></div> }.into_any()
                } else {
                    view! {
                        <div class="bulletin-list">
                            {shown
                                .into_iter()
                                .map(|bulletin| {
                                    let href = format!("/bulletin/{}", bulletin.id);
                                    let title = bulletin.title.clone();
                                    view! {
                                        <article class="card">
                                            <div class="card-title">
                                                <A href=href>{title}</A>
                                            </div>
                                            {event_line(&bulletin).map(|line| view! { <p class="event-line">{line}</p> })}
                                            <p>{excerpt(&bulletin.content)}</p>
                                        </article>
                                    }
                                })
                                .collect_view()}
                        </div>
                    }
                        .into_any()
                }
            }
        }}
    }
}

#[component]
pub fn BulletinDetailPage() -> impl IntoView {
    #[allow(unused_variables)]
    let auth = use_auth();
    let params = use_params_map();
    #[allow(unused_variables)]
    let bulletinId = move || {
        params
            .with(|p| p.get("id").map(|id| id.to_string()))
            .and_then(|id| id.parse::<u64>().ok())
    };
    #[allow(unused_variables)]
    let (bulletin, setBulletin) = signal(Option::<Result<Bulletin, String>>::None);

    #[cfg(feature = "hydrate")]
    {
        let api = auth.api();
        Effect::new(move |_| {
            let api = api.clone();
            let id = bulletinId();
            setBulletin.set(None);
            wasm_bindgen_futures::spawn_local(async move {
                let result = match id {
                    Some(id) => api.get_bulletin(id).await.map_err(|e| e.to_string()),
                    None => Err("Unknown bulletin".to_string()),
                };
                setBulletin.set(Some(result));
            });
        });
    }

    view! {
        <A href="/bulletin">"\u{2190} Back to bulletin"</A>
        {move || match bulletin.get() {
            None => view! { <div class="loading"><div class="spinner"></div></div> }.into_any(),
            Some(Err(e)) => view! { <div class="card"><p class="login-error">{e}</p></div> }.into_any(),
            Some(Ok(item)) => {
                view! {
                    <article class="card bulletin-detail">
                        {item.image_url.clone().map(|src| view! { <img src=src alt=item.title.clone() /> })}
                        <h1>{item.title.clone()}</h1>
                        {event_line(&item).map(|line| view! { <p class="event-line">{line}</p> })}
                        <p>{item.content.clone().unwrap_or_default()}</p>
                    </article>
                }
                    .into_any()
            }
        }}
    }
}
