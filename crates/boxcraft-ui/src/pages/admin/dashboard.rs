use boxcraft_client::guard::visible_sections;
use boxcraft_client::AdminSection;
use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::metric_card::MetricCard;
use crate::session::use_auth;

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    let auth = use_auth();
    let userCount = RwSignal::new(Option::<String>::None);
    let productCount = RwSignal::new(Option::<String>::None);
    let bulletinCount = RwSignal::new(Option::<String>::None);

    let sections = auth.role().map(visible_sections).unwrap_or_default();

    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen_futures::spawn_local;

        fn shown<T>(result: Result<Vec<T>, boxcraft_client::ClientError>) -> String {
            match result {
                Ok(list) => list.len().to_string(),
                Err(e) => {
                    tracing::warn!("dashboard count failed: {e}");
                    "\u{2013}".to_string()
                }
            }
        }

        let api = auth.api();
        let wanted = sections.clone();
        spawn_local(async move {
            if wanted.contains(&AdminSection::Users) {
                userCount.set(Some(shown(api.list_users().await)));
            }
            if wanted.contains(&AdminSection::Products) {
                productCount.set(Some(shown(api.list_products().await)));
            }
            if wanted.contains(&AdminSection::Bulletins) {
                bulletinCount.set(Some(shown(api.list_bulletins().await)));
            }
        });
    }

    let session = auth.session;
    let greeting = move || {
        session
            .with(|s| s.user.as_ref().map(|u| format!("Welcome back, {}", u.name)))
            .unwrap_or_default()
    };
    let roleLabel = move || session.with(|s| s.role()).map(|r| r.label()).unwrap_or_default();

    let cards = sections
        .into_iter()
        .filter_map(|section| {
            let value = match section {
                AdminSection::Users => userCount,
                AdminSection::Products => productCount,
                AdminSection::Bulletins => bulletinCount,
                AdminSection::Dashboard => return None,
            };
            Some(view! {
                <MetricCard title=section.title().to_string() value=value>
                    <A href=section.path()>"Manage"</A>
                </MetricCard>
            })
        })
        .collect_view();

    view! {
        <div class="dashboard-header">
            <h1>"Dashboard"</h1>
            <p class="subtitle">{greeting} " \u{00B7} " {roleLabel}</p>
        </div>
        <div class="dashboard-grid">{cards}</div>
    }
}
