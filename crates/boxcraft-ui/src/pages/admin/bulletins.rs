use boxcraft_client::screen::{Bulletins, CrudScreen};
use boxcraft_types::{Bulletin, BulletinDraft};
use leptos::prelude::*;

use super::{confirm, screen_error, spawn_screen_task, FormMode};
use crate::components::toast::use_toasts;
use crate::pages::optional_text;
use crate::session::use_auth;

#[derive(Clone, Debug, Default, PartialEq)]
struct BulletinForm {
    title: String,
    content: String,
    category: String,
    event_date: String,
    event_location: String,
}

impl From<&Bulletin> for BulletinForm {
    fn from(bulletin: &Bulletin) -> Self {
        Self {
            title: bulletin.title.clone(),
            content: bulletin.content.clone().unwrap_or_default(),
            category: bulletin.category.clone().unwrap_or_default(),
            event_date: bulletin.event_date.clone().unwrap_or_default(),
            event_location: bulletin.event_location.clone().unwrap_or_default(),
        }
    }
}

impl BulletinForm {
    fn to_draft(&self) -> Result<BulletinDraft, String> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err("Title is required".into());
        }
        Ok(BulletinDraft {
            title: title.to_string(),
            content: optional_text(&self.content),
            category: optional_text(&self.category),
            event_date: optional_text(&self.event_date),
            event_location: optional_text(&self.event_location),
        })
    }
}

#[component]
pub fn AdminBulletinsPage() -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toasts();
    let screen = RwSignal::new(CrudScreen::<Bulletins>::new(auth.api()));
    let mode = RwSignal::new(Option::<FormMode>::None);
    let form = RwSignal::new(BulletinForm::default());
    let formError = RwSignal::new(Option::<String>::None);

    spawn_screen_task(screen, toasts, None, |mut s| async move {
        let result = s.refresh().await;
        (s, result)
    });

    let handleSubmit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(current) = mode.get_untracked() else {
            return;
        };
        let draft = match form.get_untracked().to_draft() {
            Ok(draft) => draft,
            Err(message) => {
                formError.set(Some(message));
                return;
            }
        };
        formError.set(None);
        mode.set(None);

        let success = match current {
            FormMode::Create => "Bulletin posted",
            FormMode::Edit(_) => "Bulletin updated",
        };
        spawn_screen_task(screen, toasts, Some(success), move |mut s| async move {
            let result = match current {
                FormMode::Create => s.create(&draft).await,
                FormMode::Edit(id) => s.update(id, &draft).await,
            };
            (s, result)
        });
    };

    let rows = move || {
        screen.with(|s| {
            if !s.is_loaded() {
                return view! { <tr><td colspan="4">"Loading bulletins..."</td></tr> }.into_any();
            }
            let page = s.visible();
            if page.items.is_empty() {
                return view! { <tr><td colspan="4">"Nothing posted yet."</td></tr> }.into_any();
            }
            page.items
                .into_iter()
                .map(|bulletin| {
                    let id = bulletin.id;
                    let editing = BulletinForm::from(&bulletin);
                    let title = bulletin.title.clone();
                    view! {
                        <tr>
                            <td>{bulletin.title.clone()}</td>
                            <td>{bulletin.category.clone().unwrap_or_default()}</td>
                            <td>{bulletin.event_date.clone().unwrap_or_default()}</td>
                            <td class="row-actions">
                                <button
                                    class="btn btn-ghost btn-sm"
                                    on:click=move |_| {
                                        form.set(editing.clone());
                                        formError.set(None);
                                        mode.set(Some(FormMode::Edit(id)));
                                    }
                                >
                                    "Edit"
                                </button>
                                <button
                                    class="btn btn-ghost btn-sm"
                                    on:click=move |_| {
                                        if confirm(&format!("Delete \"{title}\"?")) {
                                            spawn_screen_task(screen, toasts, Some("Bulletin deleted"), move |mut s| async move {
                                                let result = s.delete(id).await;
                                                (s, result)
                                            });
                                        }
                                    }
                                >
                                    "Delete"
                                </button>
                            </td>
                        </tr>
                    }
                })
                .collect_view()
                .into_any()
        })
    };

    view! {
        <div class="dashboard-header">
            <h1>"Bulletins"</h1>
            <button
                class="btn btn-primary"
                on:click=move |_| {
                    form.set(BulletinForm::default());
                    formError.set(None);
                    mode.set(Some(FormMode::Create));
                }
            >
                "New bulletin"
            </button>
        </div>

        <div class="toolbar">
            <input
                type="search"
                placeholder="Search bulletins"
                prop:value=move || screen.with(|s| s.filter().search.clone())
                on:input=move |ev| {
                    let text = event_target_value(&ev);
                    screen.update(|s| {
                        let mut filter = s.filter().clone();
                        filter.search = text;
                        s.set_filter(filter);
                    });
                }
            />
        </div>

        {screen_error(screen)}

        {move || mode.get().map(|current| view! {
            <form class="card record-form" on:submit=handleSubmit>
                <div class="card-title">{current.heading("bulletin")}</div>
                {move || formError.get().map(|message| view! { <div class="login-error">{message}</div> })}
                <div class="form-group">
                    <label>"Title"</label>
                    <input type="text"
                        prop:value=move || form.with(|f| f.title.clone())
                        on:input=move |ev| form.update(|f| f.title = event_target_value(&ev)) />
                </div>
                <div class="form-group">
                    <label>"Category"</label>
                    <input type="text"
                        prop:value=move || form.with(|f| f.category.clone())
                        on:input=move |ev| form.update(|f| f.category = event_target_value(&ev)) />
                </div>
                <div class="form-row">
                    <div class="form-group">
                        <label>"Event date"</label>
                        <input type="date"
                            prop:value=move || form.with(|f| f.event_date.clone())
                            on:input=move |ev| form.update(|f| f.event_date = event_target_value(&ev)) />
                    </div>
                    <div class="form-group">
                        <label>"Location"</label>
                        <input type="text"
                            prop:value=move || form.with(|f| f.event_location.clone())
                            on:input=move |ev| form.update(|f| f.event_location = event_target_value(&ev)) />
                    </div>
                </div>
                <div class="form-group">
                    <label>"Content"</label>
                    <textarea rows="6"
                        prop:value=move || form.with(|f| f.content.clone())
                        on:input=move |ev| form.update(|f| f.content = event_target_value(&ev))></textarea>
                </div>
                <div class="form-actions">
                    <button type="submit" class="btn btn-primary">"Save"</button>
                    <button type="button" class="btn btn-ghost" on:click=move |_| mode.set(None)>
                        "Cancel"
                    </button>
                </div>
            </form>
        })}

        <div class="card">
            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Title"</th>
                        <th>"Category"</th>
                        <th>"Event date"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_optional_fields_are_left_out() {
        let form = BulletinForm {
            title: " Open day ".into(),
            event_date: "2026-11-02".into(),
            event_location: "   ".into(),
            ..BulletinForm::default()
        };
        let draft = form.to_draft().unwrap();
        assert_eq!(draft.title, "Open day");
        assert_eq!(draft.event_date.as_deref(), Some("2026-11-02"));
        assert_eq!(draft.event_location, None);
        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            serde_json::json!({"title": "Open day", "event_date": "2026-11-02"})
        );
    }

    #[test]
    fn title_is_required() {
        assert!(BulletinForm::default().to_draft().is_err());
    }
}
