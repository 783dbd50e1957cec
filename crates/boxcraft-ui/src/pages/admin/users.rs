use boxcraft_client::listing::UserFilter;
use boxcraft_client::screen::{CrudScreen, Users};
use boxcraft_types::{Role, User, UserDraft, UserStatus};
use leptos::prelude::*;

use super::{confirm, screen_error, spawn_screen_task, FormMode};
use crate::components::toast::use_toasts;
use crate::pages::optional_text;
use crate::session::use_auth;

#[derive(Clone, Debug, Default, PartialEq)]
struct UserForm {
    name: String,
    email: String,
    password: String,
    role: Role,
    status: UserStatus,
}

impl From<&User> for UserForm {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            password: String::new(),
            role: user.role,
            status: user.status,
        }
    }
}

impl UserForm {
    fn to_draft(&self, creating: bool) -> Result<UserDraft, String> {
        let name = self.name.trim();
        let email = self.email.trim();
        if name.is_empty() || email.is_empty() {
            return Err("Name and email are required".into());
        }
        let password = optional_text(&self.password);
        if creating && password.is_none() {
            return Err("A password is required for new users".into());
        }
        Ok(UserDraft {
            name: name.to_string(),
            email: email.to_string(),
            password,
            role: self.role,
            status: self.status,
        })
    }
}

#[component]
pub fn AdminUsersPage() -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toasts();
    let screen = RwSignal::new(CrudScreen::<Users>::new(auth.api()));
    let mode = RwSignal::new(Option::<FormMode>::None);
    let form = RwSignal::new(UserForm::default());
    let formError = RwSignal::new(Option::<String>::None);

    spawn_screen_task(screen, toasts, None, |mut s| async move {
        let result = s.refresh().await;
        (s, result)
    });

    let updateFilter = move |change: &dyn Fn(&mut UserFilter)| {
        screen.update(|s| {
            let mut filter = s.filter().clone();
            change(&mut filter);
            s.set_filter(filter);
        });
    };

    let handleSubmit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let Some(current) = mode.get_untracked() else {
            return;
        };
        let draft = match form.get_untracked().to_draft(current == FormMode::Create) {
            Ok(draft) => draft,
            Err(message) => {
                formError.set(Some(message));
                return;
            }
        };
        formError.set(None);
        mode.set(None);
        match current {
            FormMode::Create => spawn_screen_task(screen, toasts, Some("User created"), move |mut s| async move {
                let result = s.create(&draft).await;
                (s, result)
            }),
            FormMode::Edit(id) => spawn_screen_task(screen, toasts, Some("User updated"), move |mut s| async move {
                let result = s.update(id, &draft).await;
                (s, result)
            }),
        }
    };

    let rows = move || {
        screen.with(|s| {
            if !s.is_loaded() {
                return view! { <tr><td colspan="5">"Loading users..."</td></tr> }.into_any();
            }
            let page = s.visible();
            if page.items.is_empty() {
                return view! { <tr><td colspan="5">"No users match the filters."</td></tr> }.into_any();
            }
            page.items
                .into_iter()
                .map(|user| {
                    let id = user.id;
                    let editing = UserForm::from(&user);
                    let name = user.name.clone();
                    view! {
                        <tr>
                            <td>{user.name.clone()}</td>
                            <td>{user.email.clone()}</td>
                            <td><span class="badge">{user.role.label()}</span></td>
                            <td>{user.status.as_str()}</td>
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
                                        if confirm(&format!("Delete {name}?")) {
                                            spawn_screen_task(screen, toasts, Some("User deleted"), move |mut s| async move {
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
            <h1>"Users"</h1>
            <button
                class="btn btn-primary"
                on:click=move |_| {
                    form.set(UserForm::default());
                    formError.set(None);
                    mode.set(Some(FormMode::Create));
                }
            >
                "New user"
            </button>
        </div>

        <div class="toolbar">
            <input
                type="search"
                placeholder="Search name or email"
                prop:value=move || screen.with(|s| s.filter().search.clone())
                on:input=move |ev| {
                    let text = event_target_value(&ev);
                    updateFilter(&|f: &mut UserFilter| f.search = text.clone());
                }
            />
            <select on:change=move |ev| {
                let role = event_target_value(&ev).parse::<Role>().ok();
                updateFilter(&|f: &mut UserFilter| f.role = role);
            }>
                <option value="">"All roles"</option>
                {Role::ALL
                    .into_iter()
                    .map(|role| view! { <option value=role.as_str()>{role.label()}</option> })
                    .collect_view()}
            </select>
            <select on:change=move |ev| {
                let status = event_target_value(&ev).parse::<UserStatus>().ok();
                updateFilter(&|f: &mut UserFilter| f.status = status);
            }>
                <option value="">"Any status"</option>
                {UserStatus::ALL
                    .into_iter()
                    .map(|status| view! { <option value=status.as_str()>{status.as_str()}</option> })
                    .collect_view()}
            </select>
        </div>

        {screen_error(screen)}

        {move || mode.get().map(|current| view! {
            <form class="card record-form" on:submit=handleSubmit>
                <div class="card-title">{current.heading("user")}</div>
                {move || formError.get().map(|message| view! { <div class="login-error">{message}</div> })}
                <div class="form-group">
                    <label>"Name"</label>
                    <input type="text"
                        prop:value=move || form.with(|f| f.name.clone())
                        on:input=move |ev| form.update(|f| f.name = event_target_value(&ev)) />
                </div>
                <div class="form-group">
                    <label>"Email"</label>
                    <input type="email"
                        prop:value=move || form.with(|f| f.email.clone())
                        on:input=move |ev| form.update(|f| f.email = event_target_value(&ev)) />
                </div>
                <div class="form-group">
                    <label>
                        {if current == FormMode::Create { "Password" } else { "New password (leave blank to keep)" }}
                    </label>
                    <input type="password"
                        prop:value=move || form.with(|f| f.password.clone())
                        on:input=move |ev| form.update(|f| f.password = event_target_value(&ev)) />
                </div>
                <div class="form-group">
                    <label>"Role"</label>
                    <select
                        prop:value=move || form.with(|f| f.role.as_str().to_string())
                        on:change=move |ev| {
                            if let Ok(role) = event_target_value(&ev).parse::<Role>() {
                                form.update(|f| f.role = role);
                            }
                        }
                    >
                        {Role::ALL
                            .into_iter()
                            .map(|role| view! { <option value=role.as_str()>{role.label()}</option> })
                            .collect_view()}
                    </select>
                </div>
                <div class="form-group">
                    <label>"Status"</label>
                    <select
                        prop:value=move || form.with(|f| f.status.as_str().to_string())
                        on:change=move |ev| {
                            if let Ok(status) = event_target_value(&ev).parse::<UserStatus>() {
                                form.update(|f| f.status = status);
                            }
                        }
                    >
                        {UserStatus::ALL
                            .into_iter()
                            .map(|status| view! { <option value=status.as_str()>{status.as_str()}</option> })
                            .collect_view()}
                    </select>
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
                        <th>"Name"</th>
                        <th>"Email"</th>
                        <th>"Role"</th>
                        <th>"Status"</th>
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
    fn new_users_need_a_password() {
        let form = UserForm {
            name: "Sari".into(),
            email: "sari@example.com".into(),
            ..UserForm::default()
        };
        assert!(form.to_draft(true).is_err());

        let draft = form.to_draft(false).unwrap();
        assert_eq!(draft.password, None);
        assert_eq!(draft.role, Role::User);
    }

    #[test]
    fn fields_are_trimmed() {
        let form = UserForm {
            name: "  Sari ".into(),
            email: " sari@example.com".into(),
            password: "hunter22".into(),
            role: Role::HrUser,
            status: UserStatus::Suspended,
        };
        let draft = form.to_draft(true).unwrap();
        assert_eq!(draft.name, "Sari");
        assert_eq!(draft.email, "sari@example.com");
        assert_eq!(draft.password.as_deref(), Some("hunter22"));
        assert_eq!(draft.status, UserStatus::Suspended);
    }
}
