use boxcraft_client::listing::{distinct_categories, ProductFilter};
use boxcraft_client::screen::{CrudScreen, Products};
use boxcraft_types::{Product, ProductDraft};
use leptos::prelude::*;

use super::{confirm, screen_error, spawn_screen_task, FormMode};
use crate::components::pager::Pager;
use crate::components::toast::use_toasts;
use crate::pages::{format_price, optional_text};
use crate::session::use_auth;

#[derive(Clone, Debug, Default, PartialEq)]
struct ProductForm {
    name: String,
    description: String,
    price: String,
    stock: String,
    category: String,
}

impl From<&Product> for ProductForm {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone().unwrap_or_default(),
            price: product.price.map(|p| p.to_string()).unwrap_or_default(),
            stock: product.stock.map(|s| s.to_string()).unwrap_or_default(),
            category: product.category.clone().unwrap_or_default(),
        }
    }
}

impl ProductForm {
    /// Draft without the image; the file input is read when saving.
    fn to_draft(&self) -> Result<ProductDraft, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Product name is required".into());
        }
        let price = optional_text(&self.price)
            .map(|p| p.replace(',', "").parse::<f64>())
            .transpose()
            .map_err(|_| "Price must be a number".to_string())?;
        if price.is_some_and(|p| p < 0.0) {
            return Err("Price cannot be negative".into());
        }
        let stock = optional_text(&self.stock)
            .map(|s| s.parse::<i64>())
            .transpose()
            .map_err(|_| "Stock must be a whole number".to_string())?;

        Ok(ProductDraft {
            name: name.to_string(),
            description: optional_text(&self.description),
            price,
            stock,
            category: optional_text(&self.category),
            image: None,
        })
    }
}

#[component]
pub fn AdminProductsPage() -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toasts();
    let screen = RwSignal::new(CrudScreen::<Products>::new(auth.api()));
    let mode = RwSignal::new(Option::<FormMode>::None);
    let form = RwSignal::new(ProductForm::default());
    let formError = RwSignal::new(Option::<String>::None);
    let imageInput = NodeRef::<leptos::html::Input>::new();

    spawn_screen_task(screen, toasts, None, |mut s| async move {
        let result = s.refresh().await;
        (s, result)
    });

    let updateFilter = move |change: &dyn Fn(&mut ProductFilter)| {
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
        #[allow(unused_mut)]
        let mut draft = match form.get_untracked().to_draft() {
            Ok(draft) => draft,
            Err(message) => {
                formError.set(Some(message));
                return;
            }
        };
        // Grab the element before the form unmounts.
        #[cfg(feature = "hydrate")]
        let picked = imageInput.get_untracked();
        formError.set(None);
        mode.set(None);

        let success = match current {
            FormMode::Create => "Product created",
            FormMode::Edit(_) => "Product updated",
        };
        spawn_screen_task(screen, toasts, Some(success), move |mut s| async move {
            #[cfg(feature = "hydrate")]
            {
                if let Some(input) = picked {
                    match crate::browser::read_image(&input).await {
                        Ok(image) => draft.image = image,
                        Err(e) => return (s, Err(boxcraft_client::ClientError::Invalid(e))),
                    }
                }
            }
            let result = match current {
                FormMode::Create => s.create(&draft).await,
                FormMode::Edit(id) => s.update(id, &draft).await,
            };
            (s, result)
        });
    };

    let categories = move || screen.with(|s| distinct_categories(s.records()));

    let rows = move || {
        screen.with(|s| {
            if !s.is_loaded() {
                return view! { <tr><td colspan="5">"Loading products..."</td></tr> }.into_any();
            }
            let page = s.visible();
            if page.items.is_empty() {
                return view! { <tr><td colspan="5">"No products match the filters."</td></tr> }.into_any();
            }
            page.items
                .into_iter()
                .map(|product| {
                    let id = product.id;
                    let editing = ProductForm::from(&product);
                    let name = product.name.clone();
                    view! {
                        <tr>
                            <td>
                                {product.image_url.clone().map(|src| view! { <img class="thumb" src=src alt="" /> })}
                                {product.name.clone()}
                            </td>
                            <td>{product.category.clone().unwrap_or_default()}</td>
                            <td>{format_price(product.price)}</td>
                            <td>{product.stock.map(|s| s.to_string()).unwrap_or_else(|| "\u{2013}".to_string())}</td>
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
                                            spawn_screen_task(screen, toasts, Some("Product deleted"), move |mut s| async move {
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

    let pager = move || {
        let page = screen.with(|s| s.visible());
        let summary = format!(
            "Showing {}\u{2013}{} of {}",
            page.first_position(),
            page.last_position(),
            page.total_items,
        );
        let shownPage = page.page;
        let totalPages = page.total_pages;
        view! {
            <Pager
                page=Signal::derive(move || shownPage)
                total_pages=Signal::derive(move || totalPages)
                summary=Signal::derive(move || summary.clone())
                on_change=Callback::new(move |next: usize| screen.update(|s| s.set_page(next)))
            />
        }
    };

    view! {
        <div class="dashboard-header">
            <h1>"Products"</h1>
            <button
                class="btn btn-primary"
                on:click=move |_| {
                    form.set(ProductForm::default());
                    formError.set(None);
                    mode.set(Some(FormMode::Create));
                }
            >
                "New product"
            </button>
        </div>

        <div class="toolbar">
            <input
                type="search"
                placeholder="Search products"
                prop:value=move || screen.with(|s| s.filter().search.clone())
                on:input=move |ev| {
                    let text = event_target_value(&ev);
                    updateFilter(&|f: &mut ProductFilter| f.search = text.clone());
                }
            />
            <select on:change=move |ev| {
                let category = optional_text(&event_target_value(&ev));
                updateFilter(&|f: &mut ProductFilter| f.category = category.clone());
            }>
                <option value="">"All categories"</option>
                {move || {
                    categories()
                        .into_iter()
                        .map(|name| {
                            let value = name.clone();
                            view! { <option value=value>{name}</option> }
                        })
                        .collect_view()
                }}
            </select>
        </div>

        {screen_error(screen)}

        {move || mode.get().map(|current| view! {
            <form class="card record-form" on:submit=handleSubmit>
                <div class="card-title">{current.heading("product")}</div>
                {move || formError.get().map(|message| view! { <div class="login-error">{message}</div> })}
                <div class="form-group">
                    <label>"Name"</label>
                    <input type="text"
                        prop:value=move || form.with(|f| f.name.clone())
                        on:input=move |ev| form.update(|f| f.name = event_target_value(&ev)) />
                </div>
                <div class="form-group">
                    <label>"Category"</label>
                    <input type="text"
                        prop:value=move || form.with(|f| f.category.clone())
                        on:input=move |ev| form.update(|f| f.category = event_target_value(&ev)) />
                </div>
                <div class="form-row">
                    <div class="form-group">
                        <label>"Price"</label>
                        <input type="text" inputmode="decimal"
                            prop:value=move || form.with(|f| f.price.clone())
                            on:input=move |ev| form.update(|f| f.price = event_target_value(&ev)) />
                    </div>
                    <div class="form-group">
                        <label>"Stock"</label>
                        <input type="number"
                            prop:value=move || form.with(|f| f.stock.clone())
                            on:input=move |ev| form.update(|f| f.stock = event_target_value(&ev)) />
                    </div>
                </div>
                <div class="form-group">
                    <label>"Description"</label>
                    <textarea rows="4"
                        prop:value=move || form.with(|f| f.description.clone())
                        on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))></textarea>
                </div>
                <div class="form-group">
                    <label>"Image"</label>
                    <input type="file" accept="image/*" node_ref=imageInput />
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
                        <th>"Product"</th>
                        <th>"Category"</th>
                        <th>"Price"</th>
                        <th>"Stock"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
            {pager}
        </div>
    }
}
