use boxcraft_client::listing::{filter_items, ProductFilter};
use boxcraft_client::paginate;
use boxcraft_client::screen::PRODUCTS_PAGE_SIZE;
use boxcraft_types::Product;
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;

use crate::components::pager::Pager;
use crate::pages::format_price;
use crate::session::use_auth;

#[component]
pub fn ProductsPage() -> impl IntoView {
    #[allow(unused_variables)]
    let auth = use_auth();
    #[allow(unused_variables)]
    let (products, setProducts) = signal(Option::<Result<Vec<Product>, String>>::None);
    #[allow(unused_variables)]
    let (categories, setCategories) = signal(Vec::<String>::new());
    let search = RwSignal::new(String::new());
    let category = RwSignal::new(String::new());
    let page = RwSignal::new(1usize);

    #[cfg(feature = "hydrate")]
    {
        use boxcraft_client::listing::distinct_categories;
        use wasm_bindgen_futures::spawn_local;

        let api = auth.api();
        spawn_local(async move {
            let result = api.list_products().await.map_err(|e| e.to_string());
            let fallback = result
                .as_ref()
                .map(|list| distinct_categories(list))
                .unwrap_or_default();
            setProducts.set(Some(result));

            match api.product_categories().await {
                Ok(list) if !list.is_empty() => setCategories.set(list),
                _ => setCategories.set(fallback),
            }
        });
    }

    let currentPage = move || {
        let filter = ProductFilter {
            search: search.get(),
            category: Some(category.get()),
        };
        products.get().map(|result| {
            result.map(|list| paginate(&filter_items(&list, &filter), page.get(), PRODUCTS_PAGE_SIZE))
        })
    };

    view! {
        <div class="page-header">
            <h1>"Products"</h1>
            <p class="subtitle">"Stock designs we produce in volume. Everything can be customised."</p>
        </div>
        <div class="toolbar">
            <input
                type="search"
                placeholder="Search products"
                prop:value=move || search.get()
                on:input=move |ev| {
                    search.set(event_target_value(&ev));
                    page.set(1);
                }
            />
            <select
                prop:value=move || category.get()
                on:change=move |ev| {
                    category.set(event_target_value(&ev));
                    page.set(1);
                }
            >
                <option value="">"All categories"</option>
                {move || {
                    categories
                        .get()
                        .into_iter()
                        .map(|name| {
                            let value = name.clone();
                            view! { <option value=value>{name}</option> }
                        })
                        .collect_view()
                }}
            </select>
        </div>
        {move || match currentPage() {
            None => {
                view! {
                    <div class="loading">
                        <div class="spinner"></div>
                        "Loading products..."
                    </div>
                }
                    .into_any()
            }
            Some(Err(e)) => {
                view! {
                    <div class="card">
                        <p class="login-error">"Failed to load products: " {e}</p>
                    </div>
                }
                    .into_any()
            }
            Some(Ok(current)) if current.items.is_empty() => {
                view! {
                    <div class="card">
                        <p>"No products match your search."</p>
                    </div>
                }
                    .into_any()
            }
            Some(Ok(current)) => {
                let summary = format!(
                    "Showing {}\u{2013}{} of {}",
                    current.first_position(),
                    current.last_position(),
                    current.total_items,
                );
                let totalPages = current.total_pages;
                let shownPage = current.page;
                view! {
                    <div class="product-grid">
                        {current
                            .items
                            .into_iter()
                            .map(|product| view! { <ProductCard product=product /> })
                            .collect_view()}
                    </div>
                    <Pager
                        page=Signal::derive(move || shownPage)
                        total_pages=Signal::derive(move || totalPages)
                        summary=Signal::derive(move || summary.clone())
                        on_change=Callback::new(move |next: usize| page.set(next))
                    />
                }
                    .into_any()
            }
        }}
    }
}

#[component]
fn ProductCard(product: Product) -> impl IntoView {
    let href = format!("/products/{}", product.id);
    let name = product.name.clone();
    view! {
        <div class="card product-card">
            {product.image_url.clone().map(|src| view! { <img src=src alt=product.name.clone() /> })}
            <div class="card-title">
                <A href=href>{name}</A>
            </div>
            {product.category.clone().map(|c| view! { <span class="badge">{c}</span> })}
            <div class="product-price">{format_price(product.price)}</div>
        </div>
    }
}

#[component]
pub fn ProductDetailPage() -> impl IntoView {
    #[allow(unused_variables)]
    let auth = use_auth();
    let params = use_params_map();
    #[allow(unused_variables)]
    let productId = move || {
        params
            .with(|p| p.get("id").map(|id| id.to_string()))
            .and_then(|id| id.parse::<u64>().ok())
    };
    #[allow(unused_variables)]
    let (product, setProduct) = signal(Option::<Result<Product, String>>::None);

    #[cfg(feature = "hydrate")]
    {
        let api = auth.api();
        Effect::new(move |_| {
            let api = api.clone();
            let id = productId();
            setProduct.set(None);
            wasm_bindgen_futures::spawn_local(async move {
                let result = match id {
                    Some(id) => api.get_product(id).await.map_err(|e| e.to_string()),
                    None => Err("Unknown product".to_string()),
                };
                setProduct.set(Some(result));
            });
        });
    }

    view! {
        <A href="/products">"\u{2190} All products"</A>
        {move || match product.get() {
            None => {
                view! {
                    <div class="loading">
                        <div class="spinner"></div>
                        "Loading product..."
                    </div>
                }
                    .into_any()
            }
            Some(Err(e)) => view! { <div class="card"><p class="login-error">{e}</p></div> }.into_any(),
            Some(Ok(product)) => {
                view! {
                    <div class="card product-detail">
                        {product.image_url.clone().map(|src| view! { <img src=src alt=product.name.clone() /> })}
                        <h1>{product.name.clone()}</h1>
                        {product.category.clone().map(|c| view! { <span class="badge">{c}</span> })}
                        <div class="product-price">{format_price(product.price)}</div>
                        {product.stock.map(|s| view! { <p>{format!("{s} in stock")}</p> })}
                        <p>{product.description.clone().unwrap_or_default()}</p>
                        <A href="/contact">"Ask for a quote"</A>
                    </div>
                }
                    .into_any()
            }
        }}
    }
}
