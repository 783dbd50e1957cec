use std::marker::PhantomData;

use boxcraft_types::{Bulletin, BulletinDraft, Product, ProductDraft, User, UserDraft};
use tracing::warn;

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::listing::{filter_items, paginate, BulletinFilter, Filter, Page, ProductFilter, UserFilter};

pub const PRODUCTS_PAGE_SIZE: usize = 10;

/// A backend collection managed from an admin screen.
#[allow(async_fn_in_trait)]
pub trait CrudResource: 'static {
    type Record: Clone + Send + Sync + 'static;
    type Draft;
    type Filter: Filter<Self::Record> + Clone + Default + Send + Sync + 'static;

    const LABEL: &'static str;
    /// Page size for client-side paging; `None` shows the whole filtered list.
    const PAGE_SIZE: Option<usize> = None;

    async fn fetch_all(api: &ApiClient) -> Result<Vec<Self::Record>, ClientError>;
    async fn create(api: &ApiClient, draft: &Self::Draft) -> Result<(), ClientError>;
    async fn update(api: &ApiClient, id: u64, draft: &Self::Draft) -> Result<(), ClientError>;
    async fn delete(api: &ApiClient, id: u64) -> Result<(), ClientError>;
}

pub struct Users;
pub struct Products;
pub struct Bulletins;

impl CrudResource for Users {
    type Record = User;
    type Draft = UserDraft;
    type Filter = UserFilter;

    const LABEL: &'static str = "users";

    async fn fetch_all(api: &ApiClient) -> Result<Vec<User>, ClientError> {
        api.list_users().await
    }

    async fn create(api: &ApiClient, draft: &UserDraft) -> Result<(), ClientError> {
        api.create_user(draft).await
    }

    async fn update(api: &ApiClient, id: u64, draft: &UserDraft) -> Result<(), ClientError> {
        api.update_user(id, draft).await
    }

    async fn delete(api: &ApiClient, id: u64) -> Result<(), ClientError> {
        api.delete_user(id).await
    }
}

impl CrudResource for Products {
    type Record = Product;
    type Draft = ProductDraft;
    type Filter = ProductFilter;

    const LABEL: &'static str = "products";
    const PAGE_SIZE: Option<usize> = Some(PRODUCTS_PAGE_SIZE);

    async fn fetch_all(api: &ApiClient) -> Result<Vec<Product>, ClientError> {
        api.list_products().await
    }

    async fn create(api: &ApiClient, draft: &ProductDraft) -> Result<(), ClientError> {
        api.create_product(draft).await
    }

    async fn update(api: &ApiClient, id: u64, draft: &ProductDraft) -> Result<(), ClientError> {
        api.update_product(id, draft).await
    }

    async fn delete(api: &ApiClient, id: u64) -> Result<(), ClientError> {
        api.delete_product(id).await
    }
}

impl CrudResource for Bulletins {
    type Record = Bulletin;
    type Draft = BulletinDraft;
    type Filter = BulletinFilter;

    const LABEL: &'static str = "bulletins";

    async fn fetch_all(api: &ApiClient) -> Result<Vec<Bulletin>, ClientError> {
        api.list_bulletins().await
    }

    async fn create(api: &ApiClient, draft: &BulletinDraft) -> Result<(), ClientError> {
        api.create_bulletin(draft).await
    }

    async fn update(api: &ApiClient, id: u64, draft: &BulletinDraft) -> Result<(), ClientError> {
        api.update_bulletin(id, draft).await
    }

    async fn delete(api: &ApiClient, id: u64) -> Result<(), ClientError> {
        api.delete_bulletin(id).await
    }
}

/// List state behind an admin screen: the full fetched collection, the
/// current filter and page, and the last error. Every mutation re-fetches the
/// whole list; whichever fetch finishes last wins.
pub struct CrudScreen<R: CrudResource> {
    api: ApiClient,
    records: Vec<R::Record>,
    filter: R::Filter,
    page: usize,
    loaded: bool,
    error: Option<String>,
    _resource: PhantomData<fn() -> R>,
}

impl<R: CrudResource> Clone for CrudScreen<R> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            records: self.records.clone(),
            filter: self.filter.clone(),
            page: self.page,
            loaded: self.loaded,
            error: self.error.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: CrudResource> CrudScreen<R> {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            records: Vec::new(),
            filter: R::Filter::default(),
            page: 1,
            loaded: false,
            error: None,
            _resource: PhantomData,
        }
    }

    pub fn records(&self) -> &[R::Record] {
        &self.records
    }

    pub fn filter(&self) -> &R::Filter {
        &self.filter
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Replaces the filter and goes back to the first page.
    pub fn set_filter(&mut self, filter: R::Filter) {
        self.filter = filter;
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Filtered records for the current page.
    pub fn visible(&self) -> Page<R::Record> {
        let filtered = filter_items(&self.records, &self.filter);
        match R::PAGE_SIZE {
            Some(size) => paginate(&filtered, self.page, size),
            None => {
                let size = filtered.len().max(1);
                paginate(&filtered, 1, size)
            }
        }
    }

    /// Takes the records and error from a copy that ran an async operation,
    /// keeping this screen's filter and page.
    pub fn absorb(&mut self, finished: CrudScreen<R>) {
        self.records = finished.records;
        self.loaded = finished.loaded;
        self.error = finished.error;
    }

    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        match R::fetch_all(&self.api).await {
            Ok(records) => {
                self.records = records;
                self.loaded = true;
                self.error = None;
                Ok(())
            }
            Err(e) => Err(self.record_error("load", e)),
        }
    }

    pub async fn create(&mut self, draft: &R::Draft) -> Result<(), ClientError> {
        if let Err(e) = R::create(&self.api, draft).await {
            return Err(self.record_error("create", e));
        }
        self.refresh().await
    }

    pub async fn update(&mut self, id: u64, draft: &R::Draft) -> Result<(), ClientError> {
        if let Err(e) = R::update(&self.api, id, draft).await {
            return Err(self.record_error("update", e));
        }
        self.refresh().await
    }

    pub async fn delete(&mut self, id: u64) -> Result<(), ClientError> {
        if let Err(e) = R::delete(&self.api, id).await {
            return Err(self.record_error("delete", e));
        }
        self.refresh().await
    }

    fn record_error(&mut self, action: &str, error: ClientError) -> ClientError {
        warn!("failed to {action} {}: {error}", R::LABEL);
        self.error = Some(error.to_string());
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::navigate::RecordingNavigator;
    use crate::session::SessionContext;
    use crate::storage::MemoryStore;
    use std::sync::Arc;

    fn offline_api() -> ApiClient {
        ApiClient::new(
            ClientConfig::default(),
            SessionContext::init(Arc::new(MemoryStore::new())),
            Arc::new(RecordingNavigator::new()),
        )
    }

    fn product(id: u64, category: &str) -> Product {
        Product {
            id,
            name: format!("Item {id}"),
            description: None,
            price: None,
            stock: None,
            category: Some(category.into()),
            image_url: None,
            created_at: None,
        }
    }

    #[test]
    fn filter_change_resets_page() {
        let mut screen = CrudScreen::<Products>::new(offline_api());
        screen.records = (1..=25).map(|id| product(id, if id % 2 == 0 { "Even" } else { "Odd" })).collect();

        screen.set_page(3);
        assert_eq!(screen.visible().items.len(), 5);

        screen.set_filter(ProductFilter {
            category: Some("Odd".into()),
            ..ProductFilter::default()
        });
        let page = screen.visible();
        assert_eq!(page.page, 1);
        assert_eq!(page.total_items, 13);
        assert_eq!(page.items.first().map(|p| p.id), Some(1));
    }

    #[test]
    fn absorb_keeps_local_filter() {
        let mut live = CrudScreen::<Products>::new(offline_api());
        let mut finished = live.clone();
        finished.records = vec![product(1, "Rigid"), product(2, "Corrugated")];
        finished.loaded = true;
        finished.error = Some("stale".into());

        live.set_filter(ProductFilter {
            category: Some("Rigid".into()),
            ..ProductFilter::default()
        });
        live.absorb(finished);

        assert!(live.is_loaded());
        assert_eq!(live.error(), Some("stale"));
        assert_eq!(live.visible().items.len(), 1);
        live.clear_error();
        assert_eq!(live.error(), None);
    }

    #[test]
    fn unpaged_resources_show_everything() {
        let mut screen = CrudScreen::<Bulletins>::new(offline_api());
        screen.records = (1..=30)
            .map(|id| Bulletin {
                id,
                title: format!("News {id}"),
                content: None,
                category: None,
                event_date: None,
                event_location: None,
                image_url: None,
                created_at: None,
            })
            .collect();

        let page = screen.visible();
        assert_eq!(page.items.len(), 30);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.items.last().map(|b| b.title.as_str()), Some("News 30"));
    }
}
