use boxcraft_types::{Bulletin, Product, Role, User, UserStatus};

pub trait Filter<T> {
    fn matches(&self, item: &T) -> bool;
}

pub fn filter_items<T: Clone, F: Filter<T>>(items: &[T], filter: &F) -> Vec<T> {
    items
        .iter()
        .filter(|item| filter.matches(item))
        .cloned()
        .collect()
}

/// One page of a client-side paginated list. Pages are 1-based.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// 1-based position of the first item shown, 0 when empty.
    pub fn first_position(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.page - 1) * self.page_size + 1
        }
    }

    pub fn last_position(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            self.first_position() + self.items.len() - 1
        }
    }
}

/// Slices `items` into pages of `page_size`; out-of-range pages are clamped.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let pageSize = page_size.max(1);
    let totalItems = items.len();
    let totalPages = totalItems.div_ceil(pageSize).max(1);
    let page = page.clamp(1, totalPages);

    let start = (page - 1) * pageSize;
    let end = (start + pageSize).min(totalItems);

    Page {
        items: items.get(start..end).map(<[T]>::to_vec).unwrap_or_default(),
        page,
        page_size: pageSize,
        total_items: totalItems,
        total_pages: totalPages,
    }
}

fn matches_text(needle: &str, fields: &[Option<&str>]) -> bool {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    fields
        .iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
}

fn same_category(wanted: &Option<String>, actual: &Option<String>) -> bool {
    match wanted.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        None => true,
        Some(wanted) => actual
            .as_deref()
            .is_some_and(|actual| actual.trim().eq_ignore_ascii_case(wanted)),
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserFilter {
    pub search: String,
    pub role: Option<Role>,
    pub status: Option<UserStatus>,
}

impl Filter<User> for UserFilter {
    fn matches(&self, user: &User) -> bool {
        self.role.map_or(true, |role| user.role == role)
            && self.status.map_or(true, |status| user.status == status)
            && matches_text(&self.search, &[Some(user.name.as_str()), Some(user.email.as_str())])
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductFilter {
    pub search: String,
    pub category: Option<String>,
}

impl Filter<Product> for ProductFilter {
    fn matches(&self, product: &Product) -> bool {
        same_category(&self.category, &product.category)
            && matches_text(
                &self.search,
                &[
                    Some(product.name.as_str()),
                    product.description.as_deref(),
                    product.category.as_deref(),
                ],
            )
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct BulletinFilter {
    pub search: String,
    pub category: Option<String>,
}

impl Filter<Bulletin> for BulletinFilter {
    fn matches(&self, bulletin: &Bulletin) -> bool {
        same_category(&self.category, &bulletin.category)
            && matches_text(
                &self.search,
                &[
                    Some(bulletin.title.as_str()),
                    bulletin.content.as_deref(),
                    bulletin.event_location.as_deref(),
                ],
            )
    }
}

/// Distinct product categories in first-seen order, for when the categories
/// endpoint is unavailable.
pub fn distinct_categories(products: &[Product]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for category in products.iter().filter_map(|p| p.category.as_deref()) {
        let category = category.trim();
        if category.is_empty() || categories.iter().any(|c| c.eq_ignore_ascii_case(category)) {
            continue;
        }
        categories.push(category.to_string());
    }
    categories
}
