//! Catalog query engine
//!
//! Turns the fetched product list plus the menu's filter criteria into the
//! exact page of items to render. Everything here is a pure function of
//! `(products, query)`.
//!
//! Pipeline: text filter -> category filter -> stable sort -> paginate.

use crate::models::{CategoryFilter, Product};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Items per menu page
pub const DEFAULT_PAGE_SIZE: usize = 8;

/// Sort key for the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// By `created_at`; products without a timestamp rank as oldest
    #[default]
    Newest,
    Price,
    Views,
}

impl SortKey {
    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortKey::Newest => a.created_at.cmp(&b.created_at),
            SortKey::Price => a.price.cmp(&b.price),
            SortKey::Views => a.views.cmp(&b.views),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortOrder {
    #[serde(rename = "asc")]
    Ascending,
    #[default]
    #[serde(rename = "desc")]
    Descending,
}

impl SortOrder {
    fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}

/// Menu filter criteria
///
/// The setters for search text, category and sort reset the page to 1;
/// only [`CatalogQuery::set_page`] moves between pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    pub search: String,
    pub category: CategoryFilter,
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
    /// 1-based
    pub page: usize,
    pub page_size: usize,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: CategoryFilter::All,
            sort_key: SortKey::default(),
            sort_order: SortOrder::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl CatalogQuery {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Builders ==========

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.set_search(search);
        self
    }

    pub fn with_category(mut self, category: impl Into<CategoryFilter>) -> Self {
        self.set_category(category);
        self
    }

    pub fn with_sort(mut self, key: SortKey, order: SortOrder) -> Self {
        self.set_sort(key, order);
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self.page = 1;
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.set_page(page);
        self
    }

    // ========== Setters ==========

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    pub fn set_category(&mut self, category: impl Into<CategoryFilter>) {
        self.category = category.into();
        self.page = 1;
    }

    pub fn set_sort(&mut self, key: SortKey, order: SortOrder) {
        self.sort_key = key;
        self.sort_order = order;
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    // ========== Evaluation ==========

    /// Text + category predicate
    pub fn matches(&self, product: &Product) -> bool {
        self.category.matches(product.category) && matches_search(product, &self.search)
    }

    /// Filter and sort, without paginating
    pub fn filter<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let mut items: Vec<&Product> = products.iter().filter(|p| self.matches(p)).collect();
        // sort_by is stable: ties keep their input order in both directions
        items.sort_by(|a, b| self.sort_order.apply(self.sort_key.compare(a, b)));
        items
    }

    /// Full pipeline: the page of items to render
    pub fn apply<'a>(&self, products: &'a [Product]) -> CatalogPage<'a> {
        let filtered = self.filter(products);
        let total = filtered.len();
        let (items, page, total_pages) = paginate(filtered, self.page, self.page_size);
        CatalogPage {
            items,
            total,
            page,
            page_size: effective_page_size(self.page_size),
            total_pages,
        }
    }
}

/// Case-insensitive substring match against name and description.
/// A blank search term matches everything.
pub fn matches_search(product: &Product, search: &str) -> bool {
    let needle = search.trim();
    if needle.is_empty() {
        return true;
    }
    let needle = needle.to_lowercase();
    product.name.to_lowercase().contains(&needle)
        || product.description.to_lowercase().contains(&needle)
}

/// Total pages for `total` items, `ceil(total / page_size)`
pub fn total_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(effective_page_size(page_size))
}

fn effective_page_size(page_size: usize) -> usize {
    page_size.max(1)
}

/// Slice `items` down to one page.
///
/// Returns `(page_items, effective_page, total_pages)`. Page 0 is read as
/// page 1; a page past the end yields no items.
pub fn paginate<T>(items: Vec<T>, page: usize, page_size: usize) -> (Vec<T>, usize, usize) {
    let page_size = effective_page_size(page_size);
    let page = page.max(1);
    let pages = total_pages(items.len(), page_size);

    if page > pages {
        return (Vec::new(), page, pages);
    }

    let start = (page - 1) * page_size;
    let slice = items.into_iter().skip(start).take(page_size).collect();
    (slice, page, pages)
}

/// One rendered page of the menu
#[derive(Debug, Clone, Serialize)]
pub struct CatalogPage<'a> {
    pub items: Vec<&'a Product>,
    /// Matches across all pages
    pub total: usize,
    /// 1-based page actually shown
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

impl CatalogPage<'_> {
    /// "No results" state
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1 && self.total_pages > 0
    }
}
