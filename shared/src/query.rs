//! Product service query types

use crate::catalog::{CatalogQuery, SortKey, SortOrder};
use crate::models::Category;
use serde::{Deserialize, Serialize};

/// Query string for the product list endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductListQuery {
    /// 1-based
    pub page: u32,
    pub limit: u32,
    pub order: SortKey,
    pub direction: SortOrder,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl ProductListQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            order: SortKey::default(),
            direction: SortOrder::default(),
            category: None,
            search: None,
        }
    }

    /// Same page and criteria as a menu query
    pub fn from_catalog(query: &CatalogQuery) -> Self {
        let search = query.search.trim();
        Self {
            page: u32::try_from(query.page.max(1)).unwrap_or(u32::MAX),
            limit: u32::try_from(query.page_size.max(1)).unwrap_or(u32::MAX),
            order: query.sort_key,
            direction: query.sort_order,
            category: query.category.category(),
            search: (!search.is_empty()).then(|| search.to_string()),
        }
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }
}

impl Default for ProductListQuery {
    fn default() -> Self {
        Self::new(1, 100)
    }
}

/// Paginated list response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    /// Total record count
    #[serde(default)]
    pub total: u64,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub total_pages: u32,
}

fn default_page() -> u32 {
    1
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, total: u64, page: u32, limit: u32) -> Self {
        let total_pages = if limit > 0 {
            total.div_ceil(limit as u64) as u32
        } else {
            1
        };

        Self {
            data,
            total,
            page,
            limit,
            total_pages,
        }
    }

    /// Whether a later page exists
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }
}
