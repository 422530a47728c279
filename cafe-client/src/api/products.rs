//! Product service

use crate::{ClientError, ClientResult, HttpClient};
use shared::error::ApiResponse;
use shared::models::{Product, ProductDto};
use shared::query::{PaginatedResponse, ProductListQuery};

/// Upper bound on pages walked by [`HttpClient::fetch_catalog`]
pub const MAX_CATALOG_PAGES: u32 = 50;

impl HttpClient {
    /// One page of the product list; invalid records are dropped
    pub async fn list_products(
        &self,
        query: &ProductListQuery,
    ) -> ClientResult<PaginatedResponse<Product>> {
        let response: ApiResponse<PaginatedResponse<ProductDto>> =
            self.get_query("/product/all", query).await?;
        let page = Self::into_data(response, "product list")?;

        Ok(PaginatedResponse {
            data: Product::from_dtos(page.data),
            total: page.total,
            page: page.page,
            limit: page.limit,
            total_pages: page.total_pages,
        })
    }

    /// Fetch every product matching `query` by walking its pages
    pub async fn fetch_catalog(&self, query: &ProductListQuery) -> ClientResult<Vec<Product>> {
        let mut products = Vec::new();
        let mut page = query.page.max(1);

        loop {
            let response = self.list_products(&query.clone().with_page(page)).await?;
            let has_more = response.has_more();
            products.extend(response.data);

            if !has_more {
                break;
            }
            if page >= MAX_CATALOG_PAGES {
                tracing::warn!(pages = page, "Catalog page limit reached, list truncated");
                break;
            }
            page += 1;
        }

        tracing::debug!(count = products.len(), "Catalog fetched");
        Ok(products)
    }

    /// Single product by id
    pub async fn get_product(&self, id: &str) -> ClientResult<Product> {
        let response: ApiResponse<ProductDto> = self.get(&format!("/product/{}", id)).await?;
        let dto = Self::into_data(response, "product")?;
        Product::try_from(dto).map_err(ClientError::from)
    }

    /// Ask the backend to bump the view counter for `id`
    pub async fn increment_view(&self, id: &str) -> ClientResult<()> {
        self.post_empty::<ApiResponse<serde_json::Value>>(&format!("/product/{}/view", id))
            .await?
            .into_result()?;
        Ok(())
    }
}
