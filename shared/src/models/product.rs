//! Product Model

use super::category::Category;
use crate::error::{AppError, AppResult, ErrorCode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Highest rating a product can carry
pub const MAX_RATING: f32 = 5.0;

/// Product entity (validated, immutable once fetched)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Unit price, 2 decimal places
    pub price: Decimal,
    pub image: Option<String>,
    pub category: Category,
    /// 0.0 ..= 5.0
    pub rating: f32,
    /// Server-reported view count
    pub views: u64,
    pub in_stock: bool,
    /// Creation time (unix millis), when the backend reports one
    pub created_at: Option<i64>,
}

impl Product {
    /// Validate a batch of wire records, dropping the ones that fail
    pub fn from_dtos(dtos: Vec<ProductDto>) -> Vec<Product> {
        dtos.into_iter()
            .filter_map(|dto| match Product::try_from(dto) {
                Ok(product) => Some(product),
                Err(e) => {
                    tracing::warn!(error = %e, "Dropping invalid product record");
                    None
                }
            })
            .collect()
    }
}

/// Price as sent by the product service: a JSON number or a numeric string
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceValue {
    Number(f64),
    Text(String),
}

impl PriceValue {
    fn to_decimal(&self) -> AppResult<Decimal> {
        let invalid = || {
            AppError::with_message(ErrorCode::ProductInvalidPrice, "Product has invalid price")
        };
        let value = match self {
            PriceValue::Number(n) if n.is_finite() => {
                Decimal::try_from(*n).map_err(|_| invalid())?
            }
            PriceValue::Number(_) => return Err(invalid()),
            PriceValue::Text(s) => Decimal::from_str(s.trim()).map_err(|_| invalid())?,
        };
        if value.is_sign_negative() && !value.is_zero() {
            return Err(invalid().with_detail("price", value.to_string()));
        }
        Ok(value.round_dp(2))
    }
}

/// Product record as returned by the product service
///
/// Every field is optional on the wire; [`Product::try_from`] decides
/// what is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductDto {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    #[serde(default, alias = "productName")]
    pub name: Option<String>,
    #[serde(default, alias = "productDesc")]
    pub description: Option<String>,
    #[serde(default, alias = "productPrice")]
    pub price: Option<PriceValue>,
    #[serde(default, alias = "productImage")]
    pub image: Option<String>,
    #[serde(default, alias = "productCollection")]
    pub category: Option<String>,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default, alias = "productViews", alias = "viewCount")]
    pub views: Option<i64>,
    #[serde(default, alias = "inStock")]
    pub in_stock: Option<bool>,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<i64>,
}

impl TryFrom<ProductDto> for Product {
    type Error = AppError;

    fn try_from(dto: ProductDto) -> Result<Self, Self::Error> {
        let id = dto
            .id
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::with_message(ErrorCode::RequiredField, "Product id is required"))?;

        let name = dto
            .name
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                AppError::with_message(ErrorCode::RequiredField, "Product name is required")
                    .with_detail("id", id.clone())
            })?;

        let price = dto
            .price
            .ok_or_else(|| {
                AppError::with_message(ErrorCode::ProductInvalidPrice, "Product price is required")
            })?
            .to_decimal()
            .map_err(|e| e.with_detail("id", id.clone()))?;

        let rating = dto
            .rating
            .filter(|r| r.is_finite())
            .map(|r| r.clamp(0.0, MAX_RATING))
            .unwrap_or(0.0);

        Ok(Product {
            id,
            name,
            description: dto.description.unwrap_or_default(),
            price,
            image: dto.image.filter(|s| !s.is_empty()),
            category: dto
                .category
                .as_deref()
                .map(Category::from_label)
                .unwrap_or(Category::Other),
            rating,
            // Negative counts from the backend are treated as "no data"
            views: dto.views.and_then(|v| u64::try_from(v).ok()).unwrap_or(0),
            in_stock: dto.in_stock.unwrap_or(true),
            created_at: dto.created_at,
        })
    }
}
