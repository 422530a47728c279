//! Shopping cart
//!
//! Lines are keyed by product id; adding the same product again bumps the
//! quantity of the existing line. Prices are captured when the product is
//! added.

use crate::error::{AppError, AppResult, ErrorCode};
use crate::models::Product;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Maximum quantity of a single line
pub const MAX_LINE_QUANTITY: u32 = 99;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: String,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub image: Option<String>,
}

impl CartLine {
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    /// Add `quantity` units of `product`, merging with an existing line
    pub fn add(&mut self, product: &Product, quantity: u32) -> AppResult<&CartLine> {
        if !product.in_stock {
            return Err(AppError::new(ErrorCode::ProductOutOfStock).with_detail("id", product.id.clone()));
        }
        if quantity == 0 {
            return Err(invalid_quantity(quantity));
        }

        let index = match self.lines.iter().position(|l| l.product_id == product.id) {
            Some(index) => {
                let line = &mut self.lines[index];
                let merged = line.quantity.saturating_add(quantity);
                if merged > MAX_LINE_QUANTITY {
                    return Err(invalid_quantity(merged));
                }
                line.quantity = merged;
                index
            }
            None => {
                if quantity > MAX_LINE_QUANTITY {
                    return Err(invalid_quantity(quantity));
                }
                self.lines.push(CartLine {
                    product_id: product.id.clone(),
                    name: product.name.clone(),
                    unit_price: product.price,
                    quantity,
                    image: product.image.clone(),
                });
                self.lines.len() - 1
            }
        };

        tracing::debug!(product_id = %product.id, quantity, "Cart line updated");
        Ok(&self.lines[index])
    }

    /// Set a line's quantity; 0 removes the line
    pub fn set_quantity(&mut self, product_id: &str, quantity: u32) -> AppResult<()> {
        if quantity > MAX_LINE_QUANTITY {
            return Err(invalid_quantity(quantity));
        }
        let index = self
            .lines
            .iter()
            .position(|l| l.product_id == product_id)
            .ok_or_else(|| {
                AppError::new(ErrorCode::CartItemNotFound).with_detail("product_id", product_id)
            })?;

        if quantity == 0 {
            self.lines.remove(index);
        } else {
            self.lines[index].quantity = quantity;
        }
        Ok(())
    }

    pub fn remove(&mut self, product_id: &str) -> Option<CartLine> {
        let index = self.lines.iter().position(|l| l.product_id == product_id)?;
        Some(self.lines.remove(index))
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Units across all lines
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Order total, rounded to cents
    pub fn total(&self) -> Decimal {
        self.lines
            .iter()
            .map(CartLine::subtotal)
            .sum::<Decimal>()
            .round_dp(2)
    }
}

fn invalid_quantity(quantity: u32) -> AppError {
    AppError::with_message(
        ErrorCode::CartInvalidQuantity,
        format!("Quantity must be between 1 and {}", MAX_LINE_QUANTITY),
    )
    .with_detail("quantity", quantity)
}
