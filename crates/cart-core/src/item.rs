//! # Line Items
//!
//! One product entry in the cart with its quantity.

use crate::product::{Price, Product};

/// A line item in the cart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    /// Product ID, unique within a cart
    pub id: String,

    /// Product name (denormalized for display)
    pub name: String,

    /// Image URL (denormalized for display)
    pub image: String,

    /// Unit price at the time the product was added
    pub unit_price: Price,

    /// Always >= 1 while the item is in a cart
    pub quantity: u32,
}

impl LineItem {
    /// Create a line item from a product
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            image: product.image.clone(),
            unit_price: product.price,
            quantity,
        }
    }

    /// Calculate the total price for this line item
    pub fn total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::Currency;

    #[test]
    fn test_line_item_total() {
        let product = Product::new("test", "Test", Price::new(10.0, Currency::CAD))
            .with_image("/img/test.png");
        let item = LineItem::from_product(&product, 3);

        assert_eq!(item.total().amount, 3000);
        assert_eq!(item.image, "/img/test.png");
        assert_eq!(item.unit_price, product.price);
    }
}
