//! # View Models
//!
//! Declarative snapshots for whatever renders the cart (DOM, terminal,
//! server-side templates). Prices are preformatted.

use crate::item::LineItem;
use crate::product::Price;
use serde::Serialize;

/// One row of the cart list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItemView {
    pub id: String,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    /// Unit price, e.g. "$8.00"
    pub price: String,
    /// Unit price times quantity, e.g. "$16.00"
    pub line_total: String,
}

impl From<&LineItem> for LineItemView {
    fn from(item: &LineItem) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            image: item.image.clone(),
            quantity: item.quantity,
            price: item.unit_price.display(),
            line_total: item.total().display(),
        }
    }
}

/// The cart modal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub items: Vec<LineItemView>,
    /// Formatted total, e.g. "$24.00"
    pub total: String,
    /// Total in the smallest currency unit
    pub total_amount: i64,
    pub count: u64,
    pub is_empty: bool,
}

impl CartView {
    pub fn new(items: &[LineItem], total: Price, count: u64) -> Self {
        Self {
            items: items.iter().map(LineItemView::from).collect(),
            total: total.display(),
            total_amount: total.amount,
            count,
            is_empty: items.is_empty(),
        }
    }

    pub fn badge(&self) -> BadgeView {
        BadgeView::new(self.count)
    }
}

/// The count badge on the cart button; hidden when the cart is empty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BadgeView {
    pub count: u64,
    pub hidden: bool,
}

impl BadgeView {
    pub fn new(count: u64) -> Self {
        Self {
            count,
            hidden: count == 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::Currency;

    #[test]
    fn test_cart_view() {
        let items = vec![LineItem {
            id: "soap".into(),
            name: "Lavender Soap".into(),
            image: "/img/soap.jpg".into(),
            unit_price: Price::from_cents(800, Currency::CAD),
            quantity: 2,
        }];
        let view = CartView::new(&items, Price::from_cents(1600, Currency::CAD), 2);

        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].price, "$8.00");
        assert_eq!(view.items[0].line_total, "$16.00");
        assert_eq!(view.total, "$16.00");
        assert!(!view.is_empty);
        assert_eq!(view.badge(), BadgeView { count: 2, hidden: false });
    }

    #[test]
    fn test_empty_badge_hidden() {
        let view = CartView::new(&[], Price::zero(Currency::CAD), 0);
        assert!(view.is_empty);
        assert_eq!(view.total, "$0.00");
        assert!(view.badge().hidden);
    }
}
