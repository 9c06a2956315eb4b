//! # Terminal Rendering
//!
//! Text renderer for `CartView` and a notification sink that prints toasts.

use cart_core::{CartView, NotificationSink, ProductCatalog};
use std::fmt::Write;

/// Render the cart as a plain-text table
pub fn render_cart(view: &CartView, empty_message: &str) -> String {
    let mut out = String::new();
    if view.is_empty {
        let _ = writeln!(out, "{}", empty_message);
    } else {
        for item in &view.items {
            let _ = writeln!(
                out,
                "{:<24} {:>10} x{:<4} {:>10}  [{}]",
                item.name, item.price, item.quantity, item.line_total, item.id
            );
        }
    }
    let _ = writeln!(out, "Items: {}  Total: {}", view.count, view.total);
    out
}

/// Render the catalog, one product per line
pub fn render_catalog(catalog: &ProductCatalog) -> String {
    let mut out = String::new();
    for product in &catalog.products {
        let _ = writeln!(
            out,
            "{:<20} {:<24} {:>10}",
            product.id,
            product.name,
            product.price.display()
        );
    }
    out
}

/// Prints notifications on standard error
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl NotificationSink for ConsoleNotifier {
    fn notify(&self, message: &str) {
        eprintln!("» {}", message);
    }
}
