//! # cart-wasm
//!
//! WebAssembly bindings for tara-cart-rs.
//!
//! This crate provides:
//! - `WasmCart`, the cart store persisted in `window.localStorage`
//! - Change listeners and a toast callback for the page's renderer
//! - Checkout hand-off to a JS payment button
//! - Price formatting and product-id validation helpers
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmCart } from 'tara-cart-wasm';
//!
//! await init();
//!
//! const cart = new WasmCart();
//! cart.onChange((event, view) => renderCart(view));
//! cart.setNotifier((message) => showToast(message));
//!
//! cart.addItem({ id: 'soap', name: 'Lavender Soap', price: 8, image: '/img/soap.jpg' });
//! cart.updateQuantity('soap', -1);
//!
//! // From the payment button's approval callback:
//! cart.settle({ status: 'approved', payer_name: details.payer.name.given_name });
//! ```
//!
//! ## Building
//!
//! ```bash
//! wasm-pack build --target web
//! ```

pub mod cart;
pub mod storage;

pub use cart::{JsCheckoutProvider, ProductInput, WasmCart};
pub use storage::LocalStorage;

use cart_core::{Currency, Price};
use wasm_bindgen::prelude::*;

/// Longest accepted product id
const MAX_PRODUCT_ID_LEN: usize = 100;

/// Format a price in cents to display string
#[wasm_bindgen]
pub fn format_price(cents: i64) -> String {
    Price::from_cents(cents, Currency::default()).display()
}

/// Validate a product ID format
#[wasm_bindgen]
pub fn validate_product_id(product_id: &str) -> bool {
    !product_id.is_empty()
        && product_id.len() <= MAX_PRODUCT_ID_LEN
        && product_id
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

/// Log to browser console
#[wasm_bindgen]
pub fn log(message: &str) {
    web_sys::console::log_1(&JsValue::from_str(message));
}

/// Get library version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(1999), "$19.99");
        assert_eq!(format_price(100), "$1.00");
        assert_eq!(format_price(0), "$0.00");
    }

    #[test]
    fn test_validate_product_id() {
        assert!(validate_product_id("lavender-soap"));
        assert!(validate_product_id("product_123"));
        assert!(!validate_product_id(""));
        assert!(!validate_product_id("invalid id"));
        assert!(!validate_product_id(&"a".repeat(MAX_PRODUCT_ID_LEN + 1)));
    }

    #[test]
    fn test_version() {
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
    }
}
