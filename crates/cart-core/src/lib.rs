//! # cart-core
//!
//! Cart state for the tara-cart storefront widget.
//!
//! This crate provides:
//! - `CartStore` owning the line items, derived total/count and persistence
//! - `CartStorage` trait for the single key-value slot holding the snapshot
//! - `CartEvent` listeners and the `NotificationSink` for toasts
//! - `CartView`/`BadgeView` view-models for any renderer
//! - `CheckoutProvider` hand-off and `settle` for payment outcomes
//! - `CartConfig` loaded from TOML
//!
//! ## Example
//!
//! ```rust
//! use cart_core::{CartStore, Currency, MemoryStorage, Price, Product};
//!
//! let mut cart = CartStore::new(MemoryStorage::new());
//!
//! let soap = Product::new("soap", "Lavender Soap", Price::new(8.0, Currency::CAD));
//! cart.add_item(&soap).unwrap();
//! cart.add_item(&soap).unwrap();
//!
//! assert_eq!(cart.count(), 2);
//! assert_eq!(cart.total().display(), "$16.00");
//!
//! cart.update_quantity("soap", -2).unwrap();
//! assert!(cart.is_empty());
//! ```

pub mod checkout;
pub mod config;
pub mod error;
pub mod event;
pub mod item;
pub mod product;
pub mod snapshot;
pub mod storage;
pub mod store;
pub mod view;

// Re-exports for convenience
pub use checkout::{checkout, settle, CheckoutOutcome, CheckoutProvider, CheckoutRequest};
pub use config::{CartConfig, Messages, DEFAULT_STORAGE_KEY};
pub use error::{CartError, CartResult};
pub use event::{CartEvent, Listener, NotificationSink, SubscriptionId};
pub use item::LineItem;
pub use product::{Currency, Price, Product, ProductCatalog};
pub use storage::{CartStorage, MemoryStorage, StorageError};
pub use store::CartStore;
pub use view::{BadgeView, CartView, LineItemView};
