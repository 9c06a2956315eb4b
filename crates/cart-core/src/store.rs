//! # Cart Store
//!
//! Owns the ordered line items and keeps the derived total and count in step
//! with them. Every mutation runs the same tail:
//!
//! ```text
//! mutate items ──► recompute total/count ──► write snapshot ──► listeners
//! ```
//!
//! A failed write does not roll the mutation back: the in-memory cart stays
//! the source of truth for the session, listeners still run, and the caller
//! gets `CartError::PersistenceFailed`.

use crate::config::CartConfig;
use crate::error::{CartError, CartResult};
use crate::event::{CartEvent, Listener, Listeners, NotificationSink, SubscriptionId};
use crate::item::LineItem;
use crate::product::{Currency, Price, Product};
use crate::snapshot;
use crate::storage::CartStorage;
use crate::view::{BadgeView, CartView};
use tracing::{debug, info, warn};

/// The shopping cart
pub struct CartStore<S: CartStorage> {
    items: Vec<LineItem>,
    total: Price,
    count: u64,
    storage: S,
    config: CartConfig,
    listeners: Listeners,
    notifier: Option<Box<dyn NotificationSink>>,
}

impl<S: CartStorage> CartStore<S> {
    /// Open the cart with the default configuration
    pub fn new(storage: S) -> Self {
        Self::load(storage, CartConfig::default())
    }

    /// Open the cart, restoring whatever the storage slot holds.
    ///
    /// An absent, unreadable or malformed slot yields an empty cart.
    pub fn load(storage: S, config: CartConfig) -> Self {
        let items = match storage.read(&config.storage_key) {
            Ok(Some(raw)) => snapshot::decode(&raw, config.currency),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(key = %config.storage_key, error = %e, "Cart storage unreadable, starting empty");
                Vec::new()
            }
        };
        info!(key = %config.storage_key, lines = items.len(), "Cart loaded");

        let mut store = Self {
            items,
            total: Price::zero(config.currency),
            count: 0,
            storage,
            config,
            listeners: Listeners::default(),
            notifier: None,
        };
        store.recompute();
        store
    }

    /// Builder: attach a notification sink
    pub fn with_notifier(mut self, notifier: impl NotificationSink + 'static) -> Self {
        self.set_notifier(notifier);
        self
    }

    pub fn set_notifier(&mut self, notifier: impl NotificationSink + 'static) {
        self.notifier = Some(Box::new(notifier));
    }

    /// Register a change listener
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&CartEvent, &CartView) + 'static,
    ) -> SubscriptionId {
        let boxed: Listener = Box::new(listener);
        self.listeners.add(boxed)
    }

    /// Remove a listener; returns false if it was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Add one unit of `product`, appending a new line if needed
    pub fn add_item(&mut self, product: &Product) -> CartResult<()> {
        product.validate().map_err(CartError::InvalidProduct)?;
        if product.price.currency != self.config.currency {
            return Err(CartError::InvalidProduct(format!(
                "product '{}' is priced in {}, cart uses {}",
                product.id, product.price.currency, self.config.currency
            )));
        }

        let quantity = match self.items.iter_mut().find(|item| item.id == product.id) {
            Some(item) => {
                item.quantity = item.quantity.saturating_add(1);
                item.quantity
            }
            None => {
                self.items.push(LineItem::from_product(product, 1));
                1
            }
        };
        debug!(id = %product.id, quantity, "Item added");

        let result = self.commit(CartEvent::ItemAdded {
            id: product.id.clone(),
            quantity,
        });
        self.notify(&self.config.messages.item_added);
        result
    }

    /// Delete the line for `id`. Missing ids are ignored.
    pub fn remove_item(&mut self, id: &str) -> CartResult<()> {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        if self.items.len() == before {
            debug!(id, "Remove ignored, item not in cart");
            return Ok(());
        }
        debug!(id, "Item removed");
        self.commit(CartEvent::ItemRemoved { id: id.to_string() })
    }

    /// Shift the quantity of `id` by `delta`.
    ///
    /// A resulting quantity of zero or less removes the line. Missing ids are
    /// ignored.
    pub fn update_quantity(&mut self, id: &str, delta: i64) -> CartResult<()> {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            debug!(id, delta, "Quantity update ignored, item not in cart");
            return Ok(());
        };

        let next = i64::from(item.quantity).saturating_add(delta);
        if next <= 0 {
            return self.remove_item(id);
        }
        item.quantity = u32::try_from(next).unwrap_or(u32::MAX);
        let quantity = item.quantity;
        debug!(id, quantity, "Quantity updated");

        self.commit(CartEvent::QuantityChanged {
            id: id.to_string(),
            quantity,
        })
    }

    /// Empty the cart
    pub fn clear_cart(&mut self) -> CartResult<()> {
        self.items.clear();
        debug!("Cart cleared");
        self.commit(CartEvent::Cleared)
    }

    /// Sum of unit price times quantity over all lines
    pub fn total(&self) -> Price {
        self.total
    }

    /// Sum of quantities over all lines
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Lines in insertion order
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn currency(&self) -> Currency {
        self.config.currency
    }

    pub fn config(&self) -> &CartConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Give back the storage, e.g. to reopen the cart from it
    pub fn into_storage(self) -> S {
        self.storage
    }

    pub fn view(&self) -> CartView {
        CartView::new(&self.items, self.total, self.count)
    }

    pub fn badge(&self) -> BadgeView {
        BadgeView::new(self.count)
    }

    /// Send a message to the notification sink, if one is attached
    pub fn notify(&self, message: &str) {
        match &self.notifier {
            Some(notifier) => notifier.notify(message),
            None => debug!(message, "No notification sink attached"),
        }
    }

    fn commit(&mut self, event: CartEvent) -> CartResult<()> {
        self.recompute();
        let persisted = self.persist();
        if !self.listeners.is_empty() {
            let view = self.view();
            self.listeners.emit(&event, &view);
        }
        persisted
    }

    fn recompute(&mut self) {
        let amount = self
            .items
            .iter()
            .fold(0_i64, |sum, item| sum.saturating_add(item.total().amount));
        self.total = Price::from_cents(amount, self.config.currency);
        self.count = self.items.iter().map(|item| u64::from(item.quantity)).sum();
    }

    fn persist(&mut self) -> CartResult<()> {
        let raw = snapshot::encode(&self.items)?;
        self.storage
            .write(&self.config.storage_key, &raw)
            .map_err(|e| {
                warn!(key = %self.config.storage_key, error = %e, "Cart snapshot not persisted");
                CartError::PersistenceFailed {
                    key: self.config.storage_key.clone(),
                    message: e.to_string(),
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, StorageError};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn product(id: &str, price: f64) -> Product {
        Product::new(id, format!("Product {id}"), Price::new(price, Currency::CAD))
            .with_image(format!("/img/{id}.jpg"))
    }

    fn empty_store() -> CartStore<MemoryStorage> {
        CartStore::new(MemoryStorage::new())
    }

    /// Accepts reads, refuses writes
    #[derive(Default)]
    struct FullStorage;

    impl CartStorage for FullStorage {
        fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn write(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::QuotaExceeded)
        }

        fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    struct BrokenStorage;

    impl CartStorage for BrokenStorage {
        fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("disabled".into()))
        }

        fn write(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disabled".into()))
        }

        fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disabled".into()))
        }
    }

    #[test]
    fn test_add_same_product_increments() {
        let mut store = empty_store();
        for _ in 0..5 {
            store.add_item(&product("a", 3.0)).unwrap();
        }
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.get("a").unwrap().quantity, 5);
        assert_eq!(store.total().amount, 1500);
        assert_eq!(store.count(), 5);
    }

    #[test]
    fn test_add_then_overshoot_removes() {
        let mut store = empty_store();

        store.add_item(&product("A", 10.0)).unwrap();
        assert_eq!(store.total().amount, 1000);
        assert_eq!(store.count(), 1);

        store.add_item(&product("A", 10.0)).unwrap();
        assert_eq!(store.get("A").unwrap().quantity, 2);
        assert_eq!(store.total().amount, 2000);

        store.update_quantity("A", -5).unwrap();
        assert!(store.get("A").is_none());
        assert_eq!(store.total().amount, 0);
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_remove_one_of_two() {
        let mut store = empty_store();
        store.add_item(&product("A", 5.0)).unwrap();
        store.add_item(&product("B", 7.0)).unwrap();
        assert_eq!(store.total().amount, 1200);

        store.remove_item("A").unwrap();
        assert_eq!(store.total().amount, 700);
        assert_eq!(store.count(), 1);
        assert_eq!(store.items()[0].id, "B");
    }

    #[test]
    fn test_update_quantity() {
        let mut store = empty_store();
        store.add_item(&product("a", 2.5)).unwrap();

        store.update_quantity("a", 3).unwrap();
        assert_eq!(store.get("a").unwrap().quantity, 4);
        assert_eq!(store.total().amount, 1000);

        store.update_quantity("a", -3).unwrap();
        assert_eq!(store.get("a").unwrap().quantity, 1);

        store.update_quantity("a", -1).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_update_quantity_saturates() {
        let mut store = empty_store();
        store.add_item(&product("a", 0.0)).unwrap();
        store.update_quantity("a", i64::MAX).unwrap();
        assert_eq!(store.get("a").unwrap().quantity, u32::MAX);
        store.update_quantity("a", i64::MIN).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_absent_id_is_noop() {
        let mut store = empty_store();
        store.add_item(&product("a", 1.0)).unwrap();
        let items_before = store.items().to_vec();
        let writes_before = store.storage().write_count();
        let events = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&events);
        store.subscribe(move |_, _| *counter.borrow_mut() += 1);

        store.remove_item("zzz").unwrap();
        store.update_quantity("zzz", -1).unwrap();
        store.update_quantity("zzz", 4).unwrap();

        assert_eq!(store.items(), items_before.as_slice());
        assert_eq!(store.storage().write_count(), writes_before);
        assert_eq!(*events.borrow(), 0);
    }

    #[test]
    fn test_clear() {
        let mut store = empty_store();
        store.add_item(&product("a", 1.0)).unwrap();
        store.add_item(&product("b", 2.0)).unwrap();
        store.clear_cart().unwrap();

        assert_eq!(store.total().amount, 0);
        assert_eq!(store.count(), 0);
        assert!(store.badge().hidden);
        assert_eq!(store.storage().get("tara_cart"), Some("[]"));
    }

    #[test]
    fn test_every_mutation_persists() {
        let mut store = empty_store();
        store.add_item(&product("a", 1.0)).unwrap();
        store.update_quantity("a", 2).unwrap();
        store.remove_item("a").unwrap();
        store.clear_cart().unwrap();
        assert_eq!(store.storage().write_count(), 4);
    }

    #[test]
    fn test_reload_round_trip() {
        let mut store = empty_store();
        store.add_item(&product("a", 12.99)).unwrap();
        store.add_item(&product("b", 0.5)).unwrap();
        store.update_quantity("b", 2).unwrap();
        let items = store.items().to_vec();
        let total = store.total();

        let reopened = CartStore::new(store.into_storage());
        assert_eq!(reopened.items(), items.as_slice());
        assert_eq!(reopened.total(), total);
        assert_eq!(reopened.count(), 4);
    }

    #[test]
    fn test_malformed_storage_loads_empty() {
        let storage = MemoryStorage::new().with_entry("tara_cart", "{{{ not json");
        let store = CartStore::new(storage);
        assert!(store.is_empty());
        assert_eq!(store.total().amount, 0);
    }

    #[test]
    fn test_unreadable_storage_loads_empty() {
        let store = CartStore::new(BrokenStorage);
        assert!(store.is_empty());
    }

    #[test]
    fn test_custom_storage_key() {
        let config = CartConfig::default().with_storage_key("other_cart");
        let mut store = CartStore::load(MemoryStorage::new(), config);
        store.add_item(&product("a", 1.0)).unwrap();
        assert!(store.storage().get("other_cart").is_some());
        assert!(store.storage().get("tara_cart").is_none());
    }

    #[test]
    fn test_persistence_failure_keeps_state() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let mut store = CartStore::new(FullStorage);
        store.subscribe(move |event, view| sink.borrow_mut().push((event.clone(), view.count)));

        let err = store.add_item(&product("a", 4.0)).unwrap_err();
        assert!(matches!(err, CartError::PersistenceFailed { ref key, .. } if key == "tara_cart"));
        assert!(err.state_retained());

        assert_eq!(store.count(), 1);
        assert_eq!(store.total().amount, 400);
        assert_eq!(events.borrow().len(), 1);
        assert_eq!(events.borrow()[0].1, 1);
    }

    #[test]
    fn test_invalid_product_rejected() {
        let mut store = empty_store();
        let nameless = Product::new("a", "", Price::new(1.0, Currency::CAD));
        assert!(matches!(
            store.add_item(&nameless),
            Err(CartError::InvalidProduct(_))
        ));

        let foreign = Product::new("b", "Euro thing", Price::new(1.0, Currency::EUR));
        assert!(matches!(
            store.add_item(&foreign),
            Err(CartError::InvalidProduct(_))
        ));

        assert!(store.is_empty());
        assert_eq!(store.storage().write_count(), 0);
    }

    #[test]
    fn test_listeners_see_fresh_view() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut store = empty_store();
        let id = store.subscribe(move |event, view| {
            sink.borrow_mut().push((event.clone(), view.total_amount, view.count))
        });

        store.add_item(&product("a", 2.0)).unwrap();
        store.update_quantity("a", 1).unwrap();
        store.update_quantity("a", -2).unwrap();

        assert_eq!(
            seen.borrow().as_slice(),
            [
                (CartEvent::ItemAdded { id: "a".into(), quantity: 1 }, 200, 1),
                (CartEvent::QuantityChanged { id: "a".into(), quantity: 2 }, 400, 2),
                (CartEvent::ItemRemoved { id: "a".into() }, 0, 0),
            ]
        );

        assert!(store.unsubscribe(id));
        store.clear_cart().unwrap();
        assert_eq!(seen.borrow().len(), 3);
        assert_eq!(store.listener_count(), 0);
    }

    #[test]
    fn test_add_notifies_sink() {
        let messages = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&messages);
        let mut store = empty_store()
            .with_notifier(move |m: &str| sink.borrow_mut().push(m.to_string()));

        store.add_item(&product("a", 1.0)).unwrap();
        store.update_quantity("a", 1).unwrap();
        store.remove_item("a").unwrap();

        assert_eq!(messages.borrow().as_slice(), ["Item added to cart".to_string()]);
    }
}
