//! # Change Notification
//!
//! Listeners are invoked after every persisted mutation so presentation
//! layers can re-render. A [`NotificationSink`] receives short human-readable
//! messages (the storefront shows them as toasts).

use crate::view::CartView;
use serde::Serialize;

/// What changed in the cart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CartEvent {
    /// A product was added or its quantity bumped by one
    ItemAdded { id: String, quantity: u32 },
    /// A line was deleted (explicitly or by dropping its quantity to zero)
    ItemRemoved { id: String },
    /// A line's quantity changed to a new positive value
    QuantityChanged { id: String, quantity: u32 },
    /// All lines were removed
    Cleared,
}

impl CartEvent {
    /// Product id this event concerns, if any
    pub fn item_id(&self) -> Option<&str> {
        match self {
            CartEvent::ItemAdded { id, .. }
            | CartEvent::ItemRemoved { id }
            | CartEvent::QuantityChanged { id, .. } => Some(id.as_str()),
            CartEvent::Cleared => None,
        }
    }
}

/// Receives user-facing messages. Display and timing are up to the sink.
pub trait NotificationSink {
    fn notify(&self, message: &str);
}

impl<F> NotificationSink for F
where
    F: Fn(&str),
{
    fn notify(&self, message: &str) {
        self(message)
    }
}

/// Callback invoked with the event and a fresh view of the cart
pub type Listener = Box<dyn FnMut(&CartEvent, &CartView)>;

/// Handle returned by `subscribe`, accepted by `unsubscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Registered listeners
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    entries: Vec<(SubscriptionId, Listener)>,
}

impl Listeners {
    pub(crate) fn add(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn emit(&mut self, event: &CartEvent, view: &CartView) {
        for (_, listener) in self.entries.iter_mut() {
            listener(event, view);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_item_id() {
        let added = CartEvent::ItemAdded {
            id: "a".into(),
            quantity: 1,
        };
        assert_eq!(added.item_id(), Some("a"));
        assert_eq!(CartEvent::Cleared.item_id(), None);
    }

    #[test]
    fn test_event_serializes_with_tag() {
        let json = serde_json::to_value(CartEvent::QuantityChanged {
            id: "a".into(),
            quantity: 3,
        })
        .unwrap();
        assert_eq!(json["type"], "quantity_changed");
        assert_eq!(json["quantity"], 3);
    }

    #[test]
    fn test_listeners_add_remove() {
        let seen = Rc::new(RefCell::new(0));
        let mut listeners = Listeners::default();

        let counter = Rc::clone(&seen);
        let first = listeners.add(Box::new(move |_: &CartEvent, _: &CartView| {
            *counter.borrow_mut() += 1
        }));
        let counter = Rc::clone(&seen);
        let second = listeners.add(Box::new(move |_: &CartEvent, _: &CartView| {
            *counter.borrow_mut() += 10
        }));
        assert_ne!(first, second);
        assert_eq!(listeners.len(), 2);

        listeners.emit(&CartEvent::Cleared, &CartView::default());
        assert_eq!(*seen.borrow(), 11);

        assert!(listeners.remove(first));
        assert!(!listeners.remove(first));
        listeners.emit(&CartEvent::Cleared, &CartView::default());
        assert_eq!(*seen.borrow(), 21);
    }

    #[test]
    fn test_closure_is_sink() {
        let messages = RefCell::new(Vec::new());
        let sink = |m: &str| messages.borrow_mut().push(m.to_string());
        sink.notify("hello");
        assert_eq!(messages.borrow().as_slice(), ["hello".to_string()]);
    }
}
