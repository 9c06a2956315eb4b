//! # Browser Cart
//!
//! `WasmCart` exposes a `CartStore` over `localStorage` to JavaScript.
//!
//! JS callbacks never run while the store is borrowed: the store's listener
//! and notification sink only queue into an outbox, which is flushed to the
//! registered JS functions once the operation has returned. Callbacks may
//! therefore read from or mutate the cart freely.

use crate::storage::{describe, LocalStorage};
use cart_core::{
    settle, CartConfig, CartError, CartEvent, CartResult, CartStore, CartView, CheckoutOutcome,
    CheckoutProvider, CheckoutRequest, Currency, Price, Product,
};
use serde::Deserialize;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{future_to_promise, JsFuture};

/// Product as the storefront markup describes it: `price` is a decimal
#[derive(Debug, Clone, Deserialize)]
pub struct ProductInput {
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub image: String,
}

impl ProductInput {
    pub fn into_product(self, currency: Currency) -> CartResult<Product> {
        let price = Price::from_decimal(self.price, currency).ok_or_else(|| {
            CartError::InvalidProduct(format!("product '{}' has an invalid price", self.id))
        })?;
        Ok(Product::new(self.id, self.name, price).with_image(self.image))
    }
}

/// Pending callbacks collected while the store is borrowed
#[derive(Default)]
struct Outbox {
    changes: Vec<(CartEvent, CartView)>,
    messages: Vec<String>,
}

/// JS-side subscribers
#[derive(Default)]
struct Hooks {
    outbox: Rc<RefCell<Outbox>>,
    listeners: RefCell<Vec<(u32, js_sys::Function)>>,
    next_id: Cell<u32>,
    notifier: RefCell<Option<js_sys::Function>>,
}

impl Hooks {
    /// Deliver everything queued so far
    fn flush(&self) {
        let Outbox { changes, messages } = std::mem::take(&mut *self.outbox.borrow_mut());
        let listeners: Vec<js_sys::Function> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, f)| f.clone())
            .collect();
        let notifier = self.notifier.borrow().clone();

        for (event, view) in changes {
            let (Ok(event), Ok(view)) = (
                serde_wasm_bindgen::to_value(&event),
                serde_wasm_bindgen::to_value(&view),
            ) else {
                continue;
            };
            for listener in &listeners {
                if let Err(e) = listener.call2(&JsValue::NULL, &event, &view) {
                    web_sys::console::error_1(&e);
                }
            }
        }

        if let Some(notifier) = notifier {
            for message in messages {
                if let Err(e) = notifier.call1(&JsValue::NULL, &JsValue::from_str(&message)) {
                    web_sys::console::error_1(&e);
                }
            }
        }
    }
}

fn to_js(err: CartError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// Shopping cart bound to `window.localStorage`
#[wasm_bindgen]
pub struct WasmCart {
    store: Rc<RefCell<CartStore<LocalStorage>>>,
    hooks: Rc<Hooks>,
}

#[wasm_bindgen]
impl WasmCart {
    /// Open the cart. `config_toml` overrides storage key, currency and messages.
    #[wasm_bindgen(constructor)]
    pub fn new(config_toml: Option<String>) -> Result<WasmCart, JsValue> {
        let config = match config_toml {
            Some(toml) => CartConfig::from_toml(&toml).map_err(to_js)?,
            None => CartConfig::default(),
        };

        let hooks = Rc::new(Hooks::default());
        let changes = Rc::clone(&hooks.outbox);
        let messages = Rc::clone(&hooks.outbox);

        let mut store = CartStore::load(LocalStorage::open(), config)
            .with_notifier(move |message: &str| {
                messages.borrow_mut().messages.push(message.to_string())
            });
        store.subscribe(move |event, view| {
            changes
                .borrow_mut()
                .changes
                .push((event.clone(), view.clone()))
        });

        Ok(Self {
            store: Rc::new(RefCell::new(store)),
            hooks,
        })
    }

    /// Add one unit of `{ id, name, price, image }`
    #[wasm_bindgen(js_name = addItem)]
    pub fn add_item(&self, product: JsValue) -> Result<(), JsValue> {
        let input: ProductInput = serde_wasm_bindgen::from_value(product)
            .map_err(|e| to_js(CartError::InvalidProduct(e.to_string())))?;
        let result = {
            let mut store = self.store.borrow_mut();
            input
                .into_product(store.currency())
                .and_then(|product| store.add_item(&product))
        };
        self.hooks.flush();
        result.map_err(to_js)
    }

    #[wasm_bindgen(js_name = removeItem)]
    pub fn remove_item(&self, id: &str) -> Result<(), JsValue> {
        let result = self.store.borrow_mut().remove_item(id);
        self.hooks.flush();
        result.map_err(to_js)
    }

    #[wasm_bindgen(js_name = updateQuantity)]
    pub fn update_quantity(&self, id: &str, delta: i32) -> Result<(), JsValue> {
        let result = self.store.borrow_mut().update_quantity(id, i64::from(delta));
        self.hooks.flush();
        result.map_err(to_js)
    }

    #[wasm_bindgen(js_name = clearCart)]
    pub fn clear_cart(&self) -> Result<(), JsValue> {
        let result = self.store.borrow_mut().clear_cart();
        self.hooks.flush();
        result.map_err(to_js)
    }

    /// Total as a decimal number in the cart currency
    #[wasm_bindgen]
    pub fn total(&self) -> f64 {
        self.store.borrow().total().as_decimal()
    }

    /// Total formatted for display, e.g. "$24.00"
    #[wasm_bindgen(js_name = totalDisplay)]
    pub fn total_display(&self) -> String {
        self.store.borrow().total().display()
    }

    #[wasm_bindgen]
    pub fn count(&self) -> u32 {
        u32::try_from(self.store.borrow().count()).unwrap_or(u32::MAX)
    }

    /// Full view-model: `{ items, total, total_amount, count, is_empty }`
    #[wasm_bindgen]
    pub fn view(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.store.borrow().view()).map_err(JsValue::from)
    }

    /// Badge state: `{ count, hidden }`
    #[wasm_bindgen]
    pub fn badge(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.store.borrow().badge()).map_err(JsValue::from)
    }

    /// Register `callback(event, view)`; returns an id for `offChange`
    #[wasm_bindgen(js_name = onChange)]
    pub fn on_change(&self, callback: js_sys::Function) -> u32 {
        let id = self.hooks.next_id.get();
        self.hooks.next_id.set(id.wrapping_add(1));
        self.hooks.listeners.borrow_mut().push((id, callback));
        id
    }

    #[wasm_bindgen(js_name = offChange)]
    pub fn off_change(&self, id: u32) -> bool {
        let mut listeners = self.hooks.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(entry, _)| *entry != id);
        listeners.len() != before
    }

    /// Set `callback(message)` for toast messages
    #[wasm_bindgen(js_name = setNotifier)]
    pub fn set_notifier(&self, callback: js_sys::Function) {
        *self.hooks.notifier.borrow_mut() = Some(callback);
    }

    /// Charge request for the current total; throws on an empty cart
    #[wasm_bindgen(js_name = checkoutRequest)]
    pub fn checkout_request(&self) -> Result<JsValue, JsValue> {
        let request = CheckoutRequest::from_store(&*self.store.borrow()).map_err(to_js)?;
        serde_wasm_bindgen::to_value(&request).map_err(JsValue::from)
    }

    /// Report a payment outcome, e.g. `{ status: "approved", payer_name: "Ada" }`
    #[wasm_bindgen]
    pub fn settle(&self, outcome: JsValue) -> Result<(), JsValue> {
        let outcome: CheckoutOutcome = serde_wasm_bindgen::from_value(outcome)
            .map_err(|e| JsValue::from_str(&format!("Invalid checkout outcome: {}", e)))?;
        let result = settle(&mut *self.store.borrow_mut(), &outcome);
        self.hooks.flush();
        result.map_err(to_js)
    }

    /// Run `provider(request)` (which may return a promise of an outcome)
    /// and settle the result. Resolves to the outcome.
    #[wasm_bindgen]
    pub fn checkout(&self, provider: js_sys::Function) -> js_sys::Promise {
        let store = Rc::clone(&self.store);
        let hooks = Rc::clone(&self.hooks);

        future_to_promise(async move {
            let request = CheckoutRequest::from_store(&*store.borrow()).map_err(to_js)?;
            let provider = JsCheckoutProvider::new(provider);
            tracing::debug!(reference = %request.reference, "Handing off to JS checkout provider");

            let outcome = provider.checkout(&request).await;
            let result = settle(&mut *store.borrow_mut(), &outcome);
            hooks.flush();
            result.map_err(to_js)?;

            serde_wasm_bindgen::to_value(&outcome).map_err(JsValue::from)
        })
    }
}

/// Checkout provider implemented by a JS function
pub struct JsCheckoutProvider {
    callback: js_sys::Function,
}

impl JsCheckoutProvider {
    pub fn new(callback: js_sys::Function) -> Self {
        Self { callback }
    }
}

#[async_trait::async_trait(?Send)]
impl CheckoutProvider for JsCheckoutProvider {
    async fn checkout(&self, request: &CheckoutRequest) -> CheckoutOutcome {
        let argument = match serde_wasm_bindgen::to_value(request) {
            Ok(value) => value,
            Err(e) => {
                return CheckoutOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        };

        let returned = match self.callback.call1(&JsValue::NULL, &argument) {
            Ok(value) => value,
            Err(e) => {
                return CheckoutOutcome::Failed {
                    reason: describe(&e),
                }
            }
        };

        let settled = match returned.dyn_into::<js_sys::Promise>() {
            Ok(promise) => JsFuture::from(promise).await,
            Err(value) => Ok(value),
        };

        match settled {
            Ok(value) => serde_wasm_bindgen::from_value(value).unwrap_or_else(|e| {
                CheckoutOutcome::Failed {
                    reason: format!("Unrecognized checkout outcome: {}", e),
                }
            }),
            Err(e) => CheckoutOutcome::Failed {
                reason: describe(&e),
            },
        }
    }

    fn provider_name(&self) -> &'static str {
        "js"
    }
}
