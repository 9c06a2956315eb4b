//! # Browser Storage
//!
//! `window.localStorage` as a cart storage slot. When the browser refuses
//! access (privacy mode, sandboxed iframe) the cart still works in memory:
//! reads return nothing and every write reports `Unavailable`.

use cart_core::{CartStorage, StorageError};
use wasm_bindgen::JsValue;

/// `localStorage`-backed slot
pub struct LocalStorage {
    inner: Option<web_sys::Storage>,
}

impl LocalStorage {
    /// Attach to the window's local storage, if the browser allows it
    pub fn open() -> Self {
        let inner = web_sys::window().and_then(|window| match window.local_storage() {
            Ok(storage) => storage,
            Err(e) => {
                tracing::warn!(error = %describe(&e), "localStorage access denied");
                None
            }
        });
        Self { inner }
    }

    fn storage(&self) -> Result<&web_sys::Storage, StorageError> {
        self.inner
            .as_ref()
            .ok_or_else(|| StorageError::Unavailable("localStorage is not available".to_string()))
    }
}

impl CartStorage for LocalStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match &self.inner {
            Some(storage) => storage.get_item(key).map_err(classify),
            None => Ok(None),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?.set_item(key, value).map_err(classify)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.storage()?.remove_item(key).map_err(classify)
    }
}

/// Map a thrown `DOMException` to a storage error
fn classify(err: JsValue) -> StorageError {
    match exception_name(&err).as_deref() {
        Some("QuotaExceededError") | Some("NS_ERROR_DOM_QUOTA_REACHED") => {
            StorageError::QuotaExceeded
        }
        Some("SecurityError") => StorageError::Unavailable(describe(&err)),
        _ => StorageError::Backend(describe(&err)),
    }
}

fn exception_name(err: &JsValue) -> Option<String> {
    js_sys::Reflect::get(err, &JsValue::from_str("name"))
        .ok()
        .and_then(|name| name.as_string())
}

/// Best-effort text for a thrown JS value
pub(crate) fn describe(err: &JsValue) -> String {
    if let Some(text) = err.as_string() {
        return text;
    }
    js_sys::Reflect::get(err, &JsValue::from_str("message"))
        .ok()
        .and_then(|message| message.as_string())
        .unwrap_or_else(|| format!("{:?}", err))
}
