//! # Cart Configuration
//!
//! Storage key, currency and user-facing messages, loadable from TOML:
//!
//! ```toml
//! storage_key = "tara_cart"
//! currency = "cad"
//!
//! [messages]
//! item_added = "Item added to cart"
//! ```
//!
//! Every field is optional.

use crate::error::{CartError, CartResult};
use crate::product::Currency;
use serde::{Deserialize, Serialize};

/// Default storage slot name
pub const DEFAULT_STORAGE_KEY: &str = "tara_cart";

/// Top-level cart configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    /// Name of the storage slot holding the snapshot
    pub storage_key: String,

    /// Currency all cart prices are expressed in
    pub currency: Currency,

    /// Toast texts
    pub messages: Messages,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            currency: Currency::default(),
            messages: Messages::default(),
        }
    }
}

impl CartConfig {
    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> CartResult<Self> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| CartError::Configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CartResult<()> {
        if self.storage_key.trim().is_empty() {
            return Err(CartError::Configuration(
                "storage_key must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Builder: set storage key
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Builder: set currency
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }
}

const PAYER_PLACEHOLDER: &str = "{payer}";

/// User-facing notification texts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub item_added: String,
    /// `{payer}` is replaced with the payer's name
    pub transaction_completed: String,
    pub payment_error: String,
    pub payment_cancelled: String,
    pub payment_unavailable: String,
    pub empty_cart: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            item_added: "Item added to cart".to_string(),
            transaction_completed: "Transaction completed by {payer}".to_string(),
            payment_error: "An error occurred with the payment. Please try again.".to_string(),
            payment_cancelled: "Payment cancelled.".to_string(),
            payment_unavailable: "Payment is currently unavailable. Please try again later."
                .to_string(),
            empty_cart: "Your cart is empty.".to_string(),
        }
    }
}

impl Messages {
    pub fn transaction_completed_by(&self, payer: &str) -> String {
        self.transaction_completed.replace(PAYER_PLACEHOLDER, payer)
    }
}
