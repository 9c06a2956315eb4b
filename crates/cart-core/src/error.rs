//! # Cart Error Types
//!
//! Typed error handling for the cart core.
//! All mutating cart operations return `Result<T, CartError>`.

use thiserror::Error;

/// Core error type for all cart operations
#[derive(Debug, Error)]
pub enum CartError {
    /// Product handed to `add_item` does not satisfy the caller contract
    #[error("Invalid product: {0}")]
    InvalidProduct(String),

    /// Storage slot could not be written; in-memory state is still current
    #[error("Failed to persist cart to '{key}': {message}")]
    PersistenceFailed { key: String, message: String },

    /// Snapshot could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Checkout requested with nothing in the cart
    #[error("Cannot check out an empty cart")]
    EmptyCart,

    /// Configuration errors (bad TOML, empty storage key)
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CartError {
    /// Returns true if the in-memory cart was mutated despite the error
    pub fn state_retained(&self) -> bool {
        matches!(self, CartError::PersistenceFailed { .. })
    }
}

impl From<serde_json::Error> for CartError {
    fn from(err: serde_json::Error) -> Self {
        CartError::Serialization(err.to_string())
    }
}

/// Result type alias for cart operations
pub type CartResult<T> = Result<T, CartError>;
