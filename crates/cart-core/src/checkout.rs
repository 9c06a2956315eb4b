//! # Checkout Hand-off
//!
//! The cart does not talk to payment providers. It builds a
//! [`CheckoutRequest`] from its total, lets a [`CheckoutProvider`] run the
//! payment flow, and reacts to the [`CheckoutOutcome`]:
//!
//! ```text
//! ┌───────────┐  CheckoutRequest   ┌──────────────────┐
//! │ CartStore │ ─────────────────► │ CheckoutProvider │  (PayPal button, ...)
//! │           │ ◄───────────────── │     (trait)      │
//! └───────────┘  CheckoutOutcome   └──────────────────┘
//!    Approved    ► clear cart + "Transaction completed by ..."
//!    Failed      ► payment error message
//!    Cancelled   ► "Payment cancelled."
//!    Unavailable ► provider unavailable message
//! ```
//!
//! Hosts that cannot hold the store across an `await` (the browser binding)
//! call [`CheckoutRequest::from_store`] and [`settle`] themselves.

use crate::error::{CartError, CartResult};
use crate::product::Price;
use crate::storage::CartStorage;
use crate::store::CartStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

/// Charge request handed to the payment provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    /// Our reference for this attempt (UUID v4)
    pub reference: String,

    /// Amount to charge
    pub amount: Price,

    /// ISO 4217 code, upper case (e.g. "CAD")
    pub currency_code: String,

    /// Amount as a plain decimal string (e.g. "24.00")
    pub value: String,

    /// Number of units in the cart
    pub item_count: u64,

    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl CheckoutRequest {
    /// Build a request for the cart's current total.
    ///
    /// Fails with `EmptyCart` if there is nothing to pay for.
    pub fn from_store<S: CartStorage>(store: &CartStore<S>) -> CartResult<Self> {
        if store.is_empty() {
            return Err(CartError::EmptyCart);
        }
        let amount = store.total();
        Ok(Self {
            reference: Uuid::new_v4().to_string(),
            amount,
            currency_code: amount.currency.code(),
            value: amount.value_string(),
            item_count: store.count(),
            created_at: Utc::now(),
        })
    }
}

/// How a payment attempt ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckoutOutcome {
    /// Payment captured
    Approved { payer_name: String },
    /// Provider reported an error
    Failed { reason: String },
    /// Customer closed the payment flow
    Cancelled,
    /// Provider could not be loaded at all
    Unavailable,
}

impl CheckoutOutcome {
    pub fn is_approved(&self) -> bool {
        matches!(self, CheckoutOutcome::Approved { .. })
    }
}

/// A payment integration the cart can hand off to.
///
/// Not `Send`: browser integrations wrap JS promises.
#[async_trait(?Send)]
pub trait CheckoutProvider {
    /// Run the payment flow for `request` and report how it ended
    async fn checkout(&self, request: &CheckoutRequest) -> CheckoutOutcome;

    /// Get the provider name (for logging)
    fn provider_name(&self) -> &'static str;
}

/// Apply a checkout outcome to the cart.
///
/// Only `Approved` mutates the cart (it is cleared); every outcome produces
/// one message on the notification sink.
pub fn settle<S: CartStorage>(store: &mut CartStore<S>, outcome: &CheckoutOutcome) -> CartResult<()> {
    match outcome {
        CheckoutOutcome::Approved { payer_name } => {
            info!(payer = %payer_name, "Checkout approved, clearing cart");
            let cleared = store.clear_cart();
            let message = store.config().messages.transaction_completed_by(payer_name);
            store.notify(&message);
            cleared
        }
        CheckoutOutcome::Failed { reason } => {
            warn!(%reason, "Checkout failed");
            store.notify(&store.config().messages.payment_error);
            Ok(())
        }
        CheckoutOutcome::Cancelled => {
            info!("Checkout cancelled");
            store.notify(&store.config().messages.payment_cancelled);
            Ok(())
        }
        CheckoutOutcome::Unavailable => {
            warn!("Checkout provider unavailable");
            store.notify(&store.config().messages.payment_unavailable);
            Ok(())
        }
    }
}

/// Run a full checkout: build the request, await the provider, settle.
pub async fn checkout<S: CartStorage>(
    store: &mut CartStore<S>,
    provider: &dyn CheckoutProvider,
) -> CartResult<CheckoutOutcome> {
    let request = CheckoutRequest::from_store(store)?;
    info!(
        provider = provider.provider_name(),
        reference = %request.reference,
        value = %request.value,
        currency = %request.currency_code,
        "Starting checkout"
    );
    let outcome = provider.checkout(&request).await;
    settle(store, &outcome)?;
    Ok(outcome)
}
