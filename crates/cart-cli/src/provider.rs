//! # Scripted Checkout
//!
//! The terminal has no payment button; this provider plays one and reports
//! whatever outcome the user asked for.

use async_trait::async_trait;
use cart_core::{CheckoutOutcome, CheckoutProvider, CheckoutRequest};
use clap::ValueEnum;
use tracing::info;

/// Outcome selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScriptedResult {
    Approve,
    Fail,
    Cancel,
    Unavailable,
}

/// Checkout provider returning a fixed outcome
#[derive(Debug, Clone)]
pub struct ScriptedProvider {
    outcome: CheckoutOutcome,
}

impl ScriptedProvider {
    pub fn new(result: ScriptedResult, payer: &str) -> Self {
        let outcome = match result {
            ScriptedResult::Approve => CheckoutOutcome::Approved {
                payer_name: payer.to_string(),
            },
            ScriptedResult::Fail => CheckoutOutcome::Failed {
                reason: "scripted failure".to_string(),
            },
            ScriptedResult::Cancel => CheckoutOutcome::Cancelled,
            ScriptedResult::Unavailable => CheckoutOutcome::Unavailable,
        };
        Self { outcome }
    }
}

#[async_trait(?Send)]
impl CheckoutProvider for ScriptedProvider {
    async fn checkout(&self, request: &CheckoutRequest) -> CheckoutOutcome {
        info!(
            reference = %request.reference,
            "Charging {} {}",
            request.value,
            request.currency_code
        );
        self.outcome.clone()
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcomes() {
        assert_eq!(
            ScriptedProvider::new(ScriptedResult::Approve, "Ada").outcome,
            CheckoutOutcome::Approved {
                payer_name: "Ada".into()
            }
        );
        assert_eq!(
            ScriptedProvider::new(ScriptedResult::Cancel, "Ada").outcome,
            CheckoutOutcome::Cancelled
        );
        assert!(matches!(
            ScriptedProvider::new(ScriptedResult::Fail, "Ada").outcome,
            CheckoutOutcome::Failed { .. }
        ));
    }
}
