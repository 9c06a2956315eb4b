//! # Commands
//!
//! Each subcommand maps onto one cart operation; the rendered cart (or
//! catalog) is returned for printing.

use crate::provider::{ScriptedProvider, ScriptedResult};
use crate::render::{render_cart, render_catalog};
use anyhow::{anyhow, Context};
use cart_core::{checkout, CartError, CartStorage, CartStore, ProductCatalog};
use clap::Subcommand;

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Show the cart
    Show,
    /// List products in the catalog
    Products,
    /// Add one unit of a catalog product
    Add { product_id: String },
    /// Remove a line from the cart
    Remove { id: String },
    /// Increase a line's quantity by one
    Inc { id: String },
    /// Decrease a line's quantity by one (the line goes away at zero)
    Dec { id: String },
    /// Change a line's quantity by a signed amount
    Change {
        id: String,
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },
    /// Empty the cart
    Clear,
    /// Simulate the payment button and settle its outcome
    Checkout {
        #[arg(value_enum, default_value_t = ScriptedResult::Approve)]
        result: ScriptedResult,

        /// Payer name reported on approval
        #[arg(long, default_value = "customer")]
        payer: String,
    },
}

/// Execute `command` and render the resulting state
pub async fn run<S: CartStorage>(
    store: &mut CartStore<S>,
    catalog: &ProductCatalog,
    command: Command,
    json: bool,
) -> anyhow::Result<String> {
    match command {
        Command::Show => {}
        Command::Products => {
            return if json {
                Ok(serde_json::to_string_pretty(&catalog.products)?)
            } else {
                Ok(render_catalog(catalog))
            };
        }
        Command::Add { product_id } => {
            let product = catalog
                .get(&product_id)
                .ok_or_else(|| anyhow!("Unknown product '{}'", product_id))?;
            store
                .add_item(product)
                .with_context(|| format!("Failed to add '{}'", product_id))?;
        }
        Command::Remove { id } => store.remove_item(&id)?,
        Command::Inc { id } => store.update_quantity(&id, 1)?,
        Command::Dec { id } => store.update_quantity(&id, -1)?,
        Command::Change { id, delta } => store.update_quantity(&id, delta)?,
        Command::Clear => store.clear_cart()?,
        Command::Checkout { result, payer } => {
            let provider = ScriptedProvider::new(result, &payer);
            match checkout(store, &provider).await {
                Ok(_) => {}
                Err(CartError::EmptyCart) => {
                    return Ok(format!("{}\n", store.config().messages.empty_cart));
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    let view = store.view();
    if json {
        Ok(serde_json::to_string_pretty(&view)?)
    } else {
        Ok(render_cart(&view, &store.config().messages.empty_cart))
    }
}
