//! # cart-cli
//!
//! Terminal host for the tara-cart store.
//!
//! The cart slot lives in a JSON file under the data directory, so the cart
//! persists between invocations exactly as it does across page loads in the
//! browser build.
//!
//! | Command | Effect |
//! |---------|--------|
//! | `show` | Print the cart |
//! | `products` | Print the catalog |
//! | `add <product>` | Add one unit of a catalog product |
//! | `inc <id>` / `dec <id>` | Change quantity by one |
//! | `change <id> <delta>` | Change quantity by `delta` |
//! | `remove <id>` | Remove a line |
//! | `clear` | Empty the cart |
//! | `checkout [approve\|fail\|cancel\|unavailable]` | Simulate a payment |

pub mod commands;
pub mod config;
pub mod provider;
pub mod render;
pub mod storage;

pub use commands::{run, Command};
pub use config::{ConfigError, HostConfig};
pub use provider::{ScriptedProvider, ScriptedResult};
pub use render::ConsoleNotifier;
pub use storage::FileStorage;
