//! Tic-tac-toe over HTTP.
//!
//! Clients create a game, then submit the whole board they want to see
//! next. The server checks that exactly one of their marks was added,
//! answers with a random counter-move and reports the new status.
//!
//! # Architecture
//!
//! - **Registry**: in-memory store of games behind one lock
//! - **Api**: axum routes mapping requests onto registry operations
//! - **Config**: bind address and public URL, from TOML and CLI flags
//!
//! # Example
//!
//! ```
//! use strictly_rest::Registry;
//!
//! let registry = Registry::with_seed(42);
//! let game = registry.create("---------")?;
//! assert_eq!(game.board().occupied(), 1);
//! # Ok::<(), strictly_rest::RegistryError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod api;
mod config;
mod registry;

pub use api::{AppState, BoardRequest, Deleted, ErrorBody, GAMES_PATH, Health, router};
pub use config::{ConfigError, ServerConfig};
pub use registry::{Registry, RegistryError};
