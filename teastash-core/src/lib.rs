//! # teastash-core
//!
//! Core library for teastash - a tea inventory client backed by a managed
//! GraphQL store.
//!
//! This library provides:
//! - Domain types for tea records and the add-form draft buffer
//! - Local collection state, the single source of truth for rendering
//! - A sync controller applying optimistic local mutations with
//!   best-effort remote reconciliation
//! - A GraphQL remote store client
//! - Configuration management and logging infrastructure
//!
//! ## Architecture
//!
//! The rendering layer reads the collection through [`SyncController`] and
//! dispatches user intents (`add`, `drink`, `remove`, `refresh`) into it.
//! Each operation mutates local state synchronously, then issues the
//! matching remote call; remote failures are logged and swallowed, leaving
//! the optimistic state in place until the next refresh reconciles.
//!
//! ## Example
//!
//! ```rust,no_run
//! use teastash_core::{Config, GraphQlStore, SyncController};
//!
//! # async fn demo() -> teastash_core::Result<()> {
//! let config = Config::load()?;
//! let store = GraphQlStore::new(&config.remote)?;
//! let teas = SyncController::new(store);
//! teas.refresh().await;
//! # Ok(())
//! # }
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use error::{Error, Result};
pub use remote::{GraphQlStore, RemoteStore};
pub use state::TeaList;
pub use sync::SyncController;
pub use types::{CreateTea, DraftField, TeaDraft, TeaRecord, UpdateTea};

// Public modules
pub mod config;
pub mod error;
pub mod logging;
pub mod remote;
pub mod state;
pub mod sync;
pub mod types;
