//! Remote store interface.
//!
//! The sync controller only knows this trait; the concrete transport lives
//! in [`graphql`]. All four operations are asynchronous and fallible, and a
//! failure carries no structure beyond [`crate::Error::Remote`] - callers
//! log it and move on.

mod graphql;

pub use graphql::GraphQlStore;

use crate::error::Result;
use crate::types::{CreateTea, TeaRecord, UpdateTea};

/// The authoritative tea store, reachable through one query and three
/// mutations.
///
/// Futures here are not required to be `Send`: the whole client runs on a
/// single-threaded event loop.
#[allow(async_fn_in_trait)]
pub trait RemoteStore {
    /// Fetch all records.
    async fn list(&self) -> Result<Vec<TeaRecord>>;

    /// Create a record; the store assigns the `id`.
    async fn create(&self, input: &CreateTea) -> Result<TeaRecord>;

    /// Update a record in place, keyed by `input.id`.
    async fn update(&self, input: &UpdateTea) -> Result<TeaRecord>;

    /// Delete the record with the given `id`.
    async fn delete(&self, id: &str) -> Result<TeaRecord>;
}
