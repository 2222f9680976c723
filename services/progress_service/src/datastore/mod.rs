pub mod ddb;
pub mod memory;

use std::error::Error;

use service_core::ddb::item::ItemError;
use thiserror::Error;

pub use ddb::{DdbDatastore, TableNames};
pub use memory::MemoryDatastore;

use crate::catalog::CatalogRepository;
use crate::history::HistoryRepository;
use crate::recognition::RecognitionsRepository;

#[derive(Debug, Error)]
pub enum DatastoreError {
    #[error("Datastore request failed: {0}")]
    Request(#[source] Box<dyn Error + Send + Sync>),

    #[error("Datastore returned a malformed item: {0}")]
    MalformedItem(#[from] ItemError),

    #[error("Datastore is inconsistent: {0}")]
    Inconsistent(String),
}

impl DatastoreError {
    pub fn request(err: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        DatastoreError::Request(err.into())
    }
}

/// Everything the service needs from its persistence layer.
pub trait Datastore: CatalogRepository + HistoryRepository + RecognitionsRepository {}
impl<T: CatalogRepository + HistoryRepository + RecognitionsRepository> Datastore for T {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadConsistency {
    Eventual,
    /// Observes every write acknowledged before the read started.
    Strong,
}
