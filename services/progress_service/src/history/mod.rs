pub mod ddb_repository;
pub mod ledger;
pub mod repository;
pub mod types;

pub use repository::HistoryRepository;
pub use types::HistoryEntry;
