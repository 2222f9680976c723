use async_trait::async_trait;
use uuid::Uuid;

use super::types::HistoryEntry;
use crate::datastore::DatastoreError;

/// Append-only ledger of chapter consumption. Appends need no coordination between callers.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    async fn append_entry(&self, entry: &HistoryEntry) -> Result<(), DatastoreError>;

    async fn list_entries(&self, user_id: &Uuid) -> Result<Vec<HistoryEntry>, DatastoreError>;

    async fn list_course_entries(&self, user_id: &Uuid, course_id: &Uuid) -> Result<Vec<HistoryEntry>, DatastoreError>;
}
