use async_trait::async_trait;
use common_macros::hash_map;
use service_core::ddb::query::QueryInput;
use uuid::Uuid;

use super::repository::HistoryRepository;
use super::types::HistoryEntry;
use crate::datastore::ddb::{uuid_attr, DdbDatastore, ThreadSafeDdbClient, PAGE_SIZE};
use crate::datastore::DatastoreError;

#[async_trait]
impl<T: ThreadSafeDdbClient> HistoryRepository for DdbDatastore<T> {
    async fn append_entry(&self, entry: &HistoryEntry) -> Result<(), DatastoreError> {
        // EntryId is a fresh v4 UUID, so the put never replaces an earlier entry.
        self.put(&self.tables.history, entry).await
    }

    async fn list_entries(&self, user_id: &Uuid) -> Result<Vec<HistoryEntry>, DatastoreError> {
        let query_input = QueryInput::builder()
            .table_name(self.tables.history.as_str())
            .key_condition_expression("UserId = :user")
            .expression_attribute_values(Some(hash_map! {
                ":user".to_string() => uuid_attr(user_id),
            }))
            .limit(PAGE_SIZE)
            .build();

        self.query(query_input).await
    }

    async fn list_course_entries(&self, user_id: &Uuid, course_id: &Uuid) -> Result<Vec<HistoryEntry>, DatastoreError> {
        let query_input = QueryInput::builder()
            .table_name(self.tables.history.as_str())
            .key_condition_expression("UserId = :user")
            .filter_expression("CourseId = :course")
            .expression_attribute_values(Some(hash_map! {
                ":user".to_string() => uuid_attr(user_id),
                ":course".to_string() => uuid_attr(course_id),
            }))
            .limit(PAGE_SIZE)
            .build();

        self.query(query_input).await
    }
}
