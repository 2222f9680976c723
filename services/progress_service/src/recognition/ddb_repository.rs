use async_trait::async_trait;
use common_macros::hash_map;
use service_core::ddb::item::to_item;
use service_core::ddb::put_item::{is_condition_failure, PutItemInput};
use service_core::ddb::query::QueryInput;
use uuid::Uuid;

use super::repository::{CreateRecognitionError, RecognitionsRepository};
use super::types::Recognition;
use crate::datastore::ddb::{uuid_attr, DdbDatastore, ThreadSafeDdbClient, PAGE_SIZE};
use crate::datastore::{DatastoreError, ReadConsistency};

#[async_trait]
impl<T: ThreadSafeDdbClient> RecognitionsRepository for DdbDatastore<T> {
    async fn find_recognition(
        &self,
        user_id: &Uuid,
        course_id: &Uuid,
        consistency: ReadConsistency,
    ) -> Result<Option<Recognition>, DatastoreError> {
        let key = hash_map! {
            "UserId".to_string() => uuid_attr(user_id),
            "CourseId".to_string() => uuid_attr(course_id),
        };

        self.get(&self.tables.recognitions, key, consistency).await
    }

    async fn create_recognition(&self, recognition: &Recognition) -> Result<(), CreateRecognitionError> {
        // (UserId, CourseId) is the table key, so the condition only fails when a recognition for
        // the same pair is already stored.
        let put_item_input = PutItemInput::builder()
            .table_name(self.tables.recognitions.as_str())
            .item(to_item(recognition).map_err(DatastoreError::from)?)
            .condition_expression("attribute_not_exists(UserId)")
            .build();

        self.ddb.put_item(put_item_input).await.map_err(|err| {
            if is_condition_failure(&err) {
                CreateRecognitionError::DuplicateRecognition
            } else {
                tracing::error!(error = ?err, "Storing recognition failed.");
                CreateRecognitionError::Datastore(DatastoreError::request(err))
            }
        })?;

        Ok(())
    }

    async fn list_recognitions(&self, user_id: &Uuid) -> Result<Vec<Recognition>, DatastoreError> {
        let query_input = QueryInput::builder()
            .table_name(self.tables.recognitions.as_str())
            .key_condition_expression("UserId = :user")
            .expression_attribute_values(Some(hash_map! {
                ":user".to_string() => uuid_attr(user_id),
            }))
            .limit(PAGE_SIZE)
            .build();

        self.query(query_input).await
    }
}
