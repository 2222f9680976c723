use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use super::types::Recognition;
use crate::datastore::{DatastoreError, ReadConsistency};

#[derive(Debug, Error)]
pub enum CreateRecognitionError {
    #[error("A recognition for this user and course already exists.")]
    DuplicateRecognition,

    #[error(transparent)]
    Datastore(#[from] DatastoreError),
}

#[async_trait]
pub trait RecognitionsRepository: Send + Sync {
    async fn find_recognition(
        &self,
        user_id: &Uuid,
        course_id: &Uuid,
        consistency: ReadConsistency,
    ) -> Result<Option<Recognition>, DatastoreError>;

    /// Stores a new recognition. Implementations must reject a second recognition for the same
    /// user and course with [`CreateRecognitionError::DuplicateRecognition`], even when both
    /// writes race.
    async fn create_recognition(&self, recognition: &Recognition) -> Result<(), CreateRecognitionError>;

    async fn list_recognitions(&self, user_id: &Uuid) -> Result<Vec<Recognition>, DatastoreError>;
}
