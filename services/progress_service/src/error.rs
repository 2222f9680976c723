use thiserror::Error;
use uuid::Uuid;

use crate::catalog::{ChapterKey, UserLookup};
use crate::datastore::DatastoreError;

#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("User {0} not found.")]
    UserNotFound(UserLookup),

    #[error("Course {0} not found.")]
    CourseNotFound(Uuid),

    /// The course exists but has no chapter at the requested order.
    #[error("Chapter {0} not found.")]
    ChapterNotFound(ChapterKey),

    #[error("User {user_id} has not completed course {course_id}.")]
    CourseNotCompleted { user_id: Uuid, course_id: Uuid },

    #[error(transparent)]
    Datastore(#[from] DatastoreError),
}
