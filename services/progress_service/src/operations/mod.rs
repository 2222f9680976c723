pub(crate) mod get_user_history;
pub(crate) mod get_user_recognition_for_course;
pub(crate) mod get_user_recognitions;
pub(crate) mod record_chapter_seen;

use service_core::endpoint_error::EndpointError;
use service_core::operation_error::OperationError;
use uuid::Uuid;

use crate::catalog::CatalogRepository;
use crate::error::ProgressError;

pub(crate) fn parse_id<E: OperationError>(value: &str, field: &str) -> Result<Uuid, EndpointError<E>> {
    Uuid::parse_str(value).map_err(|_| EndpointError::validation(format!("Invalid {} provided.", field)))
}

/// Failures the caller cannot act on. The cause is logged and only `Internal` is returned.
pub(crate) fn internal<E: OperationError>(err: ProgressError) -> EndpointError<E> {
    tracing::error!(error = ?err, "Operation failed.");
    EndpointError::internal()
}

/// Name of the course a recognition was issued for. Recognitions outlive their course, so a
/// missing course yields an empty name.
pub(crate) async fn course_name(
    catalog: &impl CatalogRepository,
    course_id: &Uuid,
) -> Result<String, ProgressError> {
    match catalog.find_course(course_id).await? {
        Some(course) => Ok(course.name),
        None => {
            tracing::warn!(%course_id, "Recognition refers to a course that no longer exists.");
            Ok(String::new())
        }
    }
}
