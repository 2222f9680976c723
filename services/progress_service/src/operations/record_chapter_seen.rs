use service_core::endpoint_error::EndpointError;
use service_core::operation_error::OperationError;
use validator::validate_email;

use super::{internal, parse_id};
use crate::catalog::{CatalogRepository, UserLookup};
use crate::error::ProgressError;
use crate::history::ledger::record_seen;
use crate::history::HistoryRepository;
use crate::pb::record_chapter_seen_input::User;
use crate::pb::{RecordChapterSeenInput, RecordChapterSeenOutput};

#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum RecordChapterSeenError {
    #[error("User not found.")]
    UserNotFound,

    #[error("Course not found.")]
    CourseNotFound,

    #[error("The course has no chapter with this order.")]
    ChapterNotFound,
}

pub(crate) async fn record_chapter_seen(
    store: &(impl CatalogRepository + HistoryRepository),
    input: RecordChapterSeenInput,
) -> Result<RecordChapterSeenOutput, EndpointError<RecordChapterSeenError>> {
    let user = match input.user {
        Some(User::UserId(user_id)) => UserLookup::ById(parse_id(&user_id, "user ID")?),
        Some(User::UserEmail(email)) if validate_email(&email) => UserLookup::ByEmail(email),
        Some(User::UserEmail(_)) => return Err(EndpointError::validation("Invalid user email provided.")),
        None => return Err(EndpointError::validation("User missing.")),
    };
    let course_id = parse_id(&input.course_id, "course ID")?;

    let entry = record_seen(store, &user, course_id, input.order)
        .await
        .map_err(|err| match err {
            ProgressError::UserNotFound(_) => EndpointError::operation(RecordChapterSeenError::UserNotFound),
            ProgressError::CourseNotFound(_) => EndpointError::operation(RecordChapterSeenError::CourseNotFound),
            ProgressError::ChapterNotFound(_) => EndpointError::operation(RecordChapterSeenError::ChapterNotFound),
            _ => internal(err),
        })?;

    Ok(RecordChapterSeenOutput {
        entry_id: entry.entry_id.to_string(),
    })
}

impl OperationError for RecordChapterSeenError {
    fn code(&self) -> tonic::Code {
        match self {
            Self::UserNotFound | Self::CourseNotFound | Self::ChapterNotFound => tonic::Code::NotFound,
        }
    }
}
