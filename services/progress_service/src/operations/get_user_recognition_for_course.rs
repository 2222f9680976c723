use service_core::endpoint_error::EndpointError;
use service_core::operation_error::OperationError;

use super::{course_name, internal, parse_id};
use crate::datastore::Datastore;
use crate::error::ProgressError;
use crate::pb::{GetUserRecognitionForCourseInput, GetUserRecognitionForCourseOutput, RecognitionDetails};
use crate::recognition::issuer::get_or_create;

#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum GetUserRecognitionForCourseError {
    #[error("User not found.")]
    UserNotFound,

    #[error("Course not found.")]
    CourseNotFound,

    #[error("The user has not completed the course yet.")]
    CourseNotCompleted,
}

pub(crate) async fn get_user_recognition_for_course(
    store: &impl Datastore,
    input: GetUserRecognitionForCourseInput,
) -> Result<GetUserRecognitionForCourseOutput, EndpointError<GetUserRecognitionForCourseError>> {
    let user_id = parse_id(&input.user_id, "user ID")?;
    let course_id = parse_id(&input.course_id, "course ID")?;

    let recognition = get_or_create(store, user_id, course_id)
        .await
        .map_err(|err| match err {
            ProgressError::UserNotFound(_) => {
                EndpointError::operation(GetUserRecognitionForCourseError::UserNotFound)
            }
            ProgressError::CourseNotFound(_) => {
                EndpointError::operation(GetUserRecognitionForCourseError::CourseNotFound)
            }
            ProgressError::CourseNotCompleted { .. } => {
                EndpointError::operation(GetUserRecognitionForCourseError::CourseNotCompleted)
            }
            _ => internal(err),
        })?;
    let name = course_name(store, &course_id).await.map_err(internal)?;

    Ok(GetUserRecognitionForCourseOutput {
        recognition: Some(RecognitionDetails::new(&recognition, name)),
    })
}

impl OperationError for GetUserRecognitionForCourseError {
    fn code(&self) -> tonic::Code {
        match self {
            Self::UserNotFound | Self::CourseNotFound => tonic::Code::NotFound,
            Self::CourseNotCompleted => tonic::Code::FailedPrecondition,
        }
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::history::ledger::record_seen;
    use crate::recognition::RecognitionsRepository;
    use crate::testing::Fixture;

    fn input(user_id: Uuid, course_id: Uuid) -> GetUserRecognitionForCourseInput {
        GetUserRecognitionForCourseInput {
            user_id: user_id.to_string(),
            course_id: course_id.to_string(),
        }
    }

    #[tokio::test]
    async fn incomplete_course_is_failed_precondition_until_finished() {
        let fixture = Fixture::with_course_of(2).await;
        let user_id = fixture.learner.user_id;
        let course_id = fixture.course.course_id;
        let learner = fixture.learner_lookup();
        record_seen(&fixture.store, &learner, course_id, 1).await.unwrap();

        let err = get_user_recognition_for_course(&fixture.store, input(user_id, course_id))
            .await
            .unwrap_err();
        assert_eq!(err.code(), tonic::Code::FailedPrecondition);
        assert!(fixture.store.list_recognitions(&user_id).await.unwrap().is_empty());

        record_seen(&fixture.store, &learner, course_id, 2).await.unwrap();
        let first = get_user_recognition_for_course(&fixture.store, input(user_id, course_id))
            .await
            .unwrap();
        let second = get_user_recognition_for_course(&fixture.store, input(user_id, course_id))
            .await
            .unwrap();

        let details = first.recognition.unwrap();
        assert_eq!(details.user_id, user_id.to_string());
        assert_eq!(details.course_name, fixture.course.name);
        assert_eq!(Some(details), second.recognition);
    }

    #[tokio::test]
    async fn unknown_references_are_not_found() {
        let fixture = Fixture::with_course_of(1).await;

        let unknown_user = input(Uuid::new_v4(), fixture.course.course_id);
        let unknown_course = input(fixture.learner.user_id, Uuid::new_v4());

        let unknown_user = get_user_recognition_for_course(&fixture.store, unknown_user)
            .await
            .unwrap_err();
        let unknown_course = get_user_recognition_for_course(&fixture.store, unknown_course)
            .await
            .unwrap_err();

        assert!(matches!(
            unknown_user,
            EndpointError::Operation(GetUserRecognitionForCourseError::UserNotFound)
        ));
        assert!(matches!(
            unknown_course,
            EndpointError::Operation(GetUserRecognitionForCourseError::CourseNotFound)
        ));
    }

    #[tokio::test]
    async fn malformed_course_id_is_invalid_argument() {
        let fixture = Fixture::with_course_of(1).await;
        let input = GetUserRecognitionForCourseInput {
            user_id: fixture.learner.user_id.to_string(),
            course_id: "42".to_string(),
        };

        let err = get_user_recognition_for_course(&fixture.store, input).await.unwrap_err();

        assert_eq!(err.code(), tonic::Code::InvalidArgument);
    }
}
