use service_core::endpoint_error::EndpointError;
use service_core::operation_error::OperationError;

use super::{course_name, internal, parse_id};
use crate::datastore::Datastore;
use crate::error::ProgressError;
use crate::pb::{GetUserRecognitionsInput, GetUserRecognitionsOutput, RecognitionSummary};
use crate::recognition::issuer::list_all;

#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum GetUserRecognitionsError {
    #[error("User not found.")]
    UserNotFound,
}

pub(crate) async fn get_user_recognitions(
    store: &impl Datastore,
    input: GetUserRecognitionsInput,
) -> Result<GetUserRecognitionsOutput, EndpointError<GetUserRecognitionsError>> {
    let user_id = parse_id(&input.user_id, "user ID")?;

    let recognitions = list_all(store, user_id).await.map_err(|err| match err {
        ProgressError::UserNotFound(_) => EndpointError::operation(GetUserRecognitionsError::UserNotFound),
        _ => internal(err),
    })?;

    let mut summaries = Vec::with_capacity(recognitions.len());
    for recognition in &recognitions {
        let name = course_name(store, &recognition.course_id).await.map_err(internal)?;
        summaries.push(RecognitionSummary::new(recognition, name));
    }

    Ok(GetUserRecognitionsOutput {
        recognitions: summaries,
    })
}

impl OperationError for GetUserRecognitionsError {
    fn code(&self) -> tonic::Code {
        match self {
            Self::UserNotFound => tonic::Code::NotFound,
        }
    }
}
