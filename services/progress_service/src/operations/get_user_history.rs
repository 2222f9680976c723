use service_core::endpoint_error::EndpointError;
use service_core::operation_error::OperationError;

use super::{internal, parse_id};
use crate::catalog::CatalogRepository;
use crate::error::ProgressError;
use crate::history::ledger::user_history;
use crate::history::HistoryRepository;
use crate::pb::{GetUserHistoryInput, GetUserHistoryOutput};

#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum GetUserHistoryError {
    #[error("User not found.")]
    UserNotFound,
}

pub(crate) async fn get_user_history(
    store: &(impl CatalogRepository + HistoryRepository),
    input: GetUserHistoryInput,
) -> Result<GetUserHistoryOutput, EndpointError<GetUserHistoryError>> {
    let user_id = parse_id(&input.user_id, "user ID")?;

    let entries = user_history(store, user_id).await.map_err(|err| match err {
        ProgressError::UserNotFound(_) => EndpointError::operation(GetUserHistoryError::UserNotFound),
        _ => internal(err),
    })?;

    Ok(GetUserHistoryOutput {
        entries: entries.into_iter().map(Into::into).collect(),
    })
}

impl OperationError for GetUserHistoryError {
    fn code(&self) -> tonic::Code {
        match self {
            Self::UserNotFound => tonic::Code::NotFound,
        }
    }
}
