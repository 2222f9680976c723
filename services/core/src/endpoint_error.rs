use std::error::Error;
use std::fmt::Display;

use strum::AsRefStr;
use tonic::Code;
use tonic::Status;

use crate::operation_error::OperationError;

/// Error envelope returned by every service endpoint.
///
/// Validation and internal failures are shared by all operations, while `Operation` carries the
/// error type specific to the endpoint.
#[derive(Debug, AsRefStr)]
pub enum EndpointError<E: OperationError> {
    Validation(String),
    Internal,
    Operation(E),
}

impl<E: OperationError> EndpointError<E> {
    pub fn validation(msg: impl Into<String>) -> Self {
        EndpointError::Validation(msg.into())
    }

    pub fn internal() -> Self {
        EndpointError::Internal
    }

    pub fn operation(err: E) -> Self {
        EndpointError::Operation(err)
    }
}

impl<E: OperationError> OperationError for EndpointError<E> {
    fn code(&self) -> tonic::Code {
        match self {
            EndpointError::Validation(_) => Code::InvalidArgument,
            EndpointError::Internal => Code::Internal,
            EndpointError::Operation(e) => e.code(),
        }
    }
}

impl<E: OperationError> Error for EndpointError<E> {}

impl<E: OperationError> Display for EndpointError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind: &str = self.as_ref();
        let msg = match self {
            EndpointError::Validation(msg) => msg.clone(),
            EndpointError::Internal => String::from("Internal server error."),
            EndpointError::Operation(err) => err.to_string(),
        };

        write!(f, "{}: {}", kind, msg)
    }
}

impl<E: OperationError> From<EndpointError<E>> for Status {
    fn from(err: EndpointError<E>) -> Self {
        Status::new(err.code(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use rstest::rstest;
    use tonic::{Code, Status};

    use super::EndpointError;
    use crate::operation_error::OperationError;

    #[derive(Debug, thiserror::Error)]
    #[error("Thing is missing.")]
    struct ThingMissing;

    impl OperationError for ThingMissing {
        fn code(&self) -> Code {
            Code::NotFound
        }
    }

    #[rstest]
    #[case(EndpointError::validation("Bad input."), Code::InvalidArgument, "Validation: Bad input.")]
    #[case(EndpointError::internal(), Code::Internal, "Internal: Internal server error.")]
    #[case(EndpointError::operation(ThingMissing), Code::NotFound, "Operation: Thing is missing.")]
    fn maps_to_status(#[case] err: EndpointError<ThingMissing>, #[case] code: Code, #[case] message: &str) {
        let status: Status = err.into();

        assert_eq!(status.code(), code);
        assert_eq!(status.message(), message);
    }

    #[test]
    fn infallible_operations_only_fail_generically() {
        let err: EndpointError<Infallible> = EndpointError::validation("Missing field.");

        assert_eq!(err.code(), Code::InvalidArgument);
    }
}
