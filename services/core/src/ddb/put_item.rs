use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::error::PutItemError;
use aws_sdk_dynamodb::model::AttributeValue;
use aws_sdk_dynamodb::output::PutItemOutput;
use aws_sdk_dynamodb::types::SdkError;
use typed_builder::TypedBuilder;

use super::adapter::Adapter;

#[derive(Debug, TypedBuilder)]
pub struct PutItemInput {
    #[builder(setter(into))]
    pub table_name: String,

    #[builder(setter(into))]
    pub item: HashMap<String, AttributeValue>,

    /// When set, the write only happens if the expression holds for the item currently stored
    /// under the same key.
    #[builder(default, setter(strip_option, into))]
    pub condition_expression: Option<String>,
}

#[async_trait]
pub trait PutItem {
    async fn put_item(&self, input: PutItemInput) -> Result<PutItemOutput, SdkError<PutItemError>>;
}

#[async_trait]
impl PutItem for Adapter {
    async fn put_item(&self, input: PutItemInput) -> Result<PutItemOutput, SdkError<PutItemError>> {
        self.raw
            .put_item()
            .table_name(input.table_name)
            .set_item(Some(input.item))
            .set_condition_expression(input.condition_expression)
            .send()
            .await
    }
}

/// Whether a failed put was rejected by its condition expression rather than by the service.
pub fn is_condition_failure(err: &SdkError<PutItemError>) -> bool {
    match err {
        SdkError::ServiceError { err, .. } => err.is_conditional_check_failed_exception(),
        _ => false,
    }
}
