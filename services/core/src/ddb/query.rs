use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::error::QueryError;
use aws_sdk_dynamodb::model::AttributeValue;
use aws_sdk_dynamodb::output::QueryOutput;
use aws_sdk_dynamodb::types::SdkError;
use typed_builder::TypedBuilder;

use super::adapter::Adapter;

#[derive(Debug, Clone, TypedBuilder)]
pub struct QueryInput {
    #[builder(setter(into))]
    pub table_name: String,

    #[builder(default, setter(strip_option, into))]
    pub index_name: Option<String>,

    #[builder(setter(into))]
    pub limit: i32,

    #[builder(default)]
    pub exclusive_start_key: Option<HashMap<String, AttributeValue>>,

    #[builder(setter(into))]
    pub key_condition_expression: String,

    #[builder(default, setter(strip_option, into))]
    pub filter_expression: Option<String>,

    #[builder(default)]
    pub expression_attribute_names: Option<HashMap<String, String>>,

    #[builder(default)]
    pub expression_attribute_values: Option<HashMap<String, AttributeValue>>,

    #[builder(default = false)]
    pub consistent_read: bool,
}

#[async_trait]
pub trait Query {
    async fn query(&self, input: QueryInput) -> Result<QueryOutput, SdkError<QueryError>>;
}

/// Runs the query page after page until DynamoDB stops returning a `LastEvaluatedKey`.
pub async fn query_all(
    ddb: &(impl Query + Sync),
    mut input: QueryInput,
) -> Result<Vec<HashMap<String, AttributeValue>>, SdkError<QueryError>> {
    let mut items = Vec::new();
    loop {
        let output = ddb.query(input.clone()).await?;
        items.extend(output.items.unwrap_or_default());

        match output.last_evaluated_key {
            Some(key) if !key.is_empty() => input.exclusive_start_key = Some(key),
            _ => break,
        }
    }

    Ok(items)
}

#[async_trait]
impl Query for Adapter {
    async fn query(&self, input: QueryInput) -> Result<QueryOutput, SdkError<QueryError>> {
        self.raw
            .query()
            .table_name(input.table_name)
            .set_index_name(input.index_name)
            .limit(input.limit)
            .set_exclusive_start_key(input.exclusive_start_key)
            .key_condition_expression(input.key_condition_expression)
            .set_filter_expression(input.filter_expression)
            .set_expression_attribute_names(input.expression_attribute_names)
            .set_expression_attribute_values(input.expression_attribute_values)
            .consistent_read(input.consistent_read)
            .send()
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Serves two pages, the first one pointing at the second.
    #[derive(Default)]
    struct TwoPages {
        calls: AtomicUsize,
    }

    fn item(id: &str) -> HashMap<String, AttributeValue> {
        HashMap::from([("Id".to_string(), AttributeValue::S(id.to_string()))])
    }

    #[async_trait]
    impl Query for TwoPages {
        async fn query(&self, input: QueryInput) -> Result<QueryOutput, SdkError<QueryError>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let output = match input.exclusive_start_key {
                None => QueryOutput::builder()
                    .items(item("a"))
                    .items(item("b"))
                    .set_last_evaluated_key(Some(item("b"))),
                Some(start) => {
                    assert_eq!(start, item("b"));
                    QueryOutput::builder().items(item("c"))
                }
            };
            Ok(output.build())
        }
    }

    #[tokio::test]
    async fn follows_last_evaluated_key() {
        let ddb = TwoPages::default();
        let input = QueryInput::builder()
            .table_name("things")
            .key_condition_expression("Owner = :owner")
            .limit(2)
            .build();

        let items = query_all(&ddb, input).await.unwrap();

        assert_eq!(items, vec![item("a"), item("b"), item("c")]);
        assert_eq!(ddb.calls.load(Ordering::SeqCst), 2);
    }
}
