use std::collections::HashMap;

use aws_sdk_dynamodb::model::AttributeValue;
use serde::de::DeserializeOwned;
use serde::Serialize;
use service_core::ddb::get_item::{GetItem, GetItemInput};
use service_core::ddb::item::{from_item, to_item};
use service_core::ddb::put_item::{PutItem, PutItemInput};
use service_core::ddb::query::{query_all, Query, QueryInput};
use service_core::ddb::Adapter;
use service_core::simple_err_map;

use super::{DatastoreError, ReadConsistency};

/// Items fetched per page when listing.
pub(crate) const PAGE_SIZE: i32 = 100;

pub trait ThreadSafeDdbClient: PutItem + GetItem + Query + Send + Sync {}
impl<T: PutItem + GetItem + Query + Send + Sync> ThreadSafeDdbClient for T {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableNames {
    pub courses: String,
    pub chapters: String,
    pub users: String,
    pub materials: String,
    pub modules: String,
    pub history: String,
    pub recognitions: String,
}

/// DynamoDB-backed implementation of every repository of the service.
pub struct DdbDatastore<T: ThreadSafeDdbClient> {
    pub(crate) ddb: T,
    pub(crate) tables: TableNames,
}

impl DdbDatastore<Adapter> {
    /// Builds a client from the shared AWS environment, optionally pointed at a custom endpoint
    /// such as DynamoDB Local.
    pub async fn connect(endpoint: Option<http::Uri>, tables: TableNames) -> Self {
        let shared_config = aws_config::load_from_env().await;

        let dynamodb_config = match endpoint {
            Some(uri) => {
                log::info!("Using DynamoDB with endpoint: {}.", uri);
                aws_sdk_dynamodb::config::Builder::from(&shared_config)
                    .endpoint_resolver(aws_sdk_dynamodb::Endpoint::immutable(uri))
                    .build()
            }
            None => aws_sdk_dynamodb::config::Config::new(&shared_config),
        };

        DdbDatastore::new(Adapter::from_conf(dynamodb_config), tables)
    }
}

impl<T: ThreadSafeDdbClient> DdbDatastore<T> {
    pub fn new(ddb: T, tables: TableNames) -> Self {
        Self { ddb, tables }
    }

    pub(crate) async fn get<R: DeserializeOwned>(
        &self,
        table_name: &str,
        key: HashMap<String, AttributeValue>,
        consistency: ReadConsistency,
    ) -> Result<Option<R>, DatastoreError> {
        let get_item_input = GetItemInput::builder()
            .table_name(table_name)
            .key(key)
            .consistent_read(consistency == ReadConsistency::Strong)
            .build();
        let output = self.ddb
            .get_item(get_item_input)
            .await
            .map_err(simple_err_map!(DatastoreError::request, table_name, "GetItem failed."))?;

        match output.item {
            None => Ok(None),
            Some(item) => Ok(Some(from_item(item)?)),
        }
    }

    pub(crate) async fn put<R: Serialize>(&self, table_name: &str, record: &R) -> Result<(), DatastoreError> {
        let put_item_input = PutItemInput::builder()
            .table_name(table_name)
            .item(to_item(record)?)
            .build();
        self.ddb
            .put_item(put_item_input)
            .await
            .map_err(simple_err_map!(DatastoreError::request, table_name, "PutItem failed."))?;

        Ok(())
    }

    pub(crate) async fn query<R: DeserializeOwned>(&self, input: QueryInput) -> Result<Vec<R>, DatastoreError> {
        let table_name = input.table_name.clone();
        let items = query_all(&self.ddb, input)
            .await
            .map_err(simple_err_map!(DatastoreError::request, %table_name, "Query failed."))?;

        items
            .into_iter()
            .map(|item| from_item(item).map_err(DatastoreError::from))
            .collect()
    }
}

pub(crate) fn uuid_attr(id: &uuid::Uuid) -> AttributeValue {
    AttributeValue::S(id.hyphenated().to_string())
}
