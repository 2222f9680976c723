use core::fmt;
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use thiserror::Error;

use crate::datastore::TableNames;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContextKey {
    Datastore,
    DynamoDbEndpoint,
    CoursesTableName,
    ChaptersTableName,
    UsersTableName,
    MaterialsTableName,
    ModulesTableName,
    HistoryTableName,
    RecognitionsTableName,
    ListenAddress,
    LogFilter,
    DemoData,
}

impl fmt::Display for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Self::Datastore => "DATASTORE",
            Self::DynamoDbEndpoint => "DYNAMODB_ENDPOINT",
            Self::CoursesTableName => "COURSES_TABLE_NAME",
            Self::ChaptersTableName => "CHAPTERS_TABLE_NAME",
            Self::UsersTableName => "USERS_TABLE_NAME",
            Self::MaterialsTableName => "MATERIALS_TABLE_NAME",
            Self::ModulesTableName => "MODULES_TABLE_NAME",
            Self::HistoryTableName => "HISTORY_TABLE_NAME",
            Self::RecognitionsTableName => "RECOGNITIONS_TABLE_NAME",
            Self::ListenAddress => "LISTEN_ADDRESS",
            Self::LogFilter => "LOG_FILTER",
            Self::DemoData => "DEMO_DATA",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContextError {
    #[error("Environment variable {0} is not set.")]
    Missing(ContextKey),

    #[error("Environment variable {key} has an invalid value: {value:?}.")]
    Invalid { key: ContextKey, value: String },
}

#[derive(Clone, Debug, PartialEq)]
pub enum DatastoreKind {
    DynamoDb {
        endpoint: Option<http::Uri>,
        tables: TableNames,
    },
    Memory,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Context {
    pub listen_address: SocketAddr,
    /// Filter directive used when `RUST_LOG` is not set.
    pub log_filter: String,
    pub demo_data: bool,
    pub datastore: DatastoreKind,
}

const DEFAULT_LISTEN_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_LOG_FILTER: &str = "info";

impl Context {
    pub fn from_env() -> Result<Self, ContextError> {
        Self::from_lookup(|key| env::var(key.to_string()).ok())
    }

    pub fn from_lookup(lookup: impl Fn(ContextKey) -> Option<String>) -> Result<Self, ContextError> {
        let required = |key| lookup(key).ok_or(ContextError::Missing(key));

        let datastore = match lookup(ContextKey::Datastore).as_deref() {
            None | Some("dynamodb") => DatastoreKind::DynamoDb {
                endpoint: lookup(ContextKey::DynamoDbEndpoint)
                    .map(|value| parse(ContextKey::DynamoDbEndpoint, value))
                    .transpose()?,
                tables: TableNames {
                    courses: required(ContextKey::CoursesTableName)?,
                    chapters: required(ContextKey::ChaptersTableName)?,
                    users: required(ContextKey::UsersTableName)?,
                    materials: required(ContextKey::MaterialsTableName)?,
                    modules: required(ContextKey::ModulesTableName)?,
                    history: required(ContextKey::HistoryTableName)?,
                    recognitions: required(ContextKey::RecognitionsTableName)?,
                },
            },
            Some("memory") => DatastoreKind::Memory,
            Some(other) => {
                return Err(ContextError::Invalid {
                    key: ContextKey::Datastore,
                    value: other.to_string(),
                })
            }
        };

        let listen_address = lookup(ContextKey::ListenAddress).unwrap_or_else(|| DEFAULT_LISTEN_ADDRESS.to_string());
        let demo_data = match lookup(ContextKey::DemoData).as_deref() {
            None | Some("") | Some("false") | Some("0") => false,
            Some("true") | Some("1") => true,
            Some(other) => {
                return Err(ContextError::Invalid {
                    key: ContextKey::DemoData,
                    value: other.to_string(),
                })
            }
        };

        Ok(Context {
            listen_address: parse(ContextKey::ListenAddress, listen_address)?,
            log_filter: lookup(ContextKey::LogFilter).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            demo_data,
            datastore,
        })
    }
}

fn parse<T: FromStr>(key: ContextKey, value: String) -> Result<T, ContextError> {
    value.parse().map_err(|_| ContextError::Invalid { key, value })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rstest::rstest;

    use super::*;

    fn lookup_in(vars: &[(ContextKey, &str)]) -> impl Fn(ContextKey) -> Option<String> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| vars.get(&key.to_string()).cloned()
    }

    fn table_vars() -> Vec<(ContextKey, &'static str)> {
        vec![
            (ContextKey::CoursesTableName, "courses"),
            (ContextKey::ChaptersTableName, "chapters"),
            (ContextKey::UsersTableName, "users"),
            (ContextKey::MaterialsTableName, "materials"),
            (ContextKey::ModulesTableName, "modules"),
            (ContextKey::HistoryTableName, "history"),
            (ContextKey::RecognitionsTableName, "recognitions"),
        ]
    }

    #[test]
    fn defaults_to_dynamodb() {
        let context = Context::from_lookup(lookup_in(&table_vars())).unwrap();

        assert_eq!(context.listen_address, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(context.log_filter, "info");
        assert!(!context.demo_data);
        match context.datastore {
            DatastoreKind::DynamoDb { endpoint, tables } => {
                assert_eq!(endpoint, None);
                assert_eq!(tables.history, "history");
                assert_eq!(tables.recognitions, "recognitions");
            }
            DatastoreKind::Memory => panic!("expected DynamoDB"),
        }
    }

    #[test]
    fn dynamodb_requires_every_table_name() {
        let mut vars = table_vars();
        vars.retain(|(key, _)| *key != ContextKey::RecognitionsTableName);

        let err = Context::from_lookup(lookup_in(&vars)).unwrap_err();

        assert_eq!(err, ContextError::Missing(ContextKey::RecognitionsTableName));
        assert_eq!(err.to_string(), "Environment variable RECOGNITIONS_TABLE_NAME is not set.");
    }

    #[test]
    fn memory_datastore_needs_no_tables() {
        let vars = [
            (ContextKey::Datastore, "memory"),
            (ContextKey::ListenAddress, "127.0.0.1:50051"),
            (ContextKey::DemoData, "1"),
        ];

        let context = Context::from_lookup(lookup_in(&vars)).unwrap();

        assert_eq!(context.datastore, DatastoreKind::Memory);
        assert_eq!(context.listen_address.port(), 50051);
        assert!(context.demo_data);
    }

    #[rstest]
    #[case(ContextKey::Datastore, "postgres")]
    #[case(ContextKey::ListenAddress, "localhost")]
    #[case(ContextKey::DemoData, "yes")]
    #[case(ContextKey::DynamoDbEndpoint, "not a uri")]
    fn rejects_malformed_values(#[case] key: ContextKey, #[case] value: &str) {
        let mut vars: Vec<(ContextKey, &str)> = table_vars();
        vars.push((key, value));

        let err = Context::from_lookup(lookup_in(&vars)).unwrap_err();

        assert_eq!(
            err,
            ContextError::Invalid {
                key,
                value: value.to_string()
            }
        );
    }
}
