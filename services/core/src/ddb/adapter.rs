use aws_sdk_dynamodb::{Client as RawClient, Config};

/// DynamoDB client implementing [`GetItem`](super::get_item::GetItem),
/// [`PutItem`](super::put_item::PutItem) and [`Query`](super::query::Query).
#[derive(Debug, Clone)]
pub struct Adapter {
    pub(crate) raw: RawClient,
}

impl Adapter {
    pub fn from_conf(conf: Config) -> Self {
        RawClient::from_conf(conf).into()
    }
}

impl From<RawClient> for Adapter {
    fn from(raw: RawClient) -> Self {
        Adapter { raw }
    }
}
