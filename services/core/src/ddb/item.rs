//! Conversion between serde records and DynamoDB attribute maps.
//!
//! Records travel through [`serde_json::Value`]: strings become `S`, numbers `N`, booleans `BOOL`,
//! sequences `L` and nested structs `M`. Reading also accepts the set types `SS` and `NS`.

use std::collections::HashMap;

use aws_sdk_dynamodb::model::AttributeValue;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Number, Value};
use thiserror::Error;

pub type Item = HashMap<String, AttributeValue>;

#[derive(Debug, Error)]
pub enum ItemError {
    #[error("Record does not serialize to a map.")]
    NotAMap,

    #[error("Attribute {0:?} has an unsupported type.")]
    UnsupportedAttribute(String),

    #[error("Number attribute value {0:?} is malformed.")]
    MalformedNumber(String),

    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}

pub fn to_item<T: Serialize>(record: &T) -> Result<Item, ItemError> {
    match serde_json::to_value(record)? {
        Value::Object(fields) => fields
            .into_iter()
            .map(|(name, value)| Ok((name, to_attribute(value))))
            .collect(),
        _ => Err(ItemError::NotAMap),
    }
}

pub fn from_item<T: DeserializeOwned>(item: Item) -> Result<T, ItemError> {
    let mut fields = Map::with_capacity(item.len());
    for (name, attr) in item {
        let value = from_attribute(&name, attr)?;
        fields.insert(name, value);
    }

    Ok(serde_json::from_value(Value::Object(fields))?)
}

fn to_attribute(value: Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s),
        Value::Array(values) => AttributeValue::L(values.into_iter().map(to_attribute).collect()),
        Value::Object(fields) => AttributeValue::M(
            fields
                .into_iter()
                .map(|(name, value)| (name, to_attribute(value)))
                .collect(),
        ),
    }
}

fn from_attribute(name: &str, attr: AttributeValue) -> Result<Value, ItemError> {
    let value = match attr {
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::Bool(b) => Value::Bool(b),
        AttributeValue::N(n) => Value::Number(parse_number(n)?),
        AttributeValue::S(s) => Value::String(s),
        AttributeValue::Ss(values) => Value::Array(values.into_iter().map(Value::String).collect()),
        AttributeValue::Ns(values) => Value::Array(
            values
                .into_iter()
                .map(|n| parse_number(n).map(Value::Number))
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::L(values) => Value::Array(
            values
                .into_iter()
                .map(|attr| from_attribute(name, attr))
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::M(fields) => {
            let mut map = Map::with_capacity(fields.len());
            for (field, attr) in fields {
                let value = from_attribute(&field, attr)?;
                map.insert(field, value);
            }
            Value::Object(map)
        }
        _ => return Err(ItemError::UnsupportedAttribute(name.to_owned())),
    };

    Ok(value)
}

fn parse_number(raw: String) -> Result<Number, ItemError> {
    if let Ok(n) = raw.parse::<i64>() {
        return Ok(n.into());
    }
    if let Ok(n) = raw.parse::<u64>() {
        return Ok(n.into());
    }

    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .ok_or(ItemError::MalformedNumber(raw))
}
