use crate::{Error, Result};
use postsync_core::Record;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A Firestore typed value in its REST JSON form, e.g. `{"integerValue": "1"}`.
///
/// Only the scalar kinds a record can hold are modelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldValue {
    NullValue(()),
    BooleanValue(bool),
    /// int64 values travel as decimal strings.
    IntegerValue(String),
    DoubleValue(f64),
    StringValue(String),
}

/// A Firestore document as sent to and returned by the REST API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
}

impl Document {
    fn string_field(&self, key: &str) -> Result<String> {
        match self.fields.get(key) {
            Some(FieldValue::StringValue(value)) => Ok(value.clone()),
            Some(FieldValue::NullValue(())) | None => Ok(String::new()),
            Some(other) => Err(Error::InvalidDocument(format!(
                "field `{}` is not a string: {:?}",
                key, other
            ))),
        }
    }
}

impl From<&Record> for Document {
    fn from(record: &Record) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(
            "id".to_string(),
            FieldValue::IntegerValue(record.id.to_string()),
        );
        fields.insert(
            "title".to_string(),
            FieldValue::StringValue(record.title.clone()),
        );
        fields.insert(
            "body".to_string(),
            FieldValue::StringValue(record.body.clone()),
        );

        Self {
            fields,
            ..Self::default()
        }
    }
}

impl TryFrom<Document> for Record {
    type Error = Error;

    fn try_from(document: Document) -> Result<Self> {
        let id = match document.fields.get("id") {
            Some(FieldValue::IntegerValue(raw)) => raw.parse::<i64>().map_err(|e| {
                Error::InvalidDocument(format!("field `id` is not an int64 ({}): {}", raw, e))
            })?,
            Some(other) => {
                return Err(Error::InvalidDocument(format!(
                    "field `id` is not an integer: {:?}",
                    other
                )))
            }
            None => return Err(Error::InvalidDocument("missing field `id`".to_string())),
        };

        Ok(Record {
            id,
            title: document.string_field("title")?,
            body: document.string_field("body")?,
        })
    }
}
