use serde::Serialize;

use crate::client::ClientError;

/// A path, query, or header parameter value.
///
/// Any `Serialize` value is accepted; the conversion to its string form is
/// deferred to request building so a serialization failure surfaces as a
/// failed result instead of a panic.
///
/// Scalars are rendered without quotes, arrays are joined with `,` in paths and
/// headers and repeated in query strings. Objects are not supported.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamValue(Result<serde_json::Value, String>);

impl ParamValue {
    /// Captures a serializable value.
    pub fn new<T>(value: &T) -> Self
    where
        T: Serialize + ?Sized,
    {
        Self(serde_json::to_value(value).map_err(|err| err.to_string()))
    }

    fn value(&self) -> Result<&serde_json::Value, ClientError> {
        self.0
            .as_ref()
            .map_err(|message| ClientError::SerializationError {
                message: message.clone(),
            })
    }

    fn scalar_to_string(value: &serde_json::Value) -> Result<String, ClientError> {
        match value {
            serde_json::Value::String(text) => Ok(text.clone()),
            serde_json::Value::Number(number) => Ok(number.to_string()),
            serde_json::Value::Bool(flag) => Ok(flag.to_string()),
            serde_json::Value::Null => Ok(String::new()),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                Err(ClientError::UnsupportedParameterValue {
                    message: "nested values are not supported in parameters".to_string(),
                    value: value.clone(),
                })
            }
        }
    }

    /// Renders the value for a path segment or a header.
    pub(in crate::client) fn to_string_value(&self) -> Result<String, ClientError> {
        match self.value()? {
            serde_json::Value::Array(items) => {
                let values = items
                    .iter()
                    .map(Self::scalar_to_string)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(values.join(","))
            }
            serde_json::Value::Object(_) => Err(ClientError::UnsupportedParameterValue {
                message: "object values not supported in parameters".to_string(),
                value: self.value()?.clone(),
            }),
            value => Self::scalar_to_string(value),
        }
    }

    /// Renders the value for a query string, one entry per array item.
    pub(in crate::client) fn to_query_values(&self) -> Result<Vec<String>, ClientError> {
        match self.value()? {
            serde_json::Value::Array(items) => items.iter().map(Self::scalar_to_string).collect(),
            serde_json::Value::Object(_) => Err(ClientError::UnsupportedParameterValue {
                message: "objects are not supported for query parameters".to_string(),
                value: self.value()?.clone(),
            }),
            value => Self::scalar_to_string(value).map(|value| vec![value]),
        }
    }
}
