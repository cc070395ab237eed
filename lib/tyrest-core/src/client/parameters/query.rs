use indexmap::IndexMap;
use serde::Serialize;

use super::ParamValue;
use crate::client::ClientError;

/// Query string parameters of a call, kept in insertion order.
///
/// ```rust
/// use tyrest_core::CallQuery;
///
/// let query = CallQuery::new()
///     .add_param("limit", &50)
///     .add_param("before", "1073");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallQuery {
    params: IndexMap<String, ParamValue>,
}

impl CallQuery {
    /// Creates an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, replacing any previous value with the same name.
    ///
    /// Arrays are repeated: `ids=[1, 2]` is sent as `ids=1&ids=2`.
    pub fn add_param<T>(mut self, name: impl Into<String>, value: &T) -> Self
    where
        T: Serialize + ?Sized,
    {
        self.params.insert(name.into(), ParamValue::new(value));
        self
    }

    /// Merges another query into this one, the other query taking precedence.
    pub fn merge(mut self, other: Self) -> Self {
        self.params.extend(other.params);
        self
    }

    /// Checks if no parameter was added.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Returns the number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Encodes the parameters as an `application/x-www-form-urlencoded` query string.
    pub(in crate::client) fn to_query_string(&self) -> Result<String, ClientError> {
        let mut pairs = Vec::with_capacity(self.params.len());
        for (name, value) in &self.params {
            for value in value.to_query_values()? {
                pairs.push((name.as_str(), value));
            }
        }

        let query = serde_urlencoded::to_string(pairs)?;
        Ok(query)
    }
}
