use http::HeaderMap;
use http::header::{AUTHORIZATION, COOKIE, HeaderName, HeaderValue, PROXY_AUTHORIZATION};
use indexmap::IndexMap;
use serde::Serialize;

use super::ParamValue;
use crate::client::ClientError;

/// Represents HTTP headers for an API call.
///
/// Values use the same [`ParamValue`] conversion as path and query parameters,
/// so numbers and booleans can be passed directly. Names and values are
/// validated when the request is built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallHeaders {
    headers: IndexMap<String, ParamValue>,
}

impl CallHeaders {
    /// Creates a new empty `CallHeaders` instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a header, replacing any previous value with the same name.
    ///
    /// ```rust
    /// use tyrest_core::CallHeaders;
    ///
    /// let headers = CallHeaders::new()
    ///     .add_header("X-Audit-Log-Reason", "spam cleanup")
    ///     .add_header("X-RateLimit-Precision", "millisecond");
    /// ```
    pub fn add_header<T>(mut self, name: impl Into<String>, value: &T) -> Self
    where
        T: Serialize + ?Sized,
    {
        self.headers.insert(name.into(), ParamValue::new(value));
        self
    }

    /// Merges another `CallHeaders` instance into this one.
    ///
    /// Headers from the other instance override headers with the same name in this instance.
    pub fn merge(mut self, other: Self) -> Self {
        self.headers.extend(other.headers);
        self
    }

    /// Checks if the headers collection is empty.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Returns the number of headers.
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// Converts headers to name/value string pairs.
    pub(in crate::client) fn to_http_headers(&self) -> Result<Vec<(String, String)>, ClientError> {
        let mut result = Vec::with_capacity(self.headers.len());

        for (name, value) in &self.headers {
            result.push((name.clone(), value.to_string_value()?));
        }

        Ok(result)
    }

    /// Writes the headers into a header map, overriding existing entries.
    ///
    /// Credential values are marked sensitive, so they are masked in `Debug` output.
    pub(in crate::client) fn apply_to(&self, target: &mut HeaderMap) -> Result<(), ClientError> {
        for (name, value) in self.to_http_headers()? {
            let name = HeaderName::from_bytes(name.as_bytes())?;
            let mut value = HeaderValue::from_str(&value)?;
            if is_credential(&name) {
                value.set_sensitive(true);
            }
            target.insert(name, value);
        }
        Ok(())
    }
}

fn is_credential(name: &HeaderName) -> bool {
    [AUTHORIZATION, PROXY_AUTHORIZATION, COOKIE].contains(name)
}
