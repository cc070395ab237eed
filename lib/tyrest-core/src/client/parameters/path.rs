use std::collections::HashSet;
use std::sync::LazyLock;

use indexmap::IndexMap;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::Regex;
use serde::Serialize;
use tracing::warn;

use super::ParamValue;
use crate::client::ClientError;

/// Regular expression for matching path parameters in the format `{param_name}`.
static RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(?<name>\w+)}").expect("a valid regex"));

/// Characters escaped in a path segment: everything but the RFC 3986 unreserved set.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

fn replace_path_param(path: &str, param_name: &str, value: &str) -> String {
    let pattern = ["{", param_name, "}"].concat();
    path.replace(&pattern, value)
}

fn encode_path_param_value(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

/// An HTTP path template with named parameters.
///
/// Placeholders use the `{name}` syntax; the same name may appear several times.
/// Values are percent-encoded when the path is resolved.
///
/// ```rust
/// use tyrest_core::CallPath;
///
/// let path = CallPath::from("/channels/{channel_id}/messages/{message_id}")
///     .add_param("channel_id", &41_771_983_423_143_937_u64)
///     .add_param("message_id", "1073");
/// ```
#[derive(Debug, Clone, Default, PartialEq, derive_more::Display)]
#[display("{path}")]
pub struct CallPath {
    pub(in crate::client) path: String,
    args: IndexMap<String, ParamValue>,
}

impl CallPath {
    /// Adds a path parameter, replacing any previous value with the same name.
    pub fn add_param<T>(mut self, name: impl Into<String>, value: &T) -> Self
    where
        T: Serialize + ?Sized,
    {
        self.args.insert(name.into(), ParamValue::new(value));
        self
    }

    /// The path template, before resolution.
    pub fn template(&self) -> &str {
        &self.path
    }
}

impl From<&str> for CallPath {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<String> for CallPath {
    fn from(path: String) -> Self {
        Self {
            path,
            args: IndexMap::default(),
        }
    }
}

impl From<&String> for CallPath {
    fn from(value: &String) -> Self {
        Self::from(value.clone())
    }
}

#[derive(Debug)]
pub(in crate::client) struct PathResolved {
    pub(in crate::client) path: String,
}

impl TryFrom<CallPath> for PathResolved {
    type Error = ClientError;

    fn try_from(value: CallPath) -> Result<Self, Self::Error> {
        let CallPath { mut path, args } = value;

        let mut names: HashSet<String> = RE
            .captures_iter(&path)
            .filter_map(|caps| caps.name("name"))
            .map(|found| found.as_str().to_string())
            .collect();

        if names.is_empty() {
            if !args.is_empty() {
                warn!(?path, ?args, "path has no placeholder, arguments ignored");
            }
            return Ok(Self { path });
        }

        for (name, value) in args {
            if !names.remove(&name) {
                warn!(?name, "argument name not found");
                continue;
            }

            let encoded_value = encode_path_param_value(&value.to_string_value()?);
            path = replace_path_param(&path, &name, &encoded_value);

            if names.is_empty() {
                return Ok(Self { path });
            }
        }

        let mut missings: Vec<_> = names.into_iter().collect();
        missings.sort();
        Err(ClientError::PathUnresolved { path, missings })
    }
}
