//! Request parameter types for building API calls.
//!
//! - [`CallPath`] - Path template with `{name}` parameters
//! - [`CallQuery`] - Query string parameters
//! - [`CallHeaders`] - HTTP headers
//! - [`CallBody`] - Request body content

mod param;
pub use self::param::ParamValue;

mod path;
pub use self::path::CallPath;
pub(in crate::client) use self::path::PathResolved;

mod query;
pub use self::query::CallQuery;

mod headers;
pub use self::headers::CallHeaders;

mod body;
pub use self::body::CallBody;
