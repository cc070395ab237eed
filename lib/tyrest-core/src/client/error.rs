/// Failures raised while building, sending, or decoding a call.
///
/// A `ClientError` never escapes a verb operation: it is captured and wrapped
/// into [`ApiError::Exception`](crate::ApiError::Exception). It is also the
/// error of the configuration API ([`RestClientBuilder::build`](super::RestClientBuilder::build)).
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum ClientError {
    /// HTTP client error from the underlying reqwest library.
    ///
    /// Occurs when network requests fail, timeouts occur, or connection issues arise.
    ReqwestError(reqwest::Error),

    /// URL parsing error when constructing request URLs.
    UrlError(url::ParseError),

    /// HTTP header processing error.
    HeadersError(headers::Error),

    /// HTTP protocol error from the http crate.
    HttpError(http::Error),

    /// Invalid HTTP header name.
    InvalidHeaderName(http::header::InvalidHeaderName),

    /// Invalid HTTP header value.
    InvalidHeaderValue(http::header::InvalidHeaderValue),

    /// JSON serialization error, typically while encoding a request body.
    JsonValueError(serde_json::Error),

    /// Query parameter serialization error.
    QuerySerializationError(serde_urlencoded::ser::Error),

    /// The call was cancelled through its cancellation token.
    #[display("Call cancelled")]
    Cancelled,

    /// Invalid base path configuration.
    #[display("Invalid base path: {error}")]
    InvalidBasePath {
        /// Description of why the base path is invalid.
        error: String,
    },

    /// Response body deserialization failure.
    #[display("Failed to deserialize JSON at '{path}': {error}\n{body}")]
    #[from(skip)]
    JsonError {
        /// The JSON path where the error occurred.
        path: String,
        /// The underlying JSON parsing error.
        error: serde_json::Error,
        /// The response body that failed to parse.
        body: String,
    },

    /// Path template contains unresolved parameters.
    #[display("Path '{path}' is missing required arguments: {missings:?}")]
    #[from(skip)]
    PathUnresolved {
        /// The path template that couldn't be resolved.
        path: String,
        /// List of missing parameter names.
        missings: Vec<String>,
    },

    /// Parameter value cannot be converted to a path, query, or header value.
    #[display("Unsupported parameter value: {message}. Got: {value}")]
    #[from(skip)]
    UnsupportedParameterValue {
        /// Specific error message describing the conversion failure.
        message: String,
        /// The value that failed to convert.
        value: serde_json::Value,
    },

    /// Data serialization failed.
    #[display("Serialization error: {message}")]
    #[from(skip)]
    SerializationError {
        /// Description of the serialization failure.
        message: String,
    },
}

impl ClientError {
    /// Returns `true` if the failure comes from the transport timing out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::ReqwestError(err) if err.is_timeout())
    }

    /// Returns `true` if the failure comes from the transport failing to connect.
    pub fn is_connect(&self) -> bool {
        matches!(self, Self::ReqwestError(err) if err.is_connect())
    }
}
