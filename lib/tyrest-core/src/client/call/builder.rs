use bytes::Bytes;
use headers::ContentType;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use super::ApiCall;
use crate::client::{CallBody, CallHeaders, CallQuery, ClientError};

impl<K> ApiCall<K> {
    // =============================================================================
    // Request Configuration Methods
    // =============================================================================

    /// Sets the value of a `{name}` placeholder of the path template.
    ///
    /// ```rust
    /// # use tyrest_core::RestClient;
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = RestClient::builder().build()?;
    /// let call = client
    ///     .get("/channels/{channel_id}/messages/{message_id}")
    ///     .with_path_param("channel_id", &41_771_983_423_143_937_u64)
    ///     .with_path_param("message_id", "1073");
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_path_param<T>(mut self, name: impl Into<String>, value: &T) -> Self
    where
        T: Serialize + ?Sized,
    {
        self.path = self.path.add_param(name, value);
        self
    }

    /// Adds query parameters, merging with any existing ones.
    pub fn with_query(mut self, query: CallQuery) -> Self {
        self.query = std::mem::take(&mut self.query).merge(query);
        self
    }

    /// Convenience method to add a single query parameter.
    pub fn with_query_param<T>(self, name: impl Into<String>, value: &T) -> Self
    where
        T: Serialize + ?Sized,
    {
        self.with_query(CallQuery::new().add_param(name, value))
    }

    /// Adds headers to the API call, merging with any existing headers.
    ///
    /// Call headers take precedence over the default headers of the client.
    pub fn with_headers(mut self, headers: CallHeaders) -> Self {
        self.headers = Some(match self.headers.take() {
            Some(existing) => existing.merge(headers),
            None => headers,
        });
        self
    }

    /// Convenience method to add a single header.
    ///
    /// If a header with the same name already exists, the new value will override it.
    ///
    /// ```rust
    /// # use tyrest_core::RestClient;
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = RestClient::builder().build()?;
    /// let call = client
    ///     .delete("/channels/{id}")
    ///     .with_path_param("id", &81_384_788_765_712_384_u64)
    ///     .with_header("X-Audit-Log-Reason", "cleanup")
    ///     .with_header("X-Retry-Count", &3);
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_header<T>(self, name: impl Into<String>, value: &T) -> Self
    where
        T: Serialize + ?Sized,
    {
        self.with_headers(CallHeaders::new().add_header(name, value))
    }

    // =============================================================================
    // Request Body Methods
    // =============================================================================

    /// Sets the request body.
    pub fn with_body(mut self, body: CallBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets the request body to JSON.
    ///
    /// A serialization failure does not stop the chain: it is reported as the
    /// error of the call result.
    ///
    /// ```rust
    /// # use tyrest_core::RestClient;
    /// # use serde::Serialize;
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// #[derive(Serialize)]
    /// struct CreateChannel {
    ///     name: String,
    /// }
    ///
    /// let client = RestClient::builder().build()?;
    /// let call = client
    ///     .post("/guilds/{guild_id}/channels")
    ///     .with_path_param("guild_id", &1)
    ///     .json(&CreateChannel { name: "general".to_string() });
    /// # Ok(())
    /// # }
    /// ```
    pub fn json<T>(self, data: &T) -> Self
    where
        T: Serialize + ?Sized,
    {
        let body = CallBody::json(data);
        self.with_body_result(body)
    }

    /// Sets the request body to `application/x-www-form-urlencoded` data.
    ///
    /// Like [`json`](Self::json), a serialization failure is reported as the error of the call result.
    pub fn form<T>(self, data: &T) -> Self
    where
        T: Serialize + ?Sized,
    {
        let body = CallBody::form(data);
        self.with_body_result(body)
    }

    /// Sets the request body to plain text.
    pub fn text(self, text: impl Into<String>) -> Self {
        self.with_body(CallBody::text(text))
    }

    /// Sets the request body to raw bytes with a custom content type.
    pub fn raw(self, data: impl Into<Bytes>, content_type: ContentType) -> Self {
        self.with_body(CallBody::raw(data, content_type))
    }

    fn with_body_result(mut self, body: Result<CallBody, ClientError>) -> Self {
        match body {
            Ok(body) => self.body = Some(body),
            Err(error) => {
                self.build_error.get_or_insert(error);
            }
        }
        self
    }

    // =============================================================================
    // Execution Configuration Methods
    // =============================================================================

    /// Sets the cancellation token of the call.
    ///
    /// Cancelling the token while the request is sent or while the body is read
    /// fails the call with a cancellation error.
    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.cancellation = cancellation;
        self
    }

    /// Applies a caller-supplied configuration step.
    ///
    /// Lets shared configuration be written once and applied to many calls.
    ///
    /// ```rust
    /// # use tyrest_core::{ApiCall, RestClient};
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// fn audited<K>(call: ApiCall<K>) -> ApiCall<K> {
    ///     call.with_header("X-Audit-Log-Reason", "moderation")
    /// }
    ///
    /// let client = RestClient::builder().build()?;
    /// let call = client.delete("/channels/{id}").with_path_param("id", &1).configure(audited);
    /// # Ok(())
    /// # }
    /// ```
    pub fn configure(self, step: impl FnOnce(Self) -> Self) -> Self {
        step(self)
    }
}
