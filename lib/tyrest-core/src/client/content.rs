use bytes::Bytes;
use futures::StreamExt;
use futures::stream::BoxStream;
use headers::{ContentType, HeaderMapExt};
use http::{HeaderMap, StatusCode};
use tokio_util::sync::CancellationToken;

use super::{ClientError, cancellable};

/// The raw body of a successful GET, for binary or streamed payloads.
///
/// Returned by [`ApiCall::content`](crate::ApiCall::content). The body is not
/// read yet: consume it with [`bytes`](Self::bytes), [`text`](Self::text) or
/// [`into_stream`](Self::into_stream). Every read honours the cancellation
/// token of the call.
///
/// ```rust,no_run
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// use futures::StreamExt;
/// use tyrest_core::RestClient;
///
/// let client = RestClient::builder().with_host("cdn.example.com").build()?;
/// let content = client
///     .get("/attachments/{id}/{name}")
///     .with_path_param("id", &1_073)
///     .with_path_param("name", "avatar.png")
///     .content()
///     .await
///     .into_result()?;
///
/// let mut stream = content.into_stream();
/// while let Some(chunk) = stream.next().await {
///     let chunk = chunk?;
///     println!("{} bytes", chunk.len());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(derive_more::Debug)]
pub struct ResponseContent {
    response: reqwest::Response,
    #[debug(skip)]
    cancellation: CancellationToken,
}

impl ResponseContent {
    pub(in crate::client) fn new(response: reqwest::Response, cancellation: CancellationToken) -> Self {
        Self {
            response,
            cancellation,
        }
    }

    /// The success status of the response.
    pub fn status(&self) -> StatusCode {
        self.response.status()
    }

    /// The response headers.
    pub fn headers(&self) -> &HeaderMap {
        self.response.headers()
    }

    /// The `Content-Type` of the body, if present and valid.
    pub fn content_type(&self) -> Option<ContentType> {
        self.response.headers().typed_get::<ContentType>()
    }

    /// The exact body length, when known before reading.
    pub fn content_length(&self) -> Option<u64> {
        self.response.content_length()
    }

    /// Reads the whole body.
    ///
    /// # Errors
    ///
    /// Fails if the body cannot be read or the call is cancelled.
    pub async fn bytes(self) -> Result<Bytes, ClientError> {
        let Self {
            response,
            cancellation,
        } = self;
        cancellable(&cancellation, response.bytes()).await
    }

    /// Reads the whole body as text, decoded with the charset of the `Content-Type`.
    ///
    /// # Errors
    ///
    /// Fails if the body cannot be read or the call is cancelled.
    pub async fn text(self) -> Result<String, ClientError> {
        let Self {
            response,
            cancellation,
        } = self;
        cancellable(&cancellation, response.text()).await
    }

    /// Streams the body chunk by chunk.
    ///
    /// The stream ends after the first error; cancellation yields
    /// [`ClientError::Cancelled`].
    pub fn into_stream(self) -> BoxStream<'static, Result<Bytes, ClientError>> {
        let state = Some((self.response, self.cancellation));
        futures::stream::unfold(state, |state| async move {
            let (mut response, cancellation) = state?;
            match cancellable(&cancellation, response.chunk()).await {
                Ok(Some(chunk)) => Some((Ok(chunk), Some((response, cancellation)))),
                Ok(None) => None,
                Err(error) => Some((Err(error), None)),
            }
        })
        .boxed()
    }
}
