use std::future::{Future, IntoFuture};
use std::pin::Pin;

use http::Uri;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::ApiCall;
use crate::client::cancellable;
use crate::client::classifier::classify_response;
use crate::client::parameters::PathResolved;
use crate::client::unpacker::{Unpacked, read_entity, unpack};
use crate::client::{CallPath, CallQuery, ClientError, ResponseContent};
use crate::{ApiResult, InvalidStateError, OperationResult, ResultKind, Retrieve, RetrieveResult};

impl<K> ApiCall<K> {
    /// Builds the request, then sends it under the cancellation token of the call.
    async fn exchange(self) -> Result<reqwest::Response, ClientError> {
        let client = self.client.clone();
        let cancellation = self.cancellation.clone();

        let request = self.build_request()?.into_request();

        debug!(?request, "sending...");
        let response = cancellable(&cancellation, client.execute(request)).await?;
        debug!(?response, "...receiving");

        Ok(response)
    }

    async fn read<T>(self) -> Unpacked<T>
    where
        T: DeserializeOwned,
    {
        let cancellation = self.cancellation.clone();
        match self.exchange().await {
            Ok(response) => read_entity(response, &cancellation).await,
            Err(error) => Unpacked::Failed(error.into()),
        }
    }

    pub(super) fn build_url(
        base_uri: &Uri,
        path: CallPath,
        query: &CallQuery,
    ) -> Result<Url, ClientError> {
        let path_resolved = PathResolved::try_from(path)?;
        let base_uri = base_uri.to_string();
        let url = format!(
            "{}/{}",
            base_uri.trim_end_matches('/'),
            path_resolved.path.trim_start_matches('/')
        );
        let mut url = url.parse::<Url>()?;

        if !query.is_empty() {
            let query_string = query.to_query_string()?;
            url.set_query(Some(&query_string));
        }

        Ok(url)
    }

    /// Sends the call and ignores the response body.
    ///
    /// Equivalent to awaiting the call directly. A success status is a success,
    /// any other status is classified into an [`ApiError`](crate::ApiError).
    pub async fn send(self) -> OperationResult {
        let cancellation = self.cancellation.clone();
        match self.exchange().await {
            Ok(response) => unpack(response, &cancellation).await,
            Err(error) => OperationResult::from_error(error),
        }
    }

    /// Sends the call and decodes the response body into `T`.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use serde::Deserialize;
    /// # use tyrest_core::RestClient;
    /// # #[derive(Debug, Deserialize)]
    /// # struct Channel { id: u64, name: String }
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = RestClient::builder().with_host("api.example.com").build()?;
    ///
    /// let result = client
    ///     .get("/channels/{id}")
    ///     .with_path_param("id", &41_771_983_423_143_937_u64)
    ///     .entity::<Channel>()
    ///     .await?;
    ///
    /// if result.is_success() {
    ///     println!("{:?}", result.entity()?);
    /// } else if let Some(error) = result.error() {
    ///     eprintln!("{error}");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`InvalidStateError::UnexpectedNullBody`] if the service answers
    /// with a success status and an empty or `null` body. Every other failure is
    /// held by the returned result.
    pub async fn entity<T>(self) -> Result<ApiResult<T, K>, InvalidStateError>
    where
        T: DeserializeOwned,
    {
        let result = self.read::<T>().await.into_required()?;
        Ok(result.retag())
    }

    /// Sends the call and decodes the response body into `T`, an empty or `null`
    /// body giving a success without value.
    pub async fn optional_entity<T>(self) -> ApiResult<Option<T>, K>
    where
        T: DeserializeOwned,
    {
        self.read::<T>().await.into_optional().retag()
    }

    /// Sends the call and decodes the response body into `T`, with the
    /// null-body policy chosen at runtime.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidStateError::UnexpectedNullBody`] if the body is empty or
    /// `null` and `allow_null_return` is `false`.
    pub async fn entity_with<T>(
        self,
        allow_null_return: bool,
    ) -> Result<ApiResult<Option<T>, K>, InvalidStateError>
    where
        T: DeserializeOwned,
    {
        let result = self.read::<T>().await.into_nullable(allow_null_return)?;
        Ok(result.retag())
    }
}

impl ApiCall<Retrieve> {
    /// Sends the call and hands the raw response body over on success.
    ///
    /// Used for binary payloads; see [`ResponseContent`]. A failure status is
    /// classified as for any other call.
    pub async fn content(self) -> RetrieveResult<ResponseContent> {
        let cancellation = self.cancellation.clone();
        let response = match self.exchange().await {
            Ok(response) => response,
            Err(error) => return RetrieveResult::from_error(error),
        };

        if response.status().is_success() {
            RetrieveResult::from_success(ResponseContent::new(response, cancellation))
        } else {
            RetrieveResult::from_error(classify_response(response, &cancellation).await)
        }
    }
}

/// Implement `IntoFuture` for `ApiCall` to enable direct `.await` syntax
///
/// Awaiting a call is the same as [`ApiCall::send`]:
/// ```rust,no_run
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// # let client = tyrest_core::RestClient::builder().build()?;
/// let result = client.delete("/channels/{id}").with_path_param("id", &1).await;
/// assert!(result.is_success());
/// # Ok(())
/// # }
/// ```
impl<K> IntoFuture for ApiCall<K>
where
    K: ResultKind,
{
    type Output = OperationResult;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.send())
    }
}
