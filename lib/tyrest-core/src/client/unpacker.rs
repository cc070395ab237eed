use http::StatusCode;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use super::classifier::classify_response;
use super::{ClientError, cancellable};
use crate::{ApiError, InvalidStateError, OperationResult, RetrieveResult};

/// A decoded response body, before the null-body policy is applied.
///
/// Absent and `null` bodies both end up as [`Unpacked::Null`]; a body that fails
/// to decode is a failure, never a null.
#[derive(Debug)]
pub(in crate::client) enum Unpacked<T> {
    Value(T),
    Null { status: StatusCode },
    Failed(ApiError),
}

impl<T> Unpacked<T> {
    /// A null body is a caller defect.
    pub(in crate::client) fn into_required(self) -> Result<RetrieveResult<T>, InvalidStateError> {
        match self {
            Self::Value(value) => Ok(RetrieveResult::from_success(value)),
            Self::Null { status } => Err(InvalidStateError::UnexpectedNullBody { status }),
            Self::Failed(error) => Ok(RetrieveResult::from_error(error)),
        }
    }

    /// A null body is a success without value.
    pub(in crate::client) fn into_optional(self) -> RetrieveResult<Option<T>> {
        match self {
            Self::Value(value) => RetrieveResult::from_success(Some(value)),
            Self::Null { .. } => RetrieveResult::from_success(None),
            Self::Failed(error) => RetrieveResult::from_error(error),
        }
    }

    pub(in crate::client) fn into_nullable(
        self,
        allow_null_return: bool,
    ) -> Result<RetrieveResult<Option<T>>, InvalidStateError> {
        if allow_null_return {
            Ok(self.into_optional())
        } else {
            self.into_required().map(|result| result.map(Some))
        }
    }
}

/// Unpacks a response without payload.
///
/// The body of a success response is ignored; a failure response is classified.
pub async fn unpack(response: reqwest::Response, cancellation: &CancellationToken) -> OperationResult {
    if response.status().is_success() {
        OperationResult::ok()
    } else {
        OperationResult::from_error(classify_response(response, cancellation).await)
    }
}

/// Unpacks a response into an entity of type `T`.
///
/// On a success status, an empty body and a JSON `null` are treated alike:
/// with `allow_null_return` the result is a success holding `None`, otherwise
/// the call fails with [`InvalidStateError::UnexpectedNullBody`]. A body that
/// does not decode into `T` is an [`ApiError::Exception`] failure.
///
/// A failure status is classified (see [`classify`](crate::classify)).
///
/// # Errors
///
/// Returns [`InvalidStateError::UnexpectedNullBody`] for an empty or `null`
/// success body when `allow_null_return` is `false`.
pub async fn unpack_entity<T>(
    response: reqwest::Response,
    allow_null_return: bool,
    cancellation: &CancellationToken,
) -> Result<RetrieveResult<Option<T>>, InvalidStateError>
where
    T: DeserializeOwned,
{
    read_entity(response, cancellation)
        .await
        .into_nullable(allow_null_return)
}

pub(in crate::client) async fn read_entity<T>(
    response: reqwest::Response,
    cancellation: &CancellationToken,
) -> Unpacked<T>
where
    T: DeserializeOwned,
{
    let status = response.status();
    if !status.is_success() {
        return Unpacked::Failed(classify_response(response, cancellation).await);
    }

    if response.content_length() == Some(0) {
        return Unpacked::Null { status };
    }

    let body = match cancellable(cancellation, response.bytes()).await {
        Ok(body) => body,
        Err(error) => return Unpacked::Failed(ApiError::from(error)),
    };
    if body.is_empty() {
        return Unpacked::Null { status };
    }

    match decode::<T>(&body) {
        Ok(Some(value)) => Unpacked::Value(value),
        Ok(None) => Unpacked::Null { status },
        Err(error) => {
            warn!(%status, %error, "fail to decode the response body");
            Unpacked::Failed(ApiError::from(error))
        }
    }
}

fn decode<T>(body: &[u8]) -> Result<Option<T>, ClientError>
where
    T: DeserializeOwned,
{
    let deserializer = &mut serde_json::Deserializer::from_slice(body);
    let result: Option<T> = serde_path_to_error::deserialize(&mut *deserializer).map_err(|err| {
        ClientError::JsonError {
            path: err.path().to_string(),
            error: err.into_inner(),
            body: String::from_utf8_lossy(body).into_owned(),
        }
    })?;
    deserializer.end()?;

    Ok(result)
}
