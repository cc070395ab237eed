use std::future::Future;

use tokio_util::sync::CancellationToken;

use super::ClientError;

/// Awaits `future` unless the token is cancelled first.
///
/// Cancellation is checked before polling, so an already-cancelled token never
/// starts the work.
pub(in crate::client) async fn cancellable<F, T, E>(
    cancellation: &CancellationToken,
    future: F,
) -> Result<T, ClientError>
where
    F: Future<Output = Result<T, E>>,
    E: Into<ClientError>,
{
    tokio::select! {
        biased;
        () = cancellation.cancelled() => Err(ClientError::Cancelled),
        result = future => result.map_err(Into::into),
    }
}
