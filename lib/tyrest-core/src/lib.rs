//! # Tyrest Core
//!
//! A typed, fault-tolerant REST request/response pipeline for JSON-over-HTTP APIs.
//!
//! Every call ends in an [`ApiResult`]: a success holding the decoded entity, or
//! a failure holding one [`ApiError`]. Three independent failure sources are
//! normalized into that single error:
//!
//! - **[`ApiError::Exception`]** - the transport, the codec, or the request builder failed
//! - **[`ApiError::Http`]** - a non-success status without a structured error body
//! - **[`ApiError::Service`]** - a non-success status with the service's [`ServiceErrorPayload`]
//!
//! Caller-contract violations are kept apart as [`InvalidStateError`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tyrest_core::RestClient;
//! # use serde::Deserialize;
//! # #[derive(Debug, Deserialize)]
//! # struct Channel { id: u64, name: String }
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = RestClient::builder()
//!     .with_base_url("https://api.example.com/v10")?
//!     .with_default_header("Authorization", "Bot my-token")
//!     .build()?;
//!
//! let result = client
//!     .get("/channels/{id}")
//!     .with_path_param("id", &41_771_983_423_143_937_u64)
//!     .entity::<Channel>()
//!     .await?; // ← only an unexpected empty body is returned as `Err`
//!
//! match result.error() {
//!     None => println!("found {:?}", result.entity()?),
//!     Some(error) if error.is_service() => eprintln!("rejected: {error}"),
//!     Some(error) => eprintln!("failed: {error}"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Null-body policy
//!
//! Services often answer a success with an empty body or a JSON `null`. Both are
//! handled alike, and the caller decides whether that is acceptable:
//!
//! - [`ApiCall::entity`] - a value is required, an empty body is an [`InvalidStateError`]
//! - [`ApiCall::optional_entity`] - an empty body is a success holding `None`
//! - [`ApiCall::entity_with`] - the policy is chosen at runtime
//!
//! ## Cancellation
//!
//! Each call races its [`CancellationToken`] while sending and while reading
//! the body; a cancelled call completes with a failed result.
//!
//! ```rust,no_run
//! # use tyrest_core::{CancellationToken, RestClient};
//! # async fn example(client: RestClient) {
//! let token = CancellationToken::new();
//! let call = client.get("/gateway").with_cancellation(token.clone());
//! token.cancel();
//!
//! let result = call.await;
//! assert!(result.error().is_some_and(|error| error.is_cancelled()));
//! # }
//! ```

mod client;
mod result;

pub use tokio_util::sync::CancellationToken;

pub use self::client::{
    ApiCall, CallBody, CallHeaders, CallPath, CallQuery, ClientError, ParamValue,
    RequestDescriptor, ResponseContent, RestClient, RestClientBuilder, classify, unpack,
    unpack_entity,
};
pub use self::result::{
    ApiError, ApiResult, Create, CreateResult, Delete, DeleteResult, InvalidStateError, Modify,
    ModifyResult, Operation, OperationResult, ResultKind, Retrieve, RetrieveResult,
    ServiceErrorPayload, UNKNOWN_ERROR,
};
