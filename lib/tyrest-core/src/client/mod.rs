use http::{HeaderMap, Method, Uri};

use crate::{Create, Delete, Modify, Retrieve};

mod builder;
pub use self::builder::RestClientBuilder;

mod call;
pub use self::call::{ApiCall, RequestDescriptor};

mod parameters;
pub use self::parameters::{CallBody, CallHeaders, CallPath, CallQuery, ParamValue};

mod cancellation;
use self::cancellation::cancellable;

mod classifier;
pub use self::classifier::classify;

mod unpacker;
pub use self::unpacker::{unpack, unpack_entity};

mod content;
pub use self::content::ResponseContent;

mod error;
pub use self::error::ClientError;

/// Entry point of the REST pipeline.
///
/// Holds the shared, read-only configuration of every call: the pooled
/// `reqwest::Client`, the base URI, and the default headers. Cloning is cheap
/// and clones share the connection pool.
///
/// Each verb creates an [`ApiCall`] tagged with the kind of its result:
///
/// | Verb     | Call                 | Entity result      |
/// |----------|----------------------|--------------------|
/// | `get`    | `ApiCall<Retrieve>`  | `RetrieveResult`   |
/// | `post`   | `ApiCall<Create>`    | `CreateResult`     |
/// | `put`    | `ApiCall<Modify>`    | `ModifyResult`     |
/// | `patch`  | `ApiCall<Modify>`    | `ModifyResult`     |
/// | `delete` | `ApiCall<Delete>`    | `DeleteResult`     |
///
/// ```rust,no_run
/// # use serde::{Deserialize, Serialize};
/// # use tyrest_core::RestClient;
/// # #[derive(Debug, Deserialize)]
/// # struct Channel { id: u64, name: String }
/// # #[derive(Serialize)]
/// # struct CreateChannel { name: String }
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = RestClient::builder()
///     .with_base_url("https://api.example.com/v10")?
///     .build()?;
///
/// let created = client
///     .post("/guilds/{guild_id}/channels")
///     .with_path_param("guild_id", &1)
///     .json(&CreateChannel { name: "general".to_string() })
///     .entity::<Channel>()
///     .await?;
/// println!("{:?}", created.created()?);
///
/// let deleted = client.delete("/channels/{id}").with_path_param("id", &2).await;
/// assert!(deleted.is_success());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RestClient {
    client: reqwest::Client,
    base_uri: Uri,
    default_headers: HeaderMap,
}

// Create
impl RestClient {
    /// Starts a [`RestClientBuilder`] with the default configuration.
    pub fn builder() -> RestClientBuilder {
        RestClientBuilder::default()
    }

    /// The URI every call path is resolved against.
    pub fn base_uri(&self) -> &Uri {
        &self.base_uri
    }

    /// Headers sent with every call.
    pub fn default_headers(&self) -> &HeaderMap {
        &self.default_headers
    }
}

// Calls
impl RestClient {
    /// Creates a call with any method, tagged with the result kind `K`.
    pub fn call<K>(&self, method: Method, path: impl Into<CallPath>) -> ApiCall<K> {
        ApiCall::build(
            self.client.clone(),
            self.base_uri.clone(),
            self.default_headers.clone(),
            method,
            path.into(),
        )
    }

    /// Reads an entity with `GET`.
    pub fn get(&self, path: impl Into<CallPath>) -> ApiCall<Retrieve> {
        self.call(Method::GET, path)
    }

    /// Creates an entity with `POST`.
    pub fn post(&self, path: impl Into<CallPath>) -> ApiCall<Create> {
        self.call(Method::POST, path)
    }

    /// Replaces an entity with `PUT`.
    pub fn put(&self, path: impl Into<CallPath>) -> ApiCall<Modify> {
        self.call(Method::PUT, path)
    }

    /// Partially updates an entity with `PATCH`.
    pub fn patch(&self, path: impl Into<CallPath>) -> ApiCall<Modify> {
        self.call(Method::PATCH, path)
    }

    /// Removes an entity with `DELETE`.
    pub fn delete(&self, path: impl Into<CallPath>) -> ApiCall<Delete> {
        self.call(Method::DELETE, path)
    }
}
