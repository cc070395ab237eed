use std::marker::PhantomData;

use bytes::Bytes;
use headers::HeaderMapExt;
use http::header::CONTENT_TYPE;
use http::{HeaderMap, Method, Uri};
use reqwest::{Body, Request};
use tokio_util::sync::CancellationToken;
use url::Url;

use super::{CallBody, CallHeaders, CallPath, CallQuery, ClientError};
use crate::Retrieve;

mod builder;
mod execution;

/// A single REST call, being configured.
///
/// Created by the verb methods of [`RestClient`](crate::RestClient); the kind
/// parameter `K` tags the result of the call (see [`ResultKind`](crate::ResultKind)).
///
/// # Method Groups
///
/// ## Request Configuration
/// - [`with_path_param(name, value)`](Self::with_path_param) - Resolve a `{name}` placeholder
/// - [`with_query(query)`](Self::with_query) / [`with_query_param(name, value)`](Self::with_query_param) - Query parameters
/// - [`with_headers(headers)`](Self::with_headers) / [`with_header(name, value)`](Self::with_header) - Headers
/// - [`json(data)`](Self::json), [`form(data)`](Self::form), [`text(content)`](Self::text), [`raw(bytes, content_type)`](Self::raw) - Request body
/// - [`with_cancellation(token)`](Self::with_cancellation) - Cooperative cancellation
/// - [`configure(step)`](Self::configure) - Caller supplied configuration step
///
/// ## Execution
/// - `.await` or [`send()`](Self::send) - Bodyless call, [`OperationResult`](crate::OperationResult)
/// - [`entity::<T>()`](Self::entity) - Required entity
/// - [`optional_entity::<T>()`](Self::optional_entity) - Entity, empty or `null` body allowed
/// - [`entity_with::<T>(allow_null_return)`](Self::entity_with) - Null-body policy chosen at runtime
/// - [`content()`](ApiCall::content) - Raw body of a GET
///
/// Every execution consumes the call: a call is built and sent once.
/// Failures while configuring (body serialization, for instance) are kept and
/// reported as the [`ApiError::Exception`](crate::ApiError::Exception) of the result.
#[derive(derive_more::Debug)]
pub struct ApiCall<K = Retrieve> {
    pub(super) client: reqwest::Client,
    pub(super) base_uri: Uri,
    pub(super) default_headers: HeaderMap,

    pub(super) method: Method,
    pub(super) path: CallPath,
    pub(super) query: CallQuery,
    pub(super) headers: Option<CallHeaders>,

    #[debug(ignore)]
    pub(super) body: Option<CallBody>,

    /// First failure raised while configuring the call.
    pub(super) build_error: Option<ClientError>,

    #[debug(skip)]
    pub(super) cancellation: CancellationToken,
    #[debug(skip)]
    kind: PhantomData<K>,
}

impl<K> ApiCall<K> {
    pub(in crate::client) fn build(
        client: reqwest::Client,
        base_uri: Uri,
        default_headers: HeaderMap,
        method: Method,
        path: CallPath,
    ) -> Self {
        Self {
            client,
            base_uri,
            default_headers,
            method,
            path,
            query: CallQuery::default(),
            headers: None,
            body: None,
            build_error: None,
            cancellation: CancellationToken::new(),
            kind: PhantomData,
        }
    }

    /// The HTTP method of the call.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The path template of the call, before resolution.
    pub fn path(&self) -> &CallPath {
        &self.path
    }

    /// Builds the request descriptor of the call.
    ///
    /// Resolves the path template against the base URI, appends the query
    /// string, merges the client default headers with the call headers, and
    /// sets the `Content-Type` of the body unless a header already provides one.
    /// The call is consumed.
    ///
    /// # Errors
    ///
    /// Fails on a configuration error kept by the call, an unresolved path
    /// parameter, an invalid URL, or an invalid header.
    pub fn build_request(self) -> Result<RequestDescriptor, ClientError> {
        let Self {
            base_uri,
            default_headers,
            method,
            path,
            query,
            headers,
            body,
            build_error,
            ..
        } = self;

        if let Some(error) = build_error {
            return Err(error);
        }

        let url = Self::build_url(&base_uri, path, &query)?;
        let mut request_headers = default_headers;
        if let Some(headers) = &headers {
            headers.apply_to(&mut request_headers)?;
        }
        let body = if let Some(body) = body {
            // an explicit `Content-Type` header wins over the body default
            if !request_headers.contains_key(CONTENT_TYPE) {
                request_headers.typed_insert(body.content_type);
            }
            Some(body.data)
        } else {
            None
        };

        Ok(RequestDescriptor {
            method,
            url,
            headers: request_headers,
            body,
        })
    }
}

/// A fully resolved request, ready to be sent.
///
/// Frozen: a descriptor is only readable and is consumed by the send.
#[derive(Clone, derive_more::Debug)]
pub struct RequestDescriptor {
    method: Method,
    url: Url,
    headers: HeaderMap,
    #[debug(ignore)]
    body: Option<Bytes>,
}

impl RequestDescriptor {
    /// The HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The resolved URL, with the query string.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Default and call headers, with the body `Content-Type`.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The encoded body, if any.
    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Converts the descriptor into a transport request.
    pub fn into_request(self) -> Request {
        let Self {
            method,
            url,
            headers,
            body,
        } = self;

        let mut request = Request::new(method, url);
        *request.headers_mut() = headers;
        if let Some(body) = body {
            *request.body_mut() = Some(Body::from(body));
        }
        request
    }
}
