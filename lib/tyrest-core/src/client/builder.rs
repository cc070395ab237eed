use std::fmt::Debug;
use std::net::{IpAddr, Ipv4Addr};

use http::uri::{PathAndQuery, Scheme};
use http::{HeaderMap, Uri};
use serde::Serialize;
use url::Url;

use super::{CallHeaders, ClientError, RestClient};

/// Builder for [`RestClient`].
///
/// Defaults to `http://127.0.0.1/` with a default `reqwest::Client` and no
/// default headers.
///
/// ```rust
/// use tyrest_core::RestClient;
///
/// # fn example() -> Result<(), tyrest_core::ClientError> {
/// let client = RestClient::builder()
///     .with_base_url("https://api.example.com/v10")?
///     .with_user_agent("tyrest (https://example.com, 0.1)")
///     .with_default_header("Authorization", "Bot token")
///     .build()?;
///
/// assert_eq!(client.base_uri().to_string(), "https://api.example.com/v10");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RestClientBuilder {
    client: reqwest::Client,
    scheme: Scheme,
    host: String,
    port: Option<u16>,
    base_path: Option<PathAndQuery>,
    default_headers: CallHeaders,
}

impl RestClientBuilder {
    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Fails if the base URI cannot be built from the scheme, host, port, and
    /// base path, or if a default header is invalid.
    pub fn build(self) -> Result<RestClient, ClientError> {
        let Self {
            client,
            scheme,
            host,
            port,
            base_path,
            default_headers,
        } = self;

        let authority = match port {
            Some(port) => format!("{host}:{port}"),
            None => host,
        };
        let builder = Uri::builder().scheme(scheme).authority(authority);
        let builder = if let Some(path) = &base_path {
            builder.path_and_query(path.path())
        } else {
            builder.path_and_query("/")
        };
        let base_uri = builder.build()?;

        let mut headers = HeaderMap::new();
        default_headers.apply_to(&mut headers)?;

        Ok(RestClient {
            client,
            base_uri,
            default_headers: headers,
        })
    }

    /// Sets the HTTP client used to send requests.
    ///
    /// Use it to configure timeouts, TLS, or proxies on the transport.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Sets the scheme, `http` by default.
    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Sets the host name or IP address.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the port, the default port of the scheme is used otherwise.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets the path prefixed to every call path.
    ///
    /// # Errors
    ///
    /// Fails if the path is not a valid URI path.
    pub fn with_base_path<P>(mut self, base_path: P) -> Result<Self, ClientError>
    where
        P: TryInto<PathAndQuery>,
        P::Error: Debug + 'static,
    {
        let base_path = base_path
            .try_into()
            .map_err(|err| ClientError::InvalidBasePath {
                error: format!("{err:?}"),
            })?;
        self.base_path = Some(base_path);
        Ok(self)
    }

    /// Sets scheme, host, port, and base path from a single URL.
    ///
    /// # Errors
    ///
    /// Fails if the URL cannot be parsed, has no host, or does not use `http` or `https`.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ClientError> {
        let url = Url::parse(base_url)?;

        self.scheme = match url.scheme() {
            "http" => Scheme::HTTP,
            "https" => Scheme::HTTPS,
            other => {
                return Err(ClientError::InvalidBasePath {
                    error: format!("unsupported scheme '{other}'"),
                });
            }
        };
        self.host = url
            .host_str()
            .ok_or_else(|| ClientError::InvalidBasePath {
                error: format!("missing host in '{base_url}'"),
            })?
            .to_string();
        self.port = url.port();

        self.with_base_path(url.path())
    }

    /// Adds a header sent with every call.
    ///
    /// Call headers with the same name take precedence. The header is
    /// validated by [`build`](Self::build).
    pub fn with_default_header<T>(mut self, name: impl Into<String>, value: &T) -> Self
    where
        T: Serialize + ?Sized,
    {
        self.default_headers = self.default_headers.add_header(name, value);
        self
    }

    /// Sets the `User-Agent` header sent with every call.
    pub fn with_user_agent(self, user_agent: impl Into<String>) -> Self {
        let user_agent = user_agent.into();
        self.with_default_header("User-Agent", &user_agent)
    }
}

impl Default for RestClientBuilder {
    fn default() -> Self {
        Self {
            client: reqwest::Client::new(),
            scheme: Scheme::HTTP,
            host: IpAddr::V4(Ipv4Addr::LOCALHOST).to_string(),
            port: None,
            base_path: None,
            default_headers: CallHeaders::default(),
        }
    }
}
