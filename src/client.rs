use async_trait::async_trait;
use reqwest::{
    header::{CONTENT_TYPE, USER_AGENT},
    Method, Request, Response, StatusCode,
};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::{self, Display};
use tracing::{debug, warn};
use url::Url;

pub use crate::{
    error::{ErrorResponse, PicketError},
    models::{
        AuthArgs, AuthResponse, AuthorizationRequirements, AuthorizedUser, AuthzArgs, NonceArgs, NonceResponse,
        TokenOwnershipArgs, TokenOwnershipResponse, ValidateArgs,
    },
};

/// The Picket API base url used when none is provided.
pub const DEFAULT_BASE_URL: &str = "https://picketapi.com/api/v1";

/// The user agent sent on every request.
pub const CLIENT_USER_AGENT: &str = concat!("picket-rs/", env!("CARGO_PKG_VERSION"));

const JSON_CONTENT_TYPE: &str = "application/json";

/// An interface to interact with the Picket API.
#[async_trait]
pub trait PicketClient {
    /// Get a nonce for the given wallet to sign.
    async fn nonce(&self, args: NonceArgs) -> Result<NonceResponse, PicketError>;

    /// Authenticate, and optionally authorize, a wallet using its signed nonce.
    ///
    /// On success the returned access token can be used for the rest of the user's session.
    async fn auth(&self, args: AuthArgs) -> Result<AuthResponse, PicketError>;

    /// Authorize an existing access token against the given requirements.
    ///
    /// On success the returned access token supersedes the one passed in.
    async fn authz(&self, args: AuthzArgs) -> Result<AuthResponse, PicketError>;

    /// Validate an access token, optionally against the given requirements.
    async fn validate(&self, args: ValidateArgs) -> Result<AuthorizedUser, PicketError>;

    /// Check whether a wallet meets the given requirements.
    ///
    /// Similar to [`PicketClient::authz`] but does not require nor return an access token.
    async fn token_ownership(&self, args: TokenOwnershipArgs) -> Result<TokenOwnershipResponse, PicketError>;
}

/// A Picket API route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint<'a> {
    /// `auth/nonce`
    Nonce,
    /// `auth`
    Auth,
    /// `authz`
    Authz,
    /// `auth/validate`
    Validate,
    /// `chains/{chain}/wallets/{wallet_address}/tokenOwnership`
    TokenOwnership { chain: &'a str, wallet_address: &'a str },
}

impl<'a> Endpoint<'a> {
    /// The method this route is invoked with.
    pub fn method(&self) -> Method {
        Method::POST
    }

    /// The path segments relative to the base url.
    pub fn segments(&self) -> Vec<&'a str> {
        match *self {
            Self::Nonce => vec!["auth", "nonce"],
            Self::Auth => vec!["auth"],
            Self::Authz => vec!["authz"],
            Self::Validate => vec!["auth", "validate"],
            Self::TokenOwnership { chain, wallet_address } => {
                vec!["chains", chain, "wallets", wallet_address, "tokenOwnership"]
            }
        }
    }
}

impl Display for Endpoint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments().join("/"))
    }
}

/// The arguments used to construct a [`DefaultPicketClient`].
#[derive(Clone, Default)]
pub struct PicketClientArgs {
    /// Your Picket project's api key. Typically the secret key in server-side environments.
    pub api_key: String,

    /// The base url of the Picket API. Typically only overridden for testing.
    pub base_url: Option<String>,

    /// The http client to use for requests.
    pub http_client: Option<reqwest::Client>,
}

/// The default Picket client that hits the actual service.
#[derive(Clone)]
pub struct DefaultPicketClient {
    client: reqwest::Client,
    api_key: String,
    base_url: Url,
}

impl fmt::Debug for DefaultPicketClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultPicketClient").field("base_url", &self.base_url.as_str()).finish_non_exhaustive()
    }
}

impl DefaultPicketClient {
    /// Create a client for the production API.
    pub fn new(api_key: impl Into<String>) -> Result<Self, PicketError> {
        Self::with_args(PicketClientArgs { api_key: api_key.into(), ..Default::default() })
    }

    /// Create a client with explicit overrides.
    pub fn with_args(args: PicketClientArgs) -> Result<Self, PicketError> {
        let PicketClientArgs { api_key, base_url, http_client } = args;
        let base_url = match base_url.as_deref() {
            Some(url) if !url.is_empty() => parse_base_url(url)?,
            _ => parse_base_url(DEFAULT_BASE_URL)?,
        };
        let client = match http_client {
            Some(client) => client,
            None => reqwest::Client::builder().build()?,
        };
        Ok(Self { client, api_key, base_url })
    }

    /// Point the client at a different API root.
    pub fn set_base_url(&mut self, base_url: &str) -> Result<(), PicketError> {
        self.base_url = parse_base_url(base_url)?;
        Ok(())
    }

    /// Replace the http client used for requests.
    pub fn set_http_client(&mut self, client: reqwest::Client) {
        self.client = client;
    }

    /// The api key sent as the basic auth username.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// The API root every path is joined onto.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Join the given path segments onto the base url, escaping each one.
    ///
    /// Empty segments are kept, `.` and `..` are skipped by the url encoder.
    fn make_url<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Result<Url, PicketError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| PicketError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: "cannot be a base".into(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Build a request for `path`, relative to the base url.
    ///
    /// The body, if any, is serialized as json. Without one the request has no body at all.
    pub fn build_request<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Request, PicketError>
    where
        B: Serialize + ?Sized,
    {
        self.build(method, path.split('/').filter(|s| !s.is_empty()), body)
    }

    fn build<'a, B>(
        &self,
        method: Method,
        segments: impl IntoIterator<Item = &'a str>,
        body: Option<&B>,
    ) -> Result<Request, PicketError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.make_url(segments)?;
        let mut builder = self
            .client
            .request(method, url)
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .basic_auth(&self.api_key, Some(""));
        if let Some(body) = body {
            let bytes = serde_json::to_vec(body).map_err(PicketError::Encode)?;
            builder = builder.body(bytes);
        }
        Ok(builder.build()?)
    }

    /// Build and send a request for `path`, returning the raw response.
    pub async fn do_request<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Response, PicketError>
    where
        B: Serialize + ?Sized,
    {
        let request = self.build_request(method, path, body)?;
        self.execute(request).await
    }

    async fn execute(&self, request: Request) -> Result<Response, PicketError> {
        debug!("Sending {} {}", request.method(), request.url());
        let response = self.client.execute(request).await?;
        debug!("Received {} from {}", response.status(), response.url());
        Ok(response)
    }

    async fn parse_response<T>(response: Response) -> Result<T, PicketError>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        let body = response.bytes().await?;
        decode_response(status, &body)
    }

    async fn post<R, O>(&self, endpoint: Endpoint<'_>, request: &R) -> Result<O, PicketError>
    where
        R: Serialize + ?Sized,
        O: DeserializeOwned,
    {
        let request = self.build(endpoint.method(), endpoint.segments(), Some(request))?;
        let response = self.execute(request).await?;
        Self::parse_response(response).await
    }
}

#[async_trait]
impl PicketClient for DefaultPicketClient {
    async fn nonce(&self, args: NonceArgs) -> Result<NonceResponse, PicketError> {
        self.post(Endpoint::Nonce, &args).await
    }

    async fn auth(&self, args: AuthArgs) -> Result<AuthResponse, PicketError> {
        self.post(Endpoint::Auth, &args).await
    }

    async fn authz(&self, args: AuthzArgs) -> Result<AuthResponse, PicketError> {
        self.post(Endpoint::Authz, &args).await
    }

    async fn validate(&self, args: ValidateArgs) -> Result<AuthorizedUser, PicketError> {
        self.post(Endpoint::Validate, &args).await
    }

    async fn token_ownership(&self, args: TokenOwnershipArgs) -> Result<TokenOwnershipResponse, PicketError> {
        let TokenOwnershipArgs { chain, wallet_address, requirements } = args;
        let endpoint = Endpoint::TokenOwnership { chain: &chain, wallet_address: &wallet_address };
        self.post(endpoint, &requirements).await
    }
}

/// Decode a response body into `T` on a 2xx status, or into an [`ErrorResponse`] otherwise.
///
/// A body that can't be decoded is reported as [`PicketError::Decode`], never as an api error.
pub fn decode_response<T>(status: StatusCode, body: &[u8]) -> Result<T, PicketError>
where
    T: DeserializeOwned,
{
    if status.is_success() {
        Ok(serde_json::from_slice(body)?)
    } else {
        let value: serde_json::Value = serde_json::from_slice(body)?;
        if !value.is_object() {
            return Err(PicketError::Decode(serde::de::Error::custom(format!(
                "expected an error object, got {value}"
            ))));
        }
        let error: ErrorResponse = serde_json::from_value(value)?;
        warn!("Picket API returned {status}: code={}, msg={}", error.code, error.msg);
        Err(error.into())
    }
}

fn parse_base_url(base_url: &str) -> Result<Url, PicketError> {
    let invalid = |reason: String| PicketError::InvalidBaseUrl { url: base_url.to_string(), reason };
    let url = Url::parse(base_url.trim_end_matches('/')).map_err(|e| invalid(e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(invalid("cannot be a base".into()));
    }
    Ok(url)
}
