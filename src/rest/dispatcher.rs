//! Composes public and private requests and hands them to the transport.
//!
//! The dispatcher returns the raw response body. Interpreting the payload is
//! left to [`decode_response`](crate::rest::decode_response).

use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::auth::{API_KEY_HEADER, API_SIGN_HEADER, RequestAuthenticator};
use crate::error::{KrakenError, TransportError};
use crate::rest::endpoints::KRAKEN_BASE_URL;
use crate::transport::{HttpRequest, ReqwestTransport, Transport};

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Issues unsigned GET requests to public endpoints and signed POST requests
/// to private ones.
///
/// # Example
///
/// ```rust,no_run
/// use kraken_rest_client::rest::QueryDispatcher;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let dispatcher = QueryDispatcher::public_only();
///     let body = dispatcher
///         .public_query("/0/public/Ticker", &[("pair", "XBTUSD")])
///         .await?;
///     println!("{body}");
///     Ok(())
/// }
/// ```
#[derive(Clone, Debug)]
pub struct QueryDispatcher<T = ReqwestTransport> {
    transport: T,
    base_url: String,
    authenticator: Option<RequestAuthenticator>,
}

impl QueryDispatcher<ReqwestTransport> {
    /// Dispatcher for the production API without credentials.
    pub fn public_only() -> Self {
        Self::new(ReqwestTransport::new(), KRAKEN_BASE_URL, None)
    }
}

impl<T> QueryDispatcher<T> {
    /// Create a dispatcher.
    ///
    /// A trailing `/` on `base_url` is ignored. Without an authenticator every
    /// private query fails with [`KrakenError::MissingCredentials`].
    pub fn new(
        transport: T,
        base_url: impl Into<String>,
        authenticator: Option<RequestAuthenticator>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            transport,
            base_url,
            authenticator,
        }
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether private queries can be signed.
    pub fn has_credentials(&self) -> bool {
        self.authenticator.is_some()
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T: Transport> QueryDispatcher<T> {
    /// Build the GET request for a public endpoint.
    ///
    /// The query string is omitted entirely when `params` encodes to nothing.
    pub fn public_request<Q>(&self, path: &str, params: &Q) -> Result<HttpRequest, KrakenError>
    where
        Q: Serialize + ?Sized,
    {
        let query = serde_urlencoded::to_string(params)?;
        let url = if query.is_empty() {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}{}?{}", self.base_url, path, query)
        };

        Ok(HttpRequest {
            method: Method::GET,
            url: Url::parse(&url)?,
            headers: HeaderMap::new(),
            body: None,
        })
    }

    /// Build the signed POST request for a private endpoint.
    ///
    /// Draws a nonce, so the returned request must be sent at most once.
    pub fn private_request<P>(&self, path: &str, params: &P) -> Result<HttpRequest, KrakenError>
    where
        P: Serialize + ?Sized,
    {
        let authenticator = self
            .authenticator
            .as_ref()
            .ok_or(KrakenError::MissingCredentials)?;
        let signed = authenticator.authenticate(path, params)?;

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, HeaderValue::from_str(&signed.api_key)?);
        headers.insert(API_SIGN_HEADER, HeaderValue::from_str(&signed.signature)?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_URLENCODED));

        Ok(HttpRequest {
            method: Method::POST,
            url: Url::parse(&format!("{}{}", self.base_url, path))?,
            headers,
            body: Some(signed.post_body),
        })
    }

    /// Query a public endpoint and return the raw response body.
    pub async fn public_query<Q>(&self, path: &str, params: &Q) -> Result<String, KrakenError>
    where
        Q: Serialize + ?Sized,
    {
        let request = self.public_request(path, params)?;
        self.execute(request).await
    }

    /// Query a private endpoint and return the raw response body.
    ///
    /// Fails with [`KrakenError::MissingCredentials`] without touching the
    /// transport when no usable credentials are configured.
    pub async fn private_query<P>(&self, path: &str, params: &P) -> Result<String, KrakenError>
    where
        P: Serialize + ?Sized,
    {
        let request = self.private_request(path, params)?;
        self.execute(request).await
    }

    async fn execute(&self, request: HttpRequest) -> Result<String, KrakenError> {
        let method = request.method.clone();
        let path = request.url.path().to_string();
        debug!(%method, %path, "sending Kraken request");

        let response = self.transport.send(request).await?;
        if !response.status.is_success() {
            debug!(%method, %path, status = %response.status, "Kraken request failed");
            return Err(TransportError::Status {
                status: response.status,
                body: response.body,
            }
            .into());
        }

        Ok(response.body)
    }
}
