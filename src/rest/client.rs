//! Typed Kraken REST API client.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::auth::{CredentialsProvider, IncreasingNonce, NonceProvider, RequestAuthenticator};
use crate::error::KrakenError;
use crate::rest::dispatcher::QueryDispatcher;
use crate::rest::endpoints::KRAKEN_BASE_URL;
use crate::rest::response::decode_response;
use crate::transport::{ReqwestTransport, ReqwestTransportBuilder, Transport};

/// The Kraken REST API client.
///
/// Endpoint methods live in [`rest::public`](crate::rest::public) and
/// [`rest::private`](crate::rest::private). Each one issues exactly one HTTP
/// request; nothing is retried or rate limited.
///
/// # Example
///
/// ```rust,no_run
/// use kraken_rest_client::rest::KrakenRestClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Public endpoints only
///     let client = KrakenRestClient::new();
///
///     let status = client.get_system_status().await?;
///     println!("Kraken is {}", status.status);
///
///     Ok(())
/// }
/// ```
///
/// For private endpoints, provide credentials:
///
/// ```rust,no_run
/// use kraken_rest_client::rest::KrakenRestClient;
/// use kraken_rest_client::auth::StaticCredentials;
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let credentials = Arc::new(StaticCredentials::new("api_key", "api_secret_base64"));
///     let client = KrakenRestClient::builder()
///         .credentials(credentials)
///         .timeout(Duration::from_secs(10))
///         .build();
///
///     let balance = client.get_account_balance().await?;
///     println!("Balance: {:?}", balance);
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct KrakenRestClient<T = ReqwestTransport> {
    dispatcher: QueryDispatcher<T>,
}

impl KrakenRestClient<ReqwestTransport> {
    /// Create a client for the production API without credentials.
    ///
    /// Use [`KrakenRestClient::builder()`] to configure credentials for
    /// private endpoints.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a new client builder.
    pub fn builder() -> KrakenRestClientBuilder {
        KrakenRestClientBuilder::new()
    }
}

impl<T: Transport> KrakenRestClient<T> {
    /// Wrap an existing dispatcher.
    pub fn from_dispatcher(dispatcher: QueryDispatcher<T>) -> Self {
        Self { dispatcher }
    }

    /// The dispatcher used for every request.
    pub fn dispatcher(&self) -> &QueryDispatcher<T> {
        &self.dispatcher
    }

    pub fn base_url(&self) -> &str {
        self.dispatcher.base_url()
    }

    /// Whether private endpoints can be called.
    pub fn has_credentials(&self) -> bool {
        self.dispatcher.has_credentials()
    }

    /// Call any public endpoint and decode its `result` into `R`.
    ///
    /// Useful for endpoints without a dedicated method.
    pub async fn public_get<R, Q>(&self, path: &str, params: &Q) -> Result<R, KrakenError>
    where
        R: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let body = self.dispatcher.public_query(path, params).await?;
        decode_response(&body)
    }

    /// Call any private endpoint and decode its `result` into `R`.
    ///
    /// `params` must not contain a `nonce` field; one is added when signing.
    pub async fn private_post<R, P>(&self, path: &str, params: &P) -> Result<R, KrakenError>
    where
        R: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        let body = self.dispatcher.private_query(path, params).await?;
        decode_response(&body)
    }
}

impl Default for KrakenRestClient<ReqwestTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for KrakenRestClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KrakenRestClient")
            .field("base_url", &self.dispatcher.base_url())
            .field("has_credentials", &self.dispatcher.has_credentials())
            .finish()
    }
}

/// Builder for [`KrakenRestClient`].
pub struct KrakenRestClientBuilder {
    base_url: String,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    nonce_provider: Option<Arc<dyn NonceProvider>>,
    transport: ReqwestTransportBuilder,
}

impl KrakenRestClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: KRAKEN_BASE_URL.to_string(),
            credentials: None,
            nonce_provider: None,
            transport: ReqwestTransportBuilder::new(),
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the credentials provider for authenticated requests.
    pub fn credentials(mut self, credentials: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set a custom nonce provider.
    ///
    /// Kraken rejects a nonce that is not greater than the last one it saw for
    /// the key, so clients sharing a key should share the provider too.
    pub fn nonce_provider(mut self, provider: Arc<dyn NonceProvider>) -> Self {
        self.nonce_provider = Some(provider);
        self
    }

    /// Set a custom user agent. Ignored by [`build_with_transport`](Self::build_with_transport).
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.transport = self.transport.user_agent(user_agent);
        self
    }

    /// Set the whole-request timeout. Ignored by [`build_with_transport`](Self::build_with_transport).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.transport = self.transport.timeout(timeout);
        self
    }

    /// Set the connect timeout. Ignored by [`build_with_transport`](Self::build_with_transport).
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.transport = self.transport.connect_timeout(timeout);
        self
    }

    /// Build the client on the default `reqwest` transport.
    pub fn build(mut self) -> KrakenRestClient {
        let transport = std::mem::take(&mut self.transport).build();
        self.finish(transport)
    }

    /// Build the client on a caller-supplied transport.
    pub fn build_with_transport<T: Transport>(self, transport: T) -> KrakenRestClient<T> {
        self.finish(transport)
    }

    fn finish<T: Transport>(self, transport: T) -> KrakenRestClient<T> {
        let authenticator = self.credentials.map(|credentials| {
            let nonce_provider = self
                .nonce_provider
                .unwrap_or_else(|| Arc::new(IncreasingNonce::new()));
            RequestAuthenticator::with_nonce_provider(credentials, nonce_provider)
        });

        KrakenRestClient {
            dispatcher: QueryDispatcher::new(transport, self.base_url, authenticator),
        }
    }
}

impl Default for KrakenRestClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for KrakenRestClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KrakenRestClientBuilder")
            .field("base_url", &self.base_url)
            .field("has_credentials", &self.credentials.is_some())
            .field("transport", &self.transport)
            .finish()
    }
}
