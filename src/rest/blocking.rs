//! Synchronous facade over [`KrakenRestClient`].
//!
//! Each call blocks the current thread until the single underlying HTTP
//! exchange completes. Must not be used from inside an async runtime.

use std::future::Future;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::runtime::{Builder, Runtime};

use crate::error::KrakenError;
use crate::rest::KrakenRestClient;
use crate::transport::{ReqwestTransport, Transport};

/// Drives a [`KrakenRestClient`] on its own current-thread runtime.
///
/// ```rust,no_run
/// use kraken_rest_client::rest::{BlockingRestClient, KrakenRestClient};
///
/// fn main() -> Result<(), kraken_rest_client::KrakenError> {
///     let client = BlockingRestClient::new(KrakenRestClient::new())?;
///
///     let time = client.run(|client| client.get_server_time())?;
///     println!("{}", time.unixtime);
///
///     let raw = client.public_query("/0/public/Ticker", &[("pair", "XBTUSD")])?;
///     println!("{raw}");
///     Ok(())
/// }
/// ```
pub struct BlockingRestClient<T = ReqwestTransport> {
    client: KrakenRestClient<T>,
    runtime: Runtime,
}

impl<T: Transport> BlockingRestClient<T> {
    /// Wrap `client`, starting a runtime to drive it.
    pub fn new(client: KrakenRestClient<T>) -> Result<Self, KrakenError> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self { client, runtime })
    }

    /// The wrapped async client.
    pub fn client(&self) -> &KrakenRestClient<T> {
        &self.client
    }

    /// Run any operation of the async client to completion.
    pub fn run<'a, F, Fut, R>(&'a self, operation: F) -> R
    where
        F: FnOnce(&'a KrakenRestClient<T>) -> Fut,
        Fut: Future<Output = R> + 'a,
    {
        self.runtime.block_on(operation(&self.client))
    }

    /// Query a public endpoint and return the raw response body.
    pub fn public_query<Q>(&self, path: &str, params: &Q) -> Result<String, KrakenError>
    where
        Q: Serialize + ?Sized,
    {
        self.runtime
            .block_on(self.client.dispatcher().public_query(path, params))
    }

    /// Query a private endpoint and return the raw response body.
    pub fn private_query<P>(&self, path: &str, params: &P) -> Result<String, KrakenError>
    where
        P: Serialize + ?Sized,
    {
        self.runtime
            .block_on(self.client.dispatcher().private_query(path, params))
    }

    /// Call a public endpoint and decode its `result` into `R`.
    pub fn public_get<R, Q>(&self, path: &str, params: &Q) -> Result<R, KrakenError>
    where
        R: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.runtime.block_on(self.client.public_get(path, params))
    }

    /// Call a private endpoint and decode its `result` into `R`.
    pub fn private_post<R, P>(&self, path: &str, params: &P) -> Result<R, KrakenError>
    where
        R: DeserializeOwned,
        P: Serialize + ?Sized,
    {
        self.runtime.block_on(self.client.private_post(path, params))
    }
}

impl<T> std::fmt::Debug for BlockingRestClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingRestClient")
            .field("client", &self.client)
            .finish_non_exhaustive()
    }
}
