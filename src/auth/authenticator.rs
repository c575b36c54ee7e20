//! Turns caller parameters into a signed private request.

use std::sync::Arc;

use serde::Serialize;
use tracing::trace;

use crate::auth::{CredentialsProvider, IncreasingNonce, NonceProvider, sign_request};
use crate::error::KrakenError;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "API-Key";
/// Header carrying the request signature.
pub const API_SIGN_HEADER: &str = "API-Sign";

/// Name of the body field carrying the nonce.
const NONCE_FIELD: &str = "nonce";

/// Everything needed to put one authenticated request on the wire.
///
/// Built fresh for every request and never reused: the nonce it carries is
/// only valid once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    /// Value of the `API-Key` header.
    pub api_key: String,
    /// Value of the `API-Sign` header.
    pub signature: String,
    /// Nonce embedded in the body.
    pub nonce: u64,
    /// URL-encoded body, ending with `nonce=<nonce>`.
    pub post_body: String,
}

/// Build the URL-encoded body of a private request.
///
/// The parameters are encoded in their serialization order and followed by
/// the `nonce` field. A parameter named `nonce` is rejected.
///
/// ```rust
/// use kraken_rest_client::auth::encode_post_body;
///
/// let body = encode_post_body(&[("pair", "XBTUSD")], 5).unwrap();
/// assert_eq!(body, "pair=XBTUSD&nonce=5");
/// ```
pub fn encode_post_body<P>(params: &P, nonce: u64) -> Result<String, KrakenError>
where
    P: Serialize + ?Sized,
{
    let encoded = encode_params(params)?;
    Ok(append_nonce(encoded, nonce))
}

fn encode_params<P>(params: &P) -> Result<String, KrakenError>
where
    P: Serialize + ?Sized,
{
    let encoded = serde_urlencoded::to_string(params)?;

    let has_nonce = encoded
        .split('&')
        .any(|pair| pair.split('=').next() == Some(NONCE_FIELD));
    if has_nonce {
        return Err(KrakenError::InvalidParams(serde::ser::Error::custom(
            "`nonce` is reserved and set by the authenticator",
        )));
    }

    Ok(encoded)
}

fn append_nonce(mut encoded: String, nonce: u64) -> String {
    if !encoded.is_empty() {
        encoded.push('&');
    }
    encoded.push_str(NONCE_FIELD);
    encoded.push('=');
    encoded.push_str(&nonce.to_string());
    encoded
}

/// Signs private requests for one set of credentials.
///
/// Owns the nonce source for those credentials. Clones share it, so every
/// request issued through any clone gets a strictly greater nonce than the
/// previous one.
#[derive(Clone)]
pub struct RequestAuthenticator {
    credentials: Arc<dyn CredentialsProvider>,
    nonce_provider: Arc<dyn NonceProvider>,
}

impl RequestAuthenticator {
    /// Create an authenticator with the default time-based nonce source.
    pub fn new(credentials: Arc<dyn CredentialsProvider>) -> Self {
        Self::with_nonce_provider(credentials, Arc::new(IncreasingNonce::new()))
    }

    /// Create an authenticator with a custom nonce source.
    pub fn with_nonce_provider(
        credentials: Arc<dyn CredentialsProvider>,
        nonce_provider: Arc<dyn NonceProvider>,
    ) -> Self {
        Self {
            credentials,
            nonce_provider,
        }
    }

    /// The API key requests are signed for.
    pub fn api_key(&self) -> &str {
        &self.credentials.get_credentials().api_key
    }

    /// Sign a request to `url_path` carrying `params`.
    ///
    /// Fails with [`KrakenError::MissingCredentials`] when the key or secret is
    /// empty, before a nonce is drawn, and with [`KrakenError::Crypto`] when
    /// the secret is not usable.
    pub fn authenticate<P>(&self, url_path: &str, params: &P) -> Result<SignedRequest, KrakenError>
    where
        P: Serialize + ?Sized,
    {
        let credentials = self.credentials.get_credentials();
        if !credentials.is_complete() {
            return Err(KrakenError::MissingCredentials);
        }

        let encoded = encode_params(params)?;
        let nonce = self.nonce_provider.next_nonce();
        let post_body = append_nonce(encoded, nonce);
        let signature = sign_request(credentials.expose_secret(), url_path, nonce, &post_body)?;

        trace!(url_path, nonce, "signed private request");

        Ok(SignedRequest {
            api_key: credentials.api_key.clone(),
            signature,
            nonce,
            post_body,
        })
    }
}

impl std::fmt::Debug for RequestAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestAuthenticator")
            .field("credentials", self.credentials.get_credentials())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticCredentials;
    use crate::error::CryptoError;
    use std::collections::{BTreeMap, HashSet};
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Hands out `start`, `start + 1`, ...
    struct SequenceNonce(AtomicU64);

    impl NonceProvider for SequenceNonce {
        fn next_nonce(&self) -> u64 {
            self.0.fetch_add(1, Ordering::SeqCst)
        }
    }

    fn authenticator(key: &str, secret: &str, first_nonce: u64) -> RequestAuthenticator {
        RequestAuthenticator::with_nonce_provider(
            Arc::new(StaticCredentials::new(key, secret)),
            Arc::new(SequenceNonce(AtomicU64::new(first_nonce))),
        )
    }

    #[test]
    fn test_reference_request() {
        let auth = authenticator("K", "c2VjcmV0", 1_700_000_000_000_000);
        let signed = auth
            .authenticate("/0/private/Balance", &BTreeMap::<String, String>::new())
            .unwrap();

        assert_eq!(signed.api_key, "K");
        assert_eq!(signed.nonce, 1_700_000_000_000_000);
        assert_eq!(signed.post_body, "nonce=1700000000000000");
        assert_eq!(
            signed.signature,
            "pGpWiSKFzUmj7JH7DDPWqp3cWzHwouxKs02OJ3rS3opjf4Zyn6bOXVwr+nnrNdFfyzvhCkrzRAuBCLRgVAftcQ=="
        );
    }

    #[test]
    fn test_params_precede_nonce() {
        let auth = authenticator("K", "c2VjcmV0", 42);
        let signed = auth
            .authenticate("/0/private/TradeBalance", &[("asset", "ZUSD")])
            .unwrap();

        assert_eq!(signed.post_body, "asset=ZUSD&nonce=42");
        let expected = sign_request("c2VjcmV0", "/0/private/TradeBalance", 42, "asset=ZUSD&nonce=42").unwrap();
        assert_eq!(signed.signature, expected);
    }

    #[test]
    fn test_post_body_round_trip() {
        let mut params = BTreeMap::new();
        params.insert("a", "1");
        params.insert("b", "2");

        let body = encode_post_body(&params, 5).unwrap();
        let parsed: HashSet<(String, String)> = serde_urlencoded::from_str::<Vec<(String, String)>>(&body)
            .unwrap()
            .into_iter()
            .collect();

        let expected: HashSet<(String, String)> = [("a", "1"), ("b", "2"), ("nonce", "5")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert_eq!(parsed, expected);
        assert!(body.ends_with("&nonce=5"));
    }

    #[test]
    fn test_values_are_url_encoded() {
        let body = encode_post_body(&[("txid", "O1,O2"), ("note", "a b&c")], 7).unwrap();
        assert_eq!(body, "txid=O1%2CO2&note=a+b%26c&nonce=7");
    }

    #[test]
    fn test_reserved_nonce_parameter() {
        let result = encode_post_body(&[("nonce", "1")], 2);
        assert!(matches!(result, Err(KrakenError::InvalidParams(_))));

        // Keys that merely start with "nonce" are fine.
        assert_eq!(encode_post_body(&[("nonces", "1")], 2).unwrap(), "nonces=1&nonce=2");
    }

    #[test]
    fn test_missing_credentials() {
        for (key, secret) in [("K", ""), ("", "c2VjcmV0"), ("", "")] {
            let auth = authenticator(key, secret, 1);
            let result = auth.authenticate("/0/private/Balance", &[("a", "1")]);
            assert!(matches!(result, Err(KrakenError::MissingCredentials)));
        }
    }

    #[test]
    fn test_invalid_secret_is_crypto_failure() {
        let auth = authenticator("K", "not base64!", 1);
        let result = auth.authenticate("/0/private/Balance", &[("a", "1")]);
        assert!(matches!(
            result,
            Err(KrakenError::Crypto(CryptoError::InvalidSecret(_)))
        ));
    }

    #[test]
    fn test_each_request_gets_a_fresh_nonce() {
        let auth = RequestAuthenticator::new(Arc::new(StaticCredentials::new("K", "c2VjcmV0")));
        let first = auth.authenticate("/0/private/Balance", &()).unwrap();
        let second = auth.clone().authenticate("/0/private/Balance", &()).unwrap();

        assert!(second.nonce > first.nonce);
        assert_ne!(first.signature, second.signature);
        assert_ne!(first.post_body, second.post_body);
    }

    #[test]
    fn test_debug_hides_secret() {
        let auth = authenticator("K", "c2VjcmV0", 1);
        let debug = format!("{auth:?}");
        assert!(debug.contains("K"));
        assert!(!debug.contains("c2VjcmV0"));
    }
}
