//! HMAC-SHA512 signature generation for Kraken API authentication.
//!
//! Kraken private endpoints require a signature computed as:
//! ```text
//! HMAC-SHA512(path + SHA256(nonce + POST_data), base64_decode(api_secret))
//! ```
//!
//! The signature is then base64-encoded and sent in the `API-Sign` header.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256, Sha512};

use crate::error::CryptoError;

type HmacSha512 = Hmac<Sha512>;

/// Sign a request for Kraken's private API.
///
/// # Arguments
///
/// * `api_secret` - The base64-encoded API secret
/// * `url_path` - The API endpoint path (e.g., "/0/private/Balance")
/// * `nonce` - The nonce value for this request
/// * `post_data` - The URL-encoded POST body, which must already contain the nonce
///
/// # Returns
///
/// Base64-encoded HMAC-SHA512 signature.
///
/// # Example
///
/// ```rust
/// use kraken_rest_client::auth::sign_request;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let signature = sign_request(
///     "c2VjcmV0", // base64 of "secret"
///     "/0/private/Balance",
///     1700000000000000,
///     "nonce=1700000000000000",
/// )?;
/// assert_eq!(signature.len(), 88);
/// # Ok(())
/// # }
/// ```
pub fn sign_request(
    api_secret: &str,
    url_path: &str,
    nonce: u64,
    post_data: &str,
) -> Result<String, CryptoError> {
    let secret_decoded = BASE64.decode(api_secret)?;

    let mut sha256 = Sha256::new();
    sha256.update(nonce.to_string().as_bytes());
    sha256.update(post_data.as_bytes());
    let digest = sha256.finalize();

    let mut hmac = HmacSha512::new_from_slice(&secret_decoded).map_err(|_| CryptoError::InvalidKey)?;
    hmac.update(url_path.as_bytes());
    hmac.update(&digest);

    Ok(BASE64.encode(hmac.finalize().into_bytes()))
}
