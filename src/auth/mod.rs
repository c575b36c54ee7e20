//! Authentication module for Kraken API.
//!
//! This module provides:
//! - Credential management with secure secret storage
//! - Nonce generation for replay attack prevention
//! - HMAC-SHA512 signature generation for authenticated requests
//! - [`RequestAuthenticator`], which combines the three into a signed request

mod authenticator;
mod credentials;
mod nonce;
mod signature;

pub use authenticator::{
    API_KEY_HEADER, API_SIGN_HEADER, RequestAuthenticator, SignedRequest, encode_post_body,
};
pub use credentials::{
    API_KEY_ENV, API_SECRET_ENV, Credentials, CredentialsProvider, EnvCredentials,
    StaticCredentials,
};
pub use nonce::{IncreasingNonce, NonceProvider};
pub use signature::sign_request;
