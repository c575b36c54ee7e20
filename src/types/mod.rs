//! Common types used across the Kraken client library.

pub mod common;
pub mod paginated;

pub use common::*;
pub use paginated::Paginated;
