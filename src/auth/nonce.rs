//! Nonce generation for Kraken API authentication.
//!
//! Kraken rejects any private request whose nonce is not greater than the last
//! nonce it accepted for the same API key.

use std::sync::atomic::{AtomicU64, Ordering};

use time::OffsetDateTime;

/// Trait for providing nonces for authenticated requests.
pub trait NonceProvider: Send + Sync {
    /// Generate the next nonce value.
    ///
    /// This value must be greater than any previously returned value.
    fn next_nonce(&self) -> u64;
}

/// A nonce provider that generates strictly increasing nonces based on time.
///
/// Each nonce is `max(now_in_microseconds, last + 1)`, so requests issued in
/// the same microsecond, or after the wall clock stepped backwards, still get
/// a fresh value. Safe to share across threads.
#[derive(Debug)]
pub struct IncreasingNonce {
    last_nonce: AtomicU64,
}

impl IncreasingNonce {
    /// Create a new increasing nonce provider.
    pub fn new() -> Self {
        Self::starting_after(0)
    }

    /// Create a provider whose first nonce is greater than `floor`.
    ///
    /// Useful when the last nonce used with an API key was persisted and the
    /// local clock cannot be trusted to be ahead of it.
    pub fn starting_after(floor: u64) -> Self {
        Self {
            last_nonce: AtomicU64::new(floor),
        }
    }

    /// The most recently issued nonce (or the floor if none was issued yet).
    pub fn last(&self) -> u64 {
        self.last_nonce.load(Ordering::SeqCst)
    }

    fn current_time_micros() -> u64 {
        let micros = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000;
        u64::try_from(micros).unwrap_or_default()
    }
}

impl Default for IncreasingNonce {
    fn default() -> Self {
        Self::new()
    }
}

impl NonceProvider for IncreasingNonce {
    fn next_nonce(&self) -> u64 {
        let now = Self::current_time_micros();
        let advance = |last: u64| now.max(last.saturating_add(1));

        // The closure never returns None, so this cannot fail.
        match self
            .last_nonce
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| Some(advance(last)))
        {
            Ok(previous) | Err(previous) => advance(previous),
        }
    }
}
