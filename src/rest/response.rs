//! Decoding of Kraken's `{"error": [...], "result": ...}` response envelope.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{ApiError, KrakenError};

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    error: Vec<String>,
    #[serde(default)]
    result: Option<serde_json::Value>,
}

/// Decode a response body into the result type `T`.
///
/// The envelope is read first so that an error array is reported as
/// [`KrakenError::Api`] even when the accompanying `result` would not match
/// `T`. Kraken answers most failures with HTTP 200, so this is where they
/// surface.
///
/// ```rust
/// use kraken_rest_client::rest::decode_response;
/// use kraken_rest_client::KrakenError;
///
/// let ok: u64 = decode_response(r#"{"error":[],"result":7}"#).unwrap();
/// assert_eq!(ok, 7);
///
/// let err = decode_response::<u64>(r#"{"error":["EAPI:Invalid key"]}"#).unwrap_err();
/// assert!(matches!(err, KrakenError::Api(e) if e.is_invalid_key()));
/// ```
pub fn decode_response<T>(body: &str) -> Result<T, KrakenError>
where
    T: DeserializeOwned,
{
    let envelope: Envelope = serde_json::from_str(body)?;

    if let Some(api_error) = ApiError::from_error_array(&envelope.error) {
        return Err(KrakenError::Api(api_error));
    }

    match envelope.result {
        Some(result) => Ok(serde_json::from_value(result)?),
        None => Err(KrakenError::InvalidResponse(
            "Response missing 'result' field".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Debug, Deserialize)]
    struct Time {
        unixtime: i64,
    }

    #[test]
    fn test_decodes_result() {
        let time: Time =
            decode_response(r#"{"error":[],"result":{"unixtime":1700000000,"rfc1123":"x"}}"#).unwrap();
        assert_eq!(time.unixtime, 1_700_000_000);
    }

    #[test]
    fn test_error_wins_over_mismatched_result() {
        let err = decode_response::<Time>(r#"{"error":["EGeneral:Permission denied"],"result":{}}"#)
            .unwrap_err();
        match err {
            KrakenError::Api(api) => assert!(api.is_permission_denied()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_result() {
        let err = decode_response::<Time>(r#"{"error":[]}"#).unwrap_err();
        assert!(matches!(err, KrakenError::InvalidResponse(_)));

        let err = decode_response::<Time>(r#"{"error":[],"result":null}"#).unwrap_err();
        assert!(matches!(err, KrakenError::InvalidResponse(_)));
    }

    #[test]
    fn test_shape_mismatch_is_decode_failure() {
        let err = decode_response::<Time>(r#"{"error":[],"result":{"unixtime":"soon"}}"#).unwrap_err();
        assert!(matches!(err, KrakenError::Decode(_)));

        let err = decode_response::<Time>("<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, KrakenError::Decode(_)));
    }

    #[test]
    fn test_balances_keep_precision() {
        let balances: HashMap<String, rust_decimal::Decimal> =
            decode_response(r#"{"error":[],"result":{"XXBT":"0.1234567890","ZUSD":"100.00"}}"#).unwrap();
        assert_eq!(balances["XXBT"].to_string(), "0.1234567890");
        assert_eq!(balances["ZUSD"].to_string(), "100.00");
    }
}
