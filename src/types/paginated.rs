//! Deserializer for Kraken's pair-keyed pagination format.
//!
//! Market data endpoints such as OHLC, Trades and Spread return the data under
//! the pair name plus a `last` cursor for the next request:
//!
//! ```json
//! {
//!     "XXBTZUSD": [[...entry...]],
//!     "last": "1234567890"
//! }
//! ```

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};

/// Pair-keyed data together with the `last` pagination cursor.
///
/// `last` is kept as a string because Kraken sends it as a string for trades
/// and as a number for OHLC and spreads; pass it back unchanged as `since`.
///
/// # Example
///
/// ```rust
/// use kraken_rest_client::types::Paginated;
///
/// let json = r#"{"XXBTZUSD": [1, 2, 3], "last": 1700000000}"#;
/// let page: Paginated<Vec<i64>> = serde_json::from_str(json).unwrap();
///
/// assert_eq!(page.last, "1700000000");
/// assert_eq!(page.pair("XXBTZUSD"), Some(&vec![1, 2, 3]));
/// ```
#[derive(Debug, Clone)]
pub struct Paginated<T> {
    /// Data keyed by the pair name Kraken used in the response.
    pub data: HashMap<String, T>,
    /// Cursor to pass as `since` to fetch the next page.
    pub last: String,
}

impl<T> Paginated<T> {
    /// Data for a single pair.
    pub fn pair(&self, name: &str) -> Option<&T> {
        self.data.get(name)
    }

    /// The cursor parsed as an integer, when it is numeric.
    pub fn last_as_i64(&self) -> Option<i64> {
        self.last.parse().ok()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Paginated<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PaginatedVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for PaginatedVisitor<T> {
            type Value = Paginated<T>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map with a 'last' key and pair-keyed data")
            }

            fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut last: Option<String> = None;
                let mut data = HashMap::new();

                while let Some(key) = map.next_key::<String>()? {
                    if key == "last" {
                        let value: serde_json::Value = map.next_value()?;
                        last = Some(match value {
                            serde_json::Value::String(s) => s,
                            serde_json::Value::Number(n) => n.to_string(),
                            _ => {
                                return Err(de::Error::custom(
                                    "expected string or number for 'last'",
                                ));
                            }
                        });
                    } else {
                        data.insert(key, map.next_value()?);
                    }
                }

                let last = last.ok_or_else(|| de::Error::missing_field("last"))?;
                Ok(Paginated { data, last })
            }
        }

        deserializer.deserialize_map(PaginatedVisitor(PhantomData))
    }
}
