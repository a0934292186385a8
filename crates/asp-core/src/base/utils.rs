//! Utility functions for core primitive types.

use serde::Deserialize as _;

/// A `serde_as` adapter for `0x`-prefixed hex byte arrays.
///
/// Serializes with the `0x` prefix. Deserializing accepts the value with or
/// without the prefix, which is how event producers emit hashes and addresses.
pub struct PrefixedHex;

impl<const N: usize> serde_with::SerializeAs<[u8; N]> for PrefixedHex {
    fn serialize_as<S>(value: &[u8; N], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&format!("0x{}", hex::encode(value)))
    }
}

impl<'de, const N: usize> serde_with::DeserializeAs<'de, [u8; N]> for PrefixedHex {
    fn deserialize_as<D>(deserializer: D) -> Result<[u8; N], D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        let mut out = [0_u8; N];
        hex::decode_to_slice(strip_hex_prefix(&encoded), &mut out)
            .map_err(serde::de::Error::custom)?;
        Ok(out)
    }
}

fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Decode a hex string that may carry a `0x` prefix.
///
/// # Errors
/// Returns an error if the remaining characters are not valid hex.
pub fn decode_prefixed_hex(s: &str) -> Result<Vec<u8>, hex::FromHexError> {
    hex::decode(strip_hex_prefix(s.trim()))
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use serde_with::serde_as;

    use super::*;

    #[serde_as]
    #[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
    struct Wrapper {
        #[serde_as(as = "PrefixedHex")]
        value: [u8; 4],
    }

    #[test]
    fn prefixed_hex_roundtrip() {
        let wrapper = Wrapper {
            value: [0xde, 0xad, 0xbe, 0xef],
        };
        let json = serde_json::to_string(&wrapper).expect("serialize");
        assert_eq!(json, r#"{"value":"0xdeadbeef"}"#);

        let decoded: Wrapper = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(decoded, wrapper);

        let unprefixed: Wrapper =
            serde_json::from_str(r#"{"value":"deadbeef"}"#).expect("deserialize unprefixed");
        assert_eq!(unprefixed, wrapper);
    }

    #[test]
    fn prefixed_hex_rejects_wrong_length() {
        let result: Result<Wrapper, _> = serde_json::from_str(r#"{"value":"0xdead"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn decode_prefixed_hex_strips_prefix() {
        assert_eq!(decode_prefixed_hex("0x0102"), Ok(vec![1_u8, 2_u8]));
        assert_eq!(decode_prefixed_hex(" 0102\n"), Ok(vec![1_u8, 2_u8]));
        assert!(decode_prefixed_hex("0xzz").is_err());
    }
}
