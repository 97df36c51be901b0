//! JSON codec helpers.
//!
//! Thin wrappers around `serde_json` so every payload on the wire goes
//! through one place and maps failures onto [`NetError`].

use serde::{Deserialize, Serialize};

use crate::error::NetError;

/// Encode a value to JSON bytes.
///
/// # Errors
///
/// Returns [`NetError::Encode`] if serialisation fails.
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, NetError> {
    serde_json::to_vec(value).map_err(NetError::Encode)
}

/// Decode a value from JSON bytes.
///
/// # Errors
///
/// Returns [`NetError::Decode`] if deserialisation fails.
pub fn decode<'a, T: Deserialize<'a>>(bytes: &'a [u8]) -> Result<T, NetError> {
    serde_json::from_slice(bytes).map_err(NetError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::NearbyRequest;

    #[test]
    fn test_decode_request() {
        let req: NearbyRequest = decode(
            br#"{"vehicle_id":"67e55044-10b1-426f-9247-bb680e5fe0c8","radius":250.0}"#,
        )
        .unwrap();
        assert_eq!(req.radius, 250.0);
    }

    #[test]
    fn test_decode_missing_field() {
        let result: Result<NearbyRequest, _> =
            decode(br#"{"vehicle_id":"67e55044-10b1-426f-9247-bb680e5fe0c8"}"#);
        assert!(matches!(result, Err(NetError::Decode(_))));
    }

    #[test]
    fn test_decode_invalid_bytes() {
        let result: Result<NearbyRequest, _> = decode(&[0xFF, 0xFF]);
        assert!(result.is_err());
    }

    #[test]
    fn test_encode_is_json() {
        let bytes = encode(&serde_json::json!({"a": 1})).unwrap();
        assert_eq!(bytes, br#"{"a":1}"#);
    }
}
