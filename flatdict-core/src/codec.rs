//! CBOR encoding for snapshots and maps.
//!
//! Any serde value works; the functions here only pin the format and turn
//! codec failures into [`CodecError`].

use serde::{de::DeserializeOwned, Serialize};

use crate::error::CodecError;

/// Serializes a value to CBOR bytes.
pub fn to_cbor<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, CodecError> {
    let mut buf = Vec::new();
    ciborium::into_writer(value, &mut buf).map_err(|e| CodecError::Encode(e.to_string()))?;
    Ok(buf)
}

/// Deserializes a value from CBOR bytes.
pub fn from_cbor<T: DeserializeOwned>(data: &[u8]) -> Result<T, CodecError> {
    ciborium::from_reader(data).map_err(|e| CodecError::Decode(e.to_string()))
}
