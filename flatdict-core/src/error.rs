/// Error type for map and snapshot operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    /// The key and value sequences of a snapshot differ in length.
    #[error("snapshot has {keys} keys but {values} values")]
    LengthMismatch { keys: usize, values: usize },
    /// A strict insert found the key already present.
    #[error("key already present")]
    DuplicateKey,
    #[error("key not found")]
    KeyNotFound,
}

/// Error type for CBOR encoding and decoding.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("CBOR encode failed: {0}")]
    Encode(String),
    #[error("CBOR decode failed: {0}")]
    Decode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_mismatch_message() {
        let err = MapError::LengthMismatch { keys: 2, values: 1 };
        assert_eq!(err.to_string(), "snapshot has 2 keys but 1 values");
    }

    #[test]
    fn codec_error_message() {
        let err = CodecError::Decode("unexpected end of input".to_string());
        assert!(err.to_string().starts_with("CBOR decode failed"));
    }
}
