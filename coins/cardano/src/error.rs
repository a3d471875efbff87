use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CardanoError {
    #[error("Invalid bech32 encoding: {0}")]
    InvalidEncoding(String),

    #[error("Payload too long: {words} words exceeds limit of {limit}")]
    PayloadTooLong { words: usize, limit: usize },

    #[error("Malformed address: {0}")]
    MalformedAddress(String),

    #[error("Invalid integer quantity: {0}")]
    IntegerParse(String),

    #[error("Invalid asset unit: {0}")]
    InvalidAssetUnit(String),

    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    #[error("Invalid transaction hash: {0}")]
    InvalidTxHash(String),

    #[error("CBOR encoding error: {0}")]
    Cbor(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, CardanoError>;

impl From<hex::FromHexError> for CardanoError {
    fn from(err: hex::FromHexError) -> Self {
        CardanoError::InvalidHex(err.to_string())
    }
}

impl From<serde_json::Error> for CardanoError {
    fn from(err: serde_json::Error) -> Self {
        CardanoError::Serialization(err.to_string())
    }
}

impl<E: std::fmt::Display> From<minicbor::encode::Error<E>> for CardanoError {
    fn from(err: minicbor::encode::Error<E>) -> Self {
        CardanoError::Cbor(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_too_long_display() {
        let err = CardanoError::PayloadTooLong { words: 1200, limit: 999 };
        assert!(err.to_string().contains("1200"));
        assert!(err.to_string().contains("999"));
    }

    #[test]
    fn test_from_hex_error() {
        let err: CardanoError = hex::decode("zz").unwrap_err().into();
        assert!(matches!(err, CardanoError::InvalidHex(_)));
    }
}
