//! Plain bytes-to-hex mapping used for memo fields.
//!
//! Encoding always produces lowercase digits without a `0x` prefix. Decoding
//! accepts either case but rejects prefixes, odd lengths and non-hex
//! characters.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum HexError {
    #[error("unexpected 0x prefix")]
    Prefixed,
    #[error(transparent)]
    Invalid(#[from] const_hex::FromHexError),
    #[error("decoded bytes are not valid UTF-8")]
    NotUtf8,
}

/// Hex encodes the UTF-8 bytes of `text`.
pub fn encode(text: &str) -> String {
    encode_bytes(text.as_bytes())
}

pub fn encode_bytes(bytes: &[u8]) -> String {
    const_hex::encode(bytes)
}

/// Inverse of [`encode`].
pub fn decode(hex: &str) -> Result<String, HexError> {
    String::from_utf8(decode_bytes(hex)?).map_err(|_| HexError::NotUtf8)
}

pub fn decode_bytes(hex: &str) -> Result<Vec<u8>, HexError> {
    if hex.starts_with("0x") || hex.starts_with("0X") {
        return Err(HexError::Prefixed);
    }
    Ok(const_hex::decode(hex)?)
}
