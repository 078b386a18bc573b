//! Classic ledger account addresses (`r...`).
//!
//! An address is the base58 encoding (ripple alphabet) of a version byte
//! (`0x00` for accounts), the 20 byte account ID and a 4 byte checksum which
//! is the prefix of the double SHA-256 of the preceding bytes.

use {
    serde_with::{DeserializeFromStr, SerializeDisplay},
    sha2::{Digest, Sha256},
    std::{fmt, str::FromStr},
    thiserror::Error,
};

const ALPHABET: &[u8; 58] = b"rpshnaf39wBUDNEGHJKLM4PQRST7VWXYZ2bcdeCg65jkm8oFqi1tuvAxyz";
const ACCOUNT_VERSION: u8 = 0x00;
const ACCOUNT_ID_LEN: usize = 20;
const CHECKSUM_LEN: usize = 4;
const MIN_ADDRESS_LEN: usize = 25;
const MAX_ADDRESS_LEN: usize = 35;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("address is empty")]
    Empty,
    #[error("address has length {0}, expected 25 to 35 characters")]
    InvalidLength(usize),
    #[error("character {0:?} is not part of the address alphabet")]
    InvalidCharacter(char),
    #[error("address decodes to {0} bytes, expected 25")]
    InvalidPayloadLength(usize),
    #[error("version byte {0:#04x} does not denote an account")]
    InvalidVersion(u8),
    #[error("checksum mismatch")]
    ChecksumMismatch,
}

/// A validated classic account address.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, SerializeDisplay, DeserializeFromStr)]
pub struct AccountId {
    address: String,
    id: [u8; ACCOUNT_ID_LEN],
}

impl AccountId {
    /// The 20 byte account ID the address encodes.
    pub fn id(&self) -> &[u8; ACCOUNT_ID_LEN] {
        &self.id
    }

    pub fn as_str(&self) -> &str {
        &self.address
    }
}

impl FromStr for AccountId {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(AddressError::Empty);
        }
        if !(MIN_ADDRESS_LEN..=MAX_ADDRESS_LEN).contains(&s.len()) {
            return Err(AddressError::InvalidLength(s.len()));
        }

        let decoded = decode_base58(s)?;
        let [version, rest @ ..] = decoded.as_slice() else {
            return Err(AddressError::InvalidPayloadLength(0));
        };
        if decoded.len() != 1 + ACCOUNT_ID_LEN + CHECKSUM_LEN {
            return Err(AddressError::InvalidPayloadLength(decoded.len()));
        }
        if *version != ACCOUNT_VERSION {
            return Err(AddressError::InvalidVersion(*version));
        }

        let (payload, checksum) = decoded.split_at(1 + ACCOUNT_ID_LEN);
        if checksum != &double_sha256(payload)[..CHECKSUM_LEN] {
            return Err(AddressError::ChecksumMismatch);
        }

        let mut id = [0; ACCOUNT_ID_LEN];
        id.copy_from_slice(&rest[..ACCOUNT_ID_LEN]);
        Ok(Self {
            address: s.to_owned(),
            id,
        })
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccountId").field(&self.address).finish()
    }
}

/// Decodes a base58 string (ripple alphabet) into big-endian bytes. Every
/// leading `r` (the zero digit) becomes a leading zero byte.
fn decode_base58(s: &str) -> Result<Vec<u8>, AddressError> {
    // little-endian accumulator
    let mut bytes: Vec<u8> = Vec::with_capacity(s.len());
    for c in s.chars() {
        let digit = ALPHABET
            .iter()
            .position(|&a| char::from(a) == c)
            .ok_or(AddressError::InvalidCharacter(c))?;
        let mut carry = digit as u32;
        for byte in bytes.iter_mut() {
            carry += u32::from(*byte) * 58;
            *byte = (carry & 0xff) as u8;
            carry >>= 8;
        }
        while carry > 0 {
            bytes.push((carry & 0xff) as u8);
            carry >>= 8;
        }
    }
    let leading_zeros = s.chars().take_while(|&c| c == char::from(ALPHABET[0])).count();
    bytes.extend(std::iter::repeat_n(0, leading_zeros));
    bytes.reverse();
    Ok(bytes)
}

fn double_sha256(bytes: &[u8]) -> [u8; 32] {
    Sha256::digest(Sha256::digest(bytes)).into()
}
