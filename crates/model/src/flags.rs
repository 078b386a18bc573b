use {
    crate::error::ValidationError,
    serde::{Deserialize, Serialize},
};

/// Transaction flag bitmask.
///
/// `Invoke` transactions define no transaction specific flags, so only the
/// universal flags are accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TxFlags(u32);

impl TxFlags {
    /// Requires a fully canonical signature. Set by every modern client.
    pub const FULLY_CANONICAL_SIG: u32 = 0x8000_0000;
    pub const UNIVERSAL: u32 = Self::FULLY_CANONICAL_SIG;

    pub fn new(flags: u64) -> Result<Self, ValidationError> {
        let flags = u32::try_from(flags).map_err(|_| ValidationError::InvalidFlags(flags))?;
        if flags & !Self::UNIVERSAL != 0 {
            return Err(ValidationError::InvalidFlags(flags.into()));
        }
        Ok(Self(flags))
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn requires_canonical_sig(self) -> bool {
        self.0 & Self::FULLY_CANONICAL_SIG != 0
    }
}

impl Default for TxFlags {
    fn default() -> Self {
        Self(Self::FULLY_CANONICAL_SIG)
    }
}

/// Flags as they appear in hand written documents: either a JSON number or a
/// decimal string.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawFlags {
    Number(u64),
    Text(String),
}

impl TryFrom<RawFlags> for TxFlags {
    type Error = ValidationError;

    fn try_from(raw: RawFlags) -> Result<Self, Self::Error> {
        match raw {
            RawFlags::Number(flags) => Self::new(flags),
            RawFlags::Text(text) => {
                if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(ValidationError::NonNumericFlags(text));
                }
                let flags = text
                    .parse::<u64>()
                    .map_err(|_| ValidationError::NonNumericFlags(text.clone()))?;
                Self::new(flags)
            }
        }
    }
}
