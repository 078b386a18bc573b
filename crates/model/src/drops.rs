//! Native currency amounts in drops (1 XAH = 1 000 000 drops), encoded on the
//! wire as decimal strings.

use {
    crate::error::ValidationError,
    serde::{Serialize, Serializer},
    std::fmt,
};

pub const DROPS_PER_XAH: u64 = 1_000_000;

/// Upper bound of any native amount: the initial supply of 100 billion XAH.
pub const MAX_DROPS: u64 = 100_000_000_000 * DROPS_PER_XAH;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Drops(u64);

impl Drops {
    pub const ZERO: Self = Self(0);

    pub fn new(drops: u64) -> Option<Self> {
        (drops <= MAX_DROPS).then_some(Self(drops))
    }

    pub fn get(self) -> u64 {
        self.0
    }

    /// Parses a decimal string of drops for the given field. Only plain ASCII
    /// digits without leading zeros are accepted: no sign, no decimal point,
    /// no whitespace, no exponent.
    pub fn parse_field(
        field: &'static str,
        value: &str,
        min: u64,
    ) -> Result<Self, ValidationError> {
        let canonical = !(value.len() > 1 && value.starts_with('0'));
        if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) || !canonical {
            return Err(ValidationError::NonNumericAmount {
                field,
                value: value.to_owned(),
            });
        }
        let out_of_range = || ValidationError::AmountOutOfRange {
            field,
            value: value.to_owned(),
            min,
            max: MAX_DROPS,
        };
        // only digits remain, so parsing can only fail by overflowing
        let drops = value.parse::<u64>().map_err(|_| out_of_range())?;
        if drops < min {
            return Err(out_of_range());
        }
        Self::new(drops).ok_or_else(out_of_range)
    }
}

impl fmt::Display for Drops {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Drops {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

/// Formats an amount of drops as XAH with all six decimals.
pub fn format_xah(amount: Drops) -> String {
    format!(
        "{}.{:06}",
        amount.0 / DROPS_PER_XAH,
        amount.0 % DROPS_PER_XAH
    )
}
