use {
    crate::{account::AddressError, withdrawal::Operation},
    thiserror::Error,
};

/// Reasons a withdrawal request descriptor is rejected. Field names are the
/// ledger's JSON field names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required field {0}")]
    MissingField(&'static str),
    #[error("{field} is not a valid account address ({value:?}): {reason}")]
    InvalidAddress {
        field: &'static str,
        value: String,
        reason: AddressError,
    },
    #[error("{field} must be a decimal string of drops, got {value:?}")]
    NonNumericAmount { field: &'static str, value: String },
    #[error("{field} {value} is outside of the allowed range {min}..={max} drops")]
    AmountOutOfRange {
        field: &'static str,
        value: String,
        min: u64,
        max: u64,
    },
    #[error("Flags must be an unsigned 32 bit integer, got {0:?}")]
    NonNumericFlags(String),
    #[error("Flags {0:#x} contain bits outside of the universal flag set")]
    InvalidFlags(u64),
    #[error("{field} is not a valid hex string ({value:?}): {reason}")]
    InvalidHex {
        field: &'static str,
        value: String,
        reason: String,
    },
    #[error("unsupported TransactionType {0:?}, expected \"Invoke\"")]
    UnsupportedTransactionType(String),
    #[error("at least one memo is required")]
    MissingMemo,
    #[error("memo data {0:?} does not name a hook operation")]
    UnknownOperation(String),
    #[error("operation {0} cannot be requested through an Invoke transaction")]
    UnsupportedOperation(Operation),
    #[error("malformed withdrawal request: {0}")]
    Malformed(String),
}
