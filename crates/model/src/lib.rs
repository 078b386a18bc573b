//! Contains the models shared by the ledger tools: account addresses, drop
//! amounts, transaction flags, memos and the withdrawal request descriptor.

pub mod account;
pub mod drops;
pub mod error;
pub mod flags;
pub mod hex;
pub mod memo;
pub mod withdrawal;

pub use {
    account::AccountId,
    drops::Drops,
    error::ValidationError,
    flags::TxFlags,
    memo::Memo,
    withdrawal::{Operation, TransactionType, WithdrawalRequest, build_withdrawal_request},
};
