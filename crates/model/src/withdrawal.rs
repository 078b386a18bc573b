//! Descriptor of an `Invoke` transaction asking the payment hook to pay out
//! funds it holds for a user.
//!
//! The operator account invokes the hook account. The hook reads the
//! operation from the data of the first memo and, for a withdrawal, pays the
//! amount back to the user wallet.

use {
    crate::{
        account::AccountId,
        drops::Drops,
        error::ValidationError,
        flags::{RawFlags, TxFlags},
        memo::{DEFAULT_MEMO_FORMAT, DEFAULT_MEMO_TYPE, Memo, RawMemoWrapper},
    },
    serde::{Deserialize, Deserializer, Serialize, de},
    strum::{AsRefStr, Display, EnumString},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum TransactionType {
    Invoke,
}

/// Operations understood by the payment hook, selected by the memo data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Operation {
    /// A user tops up their balance. Sent as a `Payment`, never as `Invoke`.
    Recharge,
    /// Refund part of a user's balance to the user.
    Withdraw,
    /// Pay the operator out of a user's balance.
    Debit,
}

impl Operation {
    pub fn is_invoke(self) -> bool {
        matches!(self, Self::Withdraw | Self::Debit)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct WithdrawalRequest {
    pub transaction_type: TransactionType,
    /// Operator account sending the transaction.
    pub account: AccountId,
    /// Hook account.
    pub destination: AccountId,
    pub amount: Drops,
    pub fee: Drops,
    pub flags: TxFlags,
    pub memos: Vec<Memo>,
    pub destination_tag: u32,
    /// Wallet of the end user that ultimately receives the funds.
    pub user_wallet: AccountId,
}

const MIN_AMOUNT: u64 = 1;
const MIN_FEE: u64 = 0;

/// Builds a withdrawal request with canonical signature flags and a single
/// `withdraw` memo.
pub fn build_withdrawal_request(
    operator: &str,
    hook_account: &str,
    user_wallet: &str,
    amount: &str,
    fee: &str,
    destination_tag: u32,
) -> Result<WithdrawalRequest, ValidationError> {
    Ok(WithdrawalRequest {
        transaction_type: TransactionType::Invoke,
        account: parse_account("Account", operator)?,
        destination: parse_account("Destination", hook_account)?,
        amount: Drops::parse_field("Amount", amount, MIN_AMOUNT)?,
        fee: Drops::parse_field("Fee", fee, MIN_FEE)?,
        flags: TxFlags::default(),
        memos: vec![operation_memo(Operation::Withdraw)],
        destination_tag,
        user_wallet: parse_account("UserWallet", user_wallet)?,
    })
}

fn parse_account(field: &'static str, value: &str) -> Result<AccountId, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    value
        .parse()
        .map_err(|reason| ValidationError::InvalidAddress {
            field,
            value: value.to_owned(),
            reason,
        })
}

fn operation_memo(operation: Operation) -> Memo {
    Memo::from_text(operation.as_ref(), DEFAULT_MEMO_TYPE, DEFAULT_MEMO_FORMAT)
}

impl WithdrawalRequest {
    pub fn with_flags(mut self, flags: u64) -> Result<Self, ValidationError> {
        self.flags = TxFlags::new(flags)?;
        Ok(self)
    }

    /// Replaces the memos with a single memo requesting `operation`.
    pub fn with_operation(mut self, operation: Operation) -> Result<Self, ValidationError> {
        if !operation.is_invoke() {
            return Err(ValidationError::UnsupportedOperation(operation));
        }
        self.memos = vec![operation_memo(operation)];
        Ok(self)
    }

    /// The operation the hook will execute, read from the first memo.
    pub fn operation(&self) -> Option<Operation> {
        let memo = self.memos.first()?;
        std::str::from_utf8(&memo.data).ok()?.parse().ok()
    }

    /// Parses a descriptor document, rejecting anything that does not match
    /// the schema exactly.
    pub fn from_json(document: &str) -> Result<Self, ValidationError> {
        let raw: RawWithdrawalRequest = serde_json::from_str(document)
            .map_err(|err| ValidationError::Malformed(err.to_string()))?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawWithdrawalRequest) -> Result<Self, ValidationError> {
        let transaction_type = raw
            .transaction_type
            .ok_or(ValidationError::MissingField("TransactionType"))?;
        if transaction_type != "Invoke" {
            return Err(ValidationError::UnsupportedTransactionType(
                transaction_type,
            ));
        }

        let required = |field: &'static str, value: Option<String>| {
            value.ok_or(ValidationError::MissingField(field))
        };
        let request = build_withdrawal_request(
            &required("Account", raw.account)?,
            &required("Destination", raw.destination)?,
            &required("UserWallet", raw.user_wallet)?,
            &required("Amount", raw.amount)?,
            &required("Fee", raw.fee)?,
            raw.destination_tag
                .ok_or(ValidationError::MissingField("DestinationTag"))?,
        )?;

        let flags = raw.flags.ok_or(ValidationError::MissingField("Flags"))?;
        let memos = raw
            .memos
            .ok_or(ValidationError::MissingField("Memos"))?
            .into_iter()
            .map(Memo::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let request = WithdrawalRequest {
            flags: TxFlags::try_from(flags)?,
            memos,
            ..request
        };
        request.validate_operation()?;
        Ok(request)
    }

    fn validate_operation(&self) -> Result<(), ValidationError> {
        let memo = self.memos.first().ok_or(ValidationError::MissingMemo)?;
        let operation = self.operation().ok_or_else(|| {
            ValidationError::UnknownOperation(memo.to_text().data)
        })?;
        if !operation.is_invoke() {
            return Err(ValidationError::UnsupportedOperation(operation));
        }
        Ok(())
    }
}

impl<'de> Deserialize<'de> for WithdrawalRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawWithdrawalRequest::deserialize(deserializer)?;
        Self::from_raw(raw).map_err(de::Error::custom)
    }
}

/// Document shape before validation. Every field is optional so that a
/// missing field is reported by name rather than as a generic parse error.
#[derive(Deserialize)]
#[serde(deny_unknown_fields, rename_all = "PascalCase")]
struct RawWithdrawalRequest {
    transaction_type: Option<String>,
    account: Option<String>,
    destination: Option<String>,
    amount: Option<String>,
    fee: Option<String>,
    flags: Option<RawFlags>,
    memos: Option<Vec<RawMemoWrapper>>,
    destination_tag: Option<u32>,
    user_wallet: Option<String>,
}
