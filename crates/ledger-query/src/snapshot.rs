use {
    crate::{
        client::{LedgerClient, LedgerIndex},
        error::Error,
    },
    futures::FutureExt,
    model::AccountId,
    serde_json::Value,
    std::{io::Write, panic::AssertUnwindSafe},
};

/// Account state and hook metadata of one account, as returned by the node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AccountSnapshot {
    pub account_info: Value,
    pub hook_info: Value,
}

impl AccountSnapshot {
    /// The account identifiers echoed back by the node in the account info
    /// and the hook info respectively.
    pub fn echoed_accounts(&self) -> (Option<&str>, Option<&str>) {
        (
            self.account_info
                .pointer("/account_data/Account")
                .and_then(Value::as_str),
            self.hook_info.get("account").and_then(Value::as_str),
        )
    }

    /// Whether both results reference `account`.
    pub fn references(&self, account: &AccountId) -> bool {
        let (info, hooks) = self.echoed_accounts();
        info == Some(account.as_str()) && hooks == Some(account.as_str())
    }
}

/// Connects, queries account info and hook info for `account`, writes both
/// to `out` and disconnects.
///
/// The account info is written as soon as it was received so a failing hook
/// query does not discard it. Once connected, the client is disconnected on
/// every path out of this function, including panics which are resumed
/// afterwards.
pub async fn fetch_account_snapshot<C, W>(
    client: &mut C,
    account: &AccountId,
    ledger_index: &LedgerIndex,
    out: &mut W,
) -> Result<AccountSnapshot, Error>
where
    C: LedgerClient + ?Sized,
    W: Write,
{
    client.connect().await?;

    let result = AssertUnwindSafe(query_and_emit(&*client, account, ledger_index, out))
        .catch_unwind()
        .await;
    client.disconnect().await;

    match result {
        Ok(result) => result,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}

async fn query_and_emit<C, W>(
    client: &C,
    account: &AccountId,
    ledger_index: &LedgerIndex,
    out: &mut W,
) -> Result<AccountSnapshot, Error>
where
    C: LedgerClient + ?Sized,
    W: Write,
{
    let account_info = client.account_info(account, ledger_index).await?;
    emit(out, "Account Info:", &account_info)?;

    let hook_info = client.account_hooks(account).await?;
    writeln!(out)?;
    emit(out, "Hook Info:", &hook_info)?;
    out.flush()?;

    let snapshot = AccountSnapshot {
        account_info,
        hook_info,
    };
    if !snapshot.references(account) {
        let (info, hooks) = snapshot.echoed_accounts();
        tracing::warn!(
            %account,
            account_info = ?info,
            hook_info = ?hooks,
            "node echoed a different account"
        );
    }
    Ok(snapshot)
}

fn emit<W: Write>(out: &mut W, heading: &str, value: &Value) -> std::io::Result<()> {
    writeln!(out, "{heading}")?;
    serde_json::to_writer_pretty(&mut *out, value).map_err(std::io::Error::from)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            client::MockLedgerClient,
            error::{ConnectionError, RemoteQueryError},
        },
        mockall::{Sequence, predicate::eq},
        serde_json::json,
    };

    const ACCOUNT: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";

    fn account() -> AccountId {
        ACCOUNT.parse().unwrap()
    }

    fn account_info() -> Value {
        json!({
            "account_data": {
                "Account": ACCOUNT,
                "Balance": "99999999999",
                "Flags": 0,
                "LedgerEntryType": "AccountRoot",
                "Sequence": 7,
            },
            "ledger_index": 8_512_034,
            "status": "success",
            "validated": true,
        })
    }

    fn hook_info() -> Value {
        json!({
            "account": ACCOUNT,
            "hooks": [{ "Hook": { "HookHash": "ACD3E29170EB82FFF9F31A067566CD15F3A328F873F34A5D9644519C33D55EB7" } }],
            "status": "success",
        })
    }

    fn rejected(command: &'static str) -> Error {
        RemoteQueryError::Rejected {
            command,
            error: "actNotFound".to_owned(),
            code: Some(19),
            message: Some("Account not found.".to_owned()),
        }
        .into()
    }

    #[tokio::test]
    async fn queries_in_order_and_prints_both_results() {
        let mut client = MockLedgerClient::new();
        let mut seq = Sequence::new();
        client
            .expect_connect()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(()));
        client
            .expect_account_info()
            .with(eq(account()), eq(LedgerIndex::Validated))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(account_info()));
        client
            .expect_account_hooks()
            .with(eq(account()))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(hook_info()));
        client
            .expect_disconnect()
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());

        let mut out = Vec::<u8>::new();
        let snapshot =
            fetch_account_snapshot(&mut client, &account(), &LedgerIndex::Validated, &mut out)
                .await
                .unwrap();

        assert!(snapshot.references(&account()));
        assert_eq!(snapshot.echoed_accounts(), (Some(ACCOUNT), Some(ACCOUNT)));
        let expected = format!(
            "Account Info:\n{}\n\nHook Info:\n{}\n",
            serde_json::to_string_pretty(&account_info()).unwrap(),
            serde_json::to_string_pretty(&hook_info()).unwrap(),
        );
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[tokio::test]
    async fn failed_connect_issues_no_queries() {
        let mut client = MockLedgerClient::new();
        client
            .expect_connect()
            .times(1)
            .returning(|| Err(ConnectionError::NotConnected));
        client.expect_account_info().never();
        client.expect_account_hooks().never();
        client.expect_disconnect().never();

        let mut out = Vec::<u8>::new();
        let err = fetch_account_snapshot(&mut client, &account(), &LedgerIndex::Validated, &mut out)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Connection(_)));
        assert_eq!(err.step(), "connection");
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn rejected_account_info_still_disconnects() {
        let mut client = MockLedgerClient::new();
        client.expect_connect().times(1).returning(|| Ok(()));
        client
            .expect_account_info()
            .times(1)
            .returning(|_, _| Err(rejected("account_info")));
        client.expect_account_hooks().never();
        client.expect_disconnect().times(1).return_const(());

        let mut out = Vec::<u8>::new();
        let err = fetch_account_snapshot(&mut client, &account(), &LedgerIndex::Validated, &mut out)
            .await
            .unwrap_err();

        assert_eq!(err.step(), "account_info");
        assert!(err.to_string().contains("actNotFound"));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn failed_hook_query_keeps_account_info() {
        let mut client = MockLedgerClient::new();
        client.expect_connect().times(1).returning(|| Ok(()));
        client
            .expect_account_info()
            .times(1)
            .returning(|_, _| Ok(account_info()));
        client
            .expect_account_hooks()
            .times(1)
            .returning(|_| Err(rejected("account_hooks")));
        client.expect_disconnect().times(1).return_const(());

        let mut out = Vec::<u8>::new();
        let err = fetch_account_snapshot(&mut client, &account(), &LedgerIndex::Validated, &mut out)
            .await
            .unwrap_err();

        assert_eq!(err.step(), "account_hooks");
        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("Account Info:\n"));
        assert!(!out.contains("Hook Info:"));
    }

    struct PanickingWriter;

    impl Write for PanickingWriter {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            panic!("writer exploded");
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn panic_still_disconnects() {
        let mut client = MockLedgerClient::new();
        client.expect_connect().times(1).returning(|| Ok(()));
        client
            .expect_account_info()
            .times(1)
            .returning(|_, _| Ok(account_info()));
        client.expect_account_hooks().never();
        client.expect_disconnect().times(1).return_const(());

        let result = AssertUnwindSafe(fetch_account_snapshot(
            &mut client,
            &account(),
            &LedgerIndex::Validated,
            &mut PanickingWriter,
        ))
        .catch_unwind()
        .await;

        assert!(result.is_err());
        client.checkpoint();
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn output_failure_still_disconnects() {
        let mut client = MockLedgerClient::new();
        client.expect_connect().times(1).returning(|| Ok(()));
        client
            .expect_account_info()
            .times(1)
            .returning(|_, _| Ok(account_info()));
        client.expect_account_hooks().never();
        client.expect_disconnect().times(1).return_const(());

        let err = fetch_account_snapshot(
            &mut client,
            &account(),
            &LedgerIndex::Validated,
            &mut BrokenPipe,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, Error::Output(_)));
        assert_eq!(err.step(), "output");
    }

    #[tokio::test]
    async fn mismatching_echo_is_not_an_error() {
        let mut client = MockLedgerClient::new();
        client.expect_connect().returning(|| Ok(()));
        client
            .expect_account_info()
            .returning(|_, _| Ok(json!({ "account_data": { "Account": "rrrrrrrrrrrrrrrrrrrrBZbvji" } })));
        client
            .expect_account_hooks()
            .returning(|_| Ok(json!({ "status": "success" })));
        client.expect_disconnect().times(1).return_const(());

        let snapshot = fetch_account_snapshot(
            &mut client,
            &account(),
            &LedgerIndex::Validated,
            &mut Vec::<u8>::new(),
        )
        .await
        .unwrap();

        assert!(!snapshot.references(&account()));
        assert_eq!(
            snapshot.echoed_accounts(),
            (Some("rrrrrrrrrrrrrrrrrrrrBZbvji"), None)
        );
    }
}
