use {
    crate::{client::LedgerIndex, http_client},
    model::AccountId,
    observe::arguments::LoggingArguments,
    std::fmt::{self, Display, Formatter},
    url::Url,
};

/// Print the account info and the installed hooks of a ledger account
#[derive(clap::Parser, Debug)]
#[command(version)]
pub struct Arguments {
    #[clap(flatten)]
    pub logging: LoggingArguments,

    #[clap(flatten)]
    pub http_client: http_client::Arguments,

    /// JSON-RPC endpoint of the ledger node to query.
    #[clap(long, env, default_value = "https://xahau.network")]
    pub node_url: Url,

    /// Classic address of the account to inspect.
    #[clap(long, env)]
    pub account: AccountId,

    /// Ledger the account info is read from: `validated`, `current`, `closed`
    /// or a ledger sequence number.
    #[clap(long, env, default_value = "validated")]
    pub ledger_index: LedgerIndex,
}

impl Display for Arguments {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let Self {
            logging,
            http_client,
            node_url,
            account,
            ledger_index,
        } = self;

        write!(f, "{logging}")?;
        write!(f, "{http_client}")?;
        writeln!(f, "node_url: {node_url}")?;
        writeln!(f, "account: {account}")?;
        writeln!(f, "ledger_index: {ledger_index}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use {super::*, clap::Parser, std::time::Duration};

    #[test]
    fn defaults() {
        let args = Arguments::try_parse_from([
            "ledger-query",
            "--account",
            "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh",
        ])
        .unwrap();

        assert_eq!(args.node_url.as_str(), "https://xahau.network/");
        assert_eq!(args.account.as_str(), "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh");
        assert_eq!(args.ledger_index, LedgerIndex::Validated);
        assert_eq!(args.http_client.http_timeout, Duration::from_secs(10));
    }

    #[test]
    fn overrides() {
        let args = Arguments::try_parse_from([
            "ledger-query",
            "--account",
            "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh",
            "--node-url",
            "http://127.0.0.1:5005",
            "--ledger-index",
            "8512034",
            "--http-timeout",
            "1500ms",
        ])
        .unwrap();

        assert_eq!(args.node_url.as_str(), "http://127.0.0.1:5005/");
        assert_eq!(args.ledger_index, LedgerIndex::Sequence(8_512_034));
        assert_eq!(args.http_client.http_timeout, Duration::from_millis(1500));

        let display = args.to_string();
        assert!(display.contains("account: rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh"));
        assert!(display.contains("ledger_index: 8512034"));
    }

    #[test]
    fn rejects_invalid_account() {
        assert!(
            Arguments::try_parse_from([
                "ledger-query",
                "--account",
                "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTi",
            ])
            .is_err()
        );
    }
}
