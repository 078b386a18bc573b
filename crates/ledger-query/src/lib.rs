//! Read-only inspection of a ledger account: its account info and the hooks
//! installed on it.

pub mod arguments;
pub mod client;
pub mod error;
pub mod http_client;
pub mod rpc;
pub mod snapshot;
#[cfg(test)]
mod tests;

use {
    crate::{
        arguments::Arguments,
        client::{HttpLedgerClient, LedgerClient},
        error::Error,
        http_client::HttpClientFactory,
        snapshot::AccountSnapshot,
    },
    clap::Parser,
    std::{io::Write, process::ExitCode},
};

pub use self::{
    client::LedgerIndex,
    error::{ConnectionError, RemoteQueryError},
    snapshot::fetch_account_snapshot,
};

/// Parses `args`, sets up logging and prints the snapshot of the configured
/// account to stdout.
pub async fn start(args: impl Iterator<Item = String>) -> ExitCode {
    let args = Arguments::parse_from(args);
    observe::tracing::initialize(&observe::Config::from(&args.logging));
    observe::panic_hook::install();
    tracing::info!("running ledger-query with validated arguments:\n{args}");

    let mut client = HttpLedgerClient::new(
        HttpClientFactory::new(&args.http_client),
        args.node_url.clone(),
    );
    let result = run(&mut client, &args, &mut std::io::stdout()).await;
    ExitCode::from(exit_code(&result))
}

/// Runs a single query flow against `client` and logs its outcome.
pub async fn run<C, W>(
    client: &mut C,
    args: &Arguments,
    out: &mut W,
) -> Result<AccountSnapshot, Error>
where
    C: LedgerClient + ?Sized,
    W: Write,
{
    let result = fetch_account_snapshot(client, &args.account, &args.ledger_index, out).await;
    match &result {
        Ok(_) => tracing::info!(account = %args.account, "fetched account snapshot"),
        Err(err) => tracing::error!(
            account = %args.account,
            node_url = %args.node_url,
            step = err.step(),
            %err,
            "failed to fetch account snapshot"
        ),
    }
    result
}

/// Process exit status for the outcome of [`run`].
pub fn exit_code<T>(result: &Result<T, Error>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}
