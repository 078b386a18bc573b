use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    ledger_query::start(std::env::args()).await
}
