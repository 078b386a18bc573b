use std::process::ExitCode;

fn main() -> ExitCode {
    withdrawal_request::start(std::env::args())
}
