pub mod arguments;
pub mod summary;

use {
    crate::{
        arguments::{Arguments, BuildArguments, Command},
        summary::Summary,
    },
    anyhow::{Context, Result},
    clap::Parser,
    model::{WithdrawalRequest, build_withdrawal_request},
    std::{fs, io::Write, path::Path, process::ExitCode},
};

/// Request document with placeholder addresses that has to be filled in
/// before it passes validation.
pub const TEMPLATE: &str = include_str!("../templates/withdraw-request.json");

pub fn start(args: impl Iterator<Item = String>) -> ExitCode {
    let args = Arguments::parse_from(args);
    observe::tracing::initialize(&observe::Config::from(&args.logging));
    observe::panic_hook::install();
    tracing::debug!("running withdrawal-request with validated arguments:\n{args}");

    match run(&args.command, &mut std::io::stdout()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

pub fn run<W: Write>(command: &Command, out: &mut W) -> Result<()> {
    match command {
        Command::Build(args) => {
            let request = build(args)?;
            serde_json::to_writer_pretty(&mut *out, &request)?;
            writeln!(out)?;
        }
        Command::Validate { file } => {
            let request = validate(file)?;
            tracing::info!(file = %file.display(), "withdrawal request is valid");
            write!(out, "{}", Summary(&request))?;
        }
        Command::Template => out.write_all(TEMPLATE.as_bytes())?,
    }
    out.flush()?;
    Ok(())
}

fn build(args: &BuildArguments) -> Result<WithdrawalRequest> {
    let request = build_withdrawal_request(
        &args.operator,
        &args.hook_account,
        &args.user_wallet,
        &args.amount,
        &args.fee,
        args.destination_tag,
    )?;
    let request = match args.flags {
        Some(flags) => request.with_flags(flags)?,
        None => request,
    };
    Ok(request.with_operation(args.operation)?)
}

fn validate(file: &Path) -> Result<WithdrawalRequest> {
    let document = fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    WithdrawalRequest::from_json(&document)
        .with_context(|| format!("{} is not a valid withdrawal request", file.display()))
}
