use {
    clap::{Parser, Subcommand},
    model::Operation,
    observe::arguments::LoggingArguments,
    std::{
        fmt::{self, Display, Formatter},
        path::PathBuf,
    },
};

/// Build, check and print withdrawal requests for the payment hook
#[derive(Parser, Debug)]
#[command(version)]
pub struct Arguments {
    #[clap(flatten)]
    pub logging: LoggingArguments,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a validated request built from the given fields as JSON.
    Build(BuildArguments),
    /// Strictly validate a request document and summarize it.
    Validate {
        /// Path to the JSON document.
        file: PathBuf,
    },
    /// Print the request template with placeholder addresses.
    Template,
}

#[derive(clap::Args, Debug)]
pub struct BuildArguments {
    /// Operator account sending the `Invoke`.
    #[clap(long, env)]
    pub operator: String,

    /// Account the payment hook is installed on.
    #[clap(long, env)]
    pub hook_account: String,

    /// Wallet of the user that receives the funds.
    #[clap(long, env)]
    pub user_wallet: String,

    /// Amount in drops.
    #[clap(long)]
    pub amount: String,

    /// Transaction fee in drops.
    #[clap(long, default_value = "12")]
    pub fee: String,

    #[clap(long, default_value = "0")]
    pub destination_tag: u32,

    /// Transaction flags. Defaults to requiring a fully canonical signature.
    #[clap(long)]
    pub flags: Option<u64>,

    /// Operation written to the memo: `withdraw` or `debit`.
    #[clap(long, default_value = "withdraw")]
    pub operation: Operation,
}

impl Display for Arguments {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let Self { logging, command } = self;

        write!(f, "{logging}")?;
        match command {
            Command::Build(args) => write!(f, "command: build\n{args}"),
            Command::Validate { file } => {
                writeln!(f, "command: validate\nfile: {}", file.display())
            }
            Command::Template => writeln!(f, "command: template"),
        }
    }
}

impl Display for BuildArguments {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let Self {
            operator,
            hook_account,
            user_wallet,
            amount,
            fee,
            destination_tag,
            flags,
            operation,
        } = self;

        writeln!(f, "operator: {operator}")?;
        writeln!(f, "hook_account: {hook_account}")?;
        writeln!(f, "user_wallet: {user_wallet}")?;
        writeln!(f, "amount: {amount}")?;
        writeln!(f, "fee: {fee}")?;
        writeln!(f, "destination_tag: {destination_tag}")?;
        writeln!(f, "flags: {flags:?}")?;
        writeln!(f, "operation: {operation}")?;
        Ok(())
    }
}
