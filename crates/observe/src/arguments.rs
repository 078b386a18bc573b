//! Logging related command line arguments shared between the binaries.

use {
    ::tracing::level_filters::LevelFilter,
    std::fmt::{self, Display, Formatter},
};

/// Logging arguments with a filter that suits the query tools.
#[derive(clap::Parser, Debug)]
#[group(skip)]
pub struct LoggingArguments {
    #[clap(long, env, default_value = "warn,ledger_query=info,withdrawal_request=info")]
    pub log_filter: String,

    /// Log events at or above this level are written to stderr. The default
    /// keeps all diagnostics off stdout, which only carries query results.
    #[clap(long, env, default_value = "trace")]
    pub log_stderr_threshold: LevelFilter,

    /// Emit log events as JSON objects.
    #[clap(long, env)]
    pub use_json_logs: bool,
}

impl Display for LoggingArguments {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self {
            log_filter,
            log_stderr_threshold,
            use_json_logs,
        } = self;

        writeln!(f, "log_filter: {log_filter}")?;
        writeln!(f, "log_stderr_threshold: {log_stderr_threshold}")?;
        writeln!(f, "use_json_logs: {use_json_logs}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use {super::*, clap::Parser};

    #[test]
    fn defaults_send_everything_to_stderr() {
        let args = LoggingArguments::parse_from(["test"]);
        assert_eq!(args.log_stderr_threshold, LevelFilter::TRACE);
        assert!(!args.use_json_logs);
    }

    #[test]
    fn parses_overrides() {
        let args = LoggingArguments::parse_from([
            "test",
            "--log-filter",
            "debug",
            "--log-stderr-threshold",
            "warn",
            "--use-json-logs",
        ]);
        assert_eq!(args.log_filter, "debug");
        assert_eq!(args.log_stderr_threshold, LevelFilter::WARN);
        assert!(args.use_json_logs);
    }
}
