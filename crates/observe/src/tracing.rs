use {
    crate::config::Config,
    std::{io::IsTerminal, sync::Once},
    time::macros::format_description,
    tracing::{Metadata, level_filters::LevelFilter},
    tracing_subscriber::{
        EnvFilter,
        Layer,
        Registry,
        fmt::{MakeWriter, time::UtcTime, writer::MakeWriterExt as _},
        prelude::*,
        util::SubscriberInitExt,
    },
};

/// Initializes tracing setup that is shared between the binaries.
/// `env_filter` has similar syntax to env_logger. It is documented at
/// https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html
pub fn initialize(config: &Config) {
    set_tracing_subscriber(config);
}

/// Like [`initialize`], but can be called multiple times in a row. Later calls
/// are ignored.
///
/// Useful for tests.
pub fn initialize_reentrant(env_filter: &str) {
    // The tracing subscriber below is global object so initializing it again in the
    // same process by a different thread would fail.
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        set_tracing_subscriber(&Config::default().with_env_filter(env_filter));
    });
}

fn set_tracing_subscriber(config: &Config) {
    let timer = UtcTime::new(format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
    ));

    let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> = if config.use_json_format {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(split_writer(config.stderr_threshold))
            .with_timer(timer)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(split_writer(config.stderr_threshold))
            .with_timer(timer)
            .with_ansi(std::io::stderr().is_terminal())
            .boxed()
    };

    // A global subscriber may already be installed, e.g. by a test.
    let result = tracing_subscriber::registry()
        .with(fmt_layer.with_filter(EnvFilter::new(&config.env_filter)))
        .try_init();
    if let Err(err) = result {
        eprintln!("failed to install tracing subscriber: {err}");
    }
}

/// Routes events at or above `stderr_threshold` to stderr and the rest to
/// stdout.
fn split_writer(
    stderr_threshold: LevelFilter,
) -> impl for<'writer> MakeWriter<'writer> + Send + Sync + 'static {
    std::io::stderr
        .with_filter(move |meta: &Metadata<'_>| goes_to_stderr(*meta.level(), stderr_threshold))
        .or_else(std::io::stdout)
}

fn goes_to_stderr(level: tracing::Level, stderr_threshold: LevelFilter) -> bool {
    level <= stderr_threshold
}
