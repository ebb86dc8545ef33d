use std::path::PathBuf;
use tracing::Subscriber;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Builds the clock's subscriber without installing it. The level is `info`
/// unless `debug` is set, in which case it is `debug` and the `RUST_LOG`
/// environment variable may override it.
///
/// With `log_file` the output goes to that file (no ANSI colors), otherwise
/// to stderr.
pub fn build_subscriber(
    debug: bool,
    log_file: Option<PathBuf>,
) -> impl Subscriber + Send + Sync + 'static {
    let level = if debug { "debug" } else { "info" };
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        EnvFilter::new(level)
    };

    let file_target = log_file.and_then(|path| {
        let file_name = path.file_name()?.to_owned();
        let dir = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        Some((dir, file_name))
    });

    let (writer, ansi) = match file_target {
        Some((dir, file_name)) => (
            BoxMakeWriter::new(tracing_appender::rolling::never(dir, file_name)),
            false,
        ),
        None => (BoxMakeWriter::new(std::io::stderr), true),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(ansi)
        .with_writer(writer)
        .finish()
}

/// Installs [`build_subscriber`] globally. Calling this again after a
/// subscriber is installed is a no-op.
pub fn init(debug: bool, log_file: Option<PathBuf>) {
    let _ = build_subscriber(debug, log_file).try_init();
}
