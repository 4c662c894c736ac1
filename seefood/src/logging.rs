use tracing_subscriber::{EnvFilter, fmt};

/// Initialize logging to stderr so stdout carries only command output.
///
/// `RUST_LOG` takes precedence; otherwise `info`, or `debug` when
/// `verbose` is set.
///
/// ```
/// seefood::init_logging(false);
/// ```
pub fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
