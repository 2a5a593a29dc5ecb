//! Tracing setup for the command-line tool.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install a stderr subscriber.
///
/// `RUST_LOG` wins when set; otherwise `warn`, or `debug` when verbose.
/// Stdout is left alone so JSON and SARIF output stay parseable.
pub fn init(verbose: bool) {
    let fallback = if verbose { "syntax_zaz=debug,info" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(env_filter)
        .try_init();
}
