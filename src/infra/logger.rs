// src/infra/logger.rs - Structured logging with tracing

use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber on stderr so stdout stays clean for command
/// output. `RUST_LOG` takes precedence; otherwise `--verbose` selects `debug`
/// for this crate and the default is `warn`.
pub fn init_logging(verbose: bool) {
    let default_directive = if verbose { "warn,mvgen=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
