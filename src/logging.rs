use tracing_subscriber::EnvFilter;

/// Initialize structured logging to stderr, filtered by `RUST_LOG`.
/// Stderr keeps log lines out of the result table printed on stdout.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(default_env_filter())
        .with_writer(std::io::stderr)
        .init();
}

/// Per-URL failure causes are logged at debug level, so the fallback filter
/// keeps them visible when `RUST_LOG` is unset.
fn default_env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("imgfetch=debug"))
}
