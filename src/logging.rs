use tracing_subscriber::EnvFilter;

/// Filter for the configured directives. `RUST_LOG` is only consulted when
/// `filter` does not parse, and `info` is the last resort.
pub fn build_filter(filter: &str) -> EnvFilter {
    EnvFilter::try_new(filter)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global fmt subscriber; a second call is a no-op.
pub fn init(filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(filter))
        .with_target(false)
        .try_init();
}
