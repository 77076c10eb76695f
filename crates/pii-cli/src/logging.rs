use tracing_subscriber::EnvFilter;

/// Default filter for a verbosity level; `RUST_LOG` overrides it
pub fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0..=2 => "warn",
        3 => "info",
        _ => "debug",
    }
}

/// Initialize tracing on stderr so stdout stays clean for output
pub fn init(verbosity: u8) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity))),
        )
        .init();
}
