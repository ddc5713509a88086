use tracing_subscriber::EnvFilter;

/// Installs a console subscriber that also receives `log` records.
///
/// `RUST_LOG` takes precedence over `level`. Safe to call more than once.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_err()
    {
        log::debug!("Logging already initialized");
    }
}
