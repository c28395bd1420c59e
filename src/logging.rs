use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Initializes the `tracing` logging framework.
///
/// Events go to stderr so that stdout only carries matches. The level defaults
/// to `WARN` and can be changed through the
/// [`RUST_LOG`](tracing_subscriber::filter::EnvFilter) environment variable.
pub fn init() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
