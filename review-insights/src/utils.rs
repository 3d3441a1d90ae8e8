use tracing_subscriber::EnvFilter;

// Logs go to stderr so terminal charts on stdout stay readable.
pub fn init_logging() {
    tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
}
