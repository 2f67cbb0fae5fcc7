use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global JSON subscriber.
///
/// `RUST_LOG` wins over `default_directives`. Calling this twice (e.g. from
/// several integration tests in one binary) is harmless: the second
/// installation is ignored.
pub fn init_tracing(service_name: &str, default_directives: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directives));

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_file(true)
                .with_line_number(true)
                .json()
                .flatten_event(true),
        )
        .try_init();

    if installed.is_ok() {
        tracing::info!(service = %service_name, "Tracing initialized");
    }
}
