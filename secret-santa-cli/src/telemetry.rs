use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const DEFAULT_LOG_LEVEL: &str = "secret_santa=info,secret_santa_pairing=info";

/// Logs go to stderr so stdout stays usable for the pairing itself.
pub fn setup_telemetry(verbose: bool) {
    let default_level = if verbose {
        "secret_santa=debug,secret_santa_pairing=debug"
    } else {
        DEFAULT_LOG_LEVEL
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
