use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming an optional log file.
pub const LOG_FILE_ENV: &str = "REMOTE_UI_LOG";

/// Initialize tracing.
///
/// The filter comes from `RUST_LOG` and defaults to `info`. Output goes to
/// stderr with RFC 3339 UTC timestamps. When `REMOTE_UI_LOG` names a file,
/// events are written there instead, one file per process:
/// `{path}.{pid}`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Ok(log_path) = std::env::var(LOG_FILE_ENV) {
        let unique_path = format!("{}.{}", log_path, std::process::id());
        match std::fs::File::create(&unique_path) {
            Ok(file) => {
                let file_layer = fmt::layer()
                    .with_writer(file)
                    .with_ansi(false)
                    .with_target(true)
                    .with_level(true)
                    .with_timer(fmt::time::UtcTime::rfc_3339());
                tracing_subscriber::registry()
                    .with(filter)
                    .with(file_layer)
                    .init();
                return;
            }
            Err(err) => {
                eprintln!("Warning: Failed to create log file {}: {}", unique_path, err);
            }
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();
}
