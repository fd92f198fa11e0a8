//! Logging initialization for embedders.
//!
//! Library code logs through the `log` facade. Embedders call [`init`]
//! once at startup to route those records into a tracing subscriber with
//! env-filter support (`RUST_LOG` overrides the default directives).

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global tracing subscriber and the `log` bridge.
/// Idempotent: calling it again (e.g. across tests) is a no-op.
pub fn init(default_directives: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer());

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        // A subscriber is already installed; keep it.
        return;
    }
    if let Err(e) = tracing_log::LogTracer::init() {
        eprintln!("Failed to install log bridge: {}", e);
    }
}
