//! Desktop platform implementation.

use std::time::Duration;

use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

use crate::error::PlatformError;
use crate::formatter::CustomFormatter;

/// Sleeps out the rest of a frame. Spinning is only worth it while the window has focus.
pub fn sleep(duration: Duration, focused: bool) {
    if focused {
        spin_sleep::sleep(duration);
    } else {
        std::thread::sleep(duration);
    }
}

/// Installs the global subscriber. `RUST_LOG` takes precedence over `verbose`.
pub fn init_logging(verbose: bool) -> Result<(), PlatformError> {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(CustomFormatter)
                .with_writer(std::io::stderr),
        )
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(subscriber).map_err(|e| PlatformError::LoggingInit(e.to_string()))
}

/// A fresh seed for runs that were not given one.
pub fn random_seed() -> u64 {
    rand::random()
}
