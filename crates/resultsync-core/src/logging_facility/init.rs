//! Logging initialization module
//!
//! Provides a single initialization point for the logging facility.

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

use crate::config::LogConfig;

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output for development
    Development,
    /// JSON structured output for production
    Production,
    /// Test capture mode for deterministic testing
    Test,
}

static INIT_ONCE: Once = Once::new();

/// Build the filter for `log`, letting `RUST_LOG` override it when set
fn filter_for(log: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log.env_filter_directives()))
}

/// Initialize the logging facility
///
/// This function should be called once at application startup. Later calls
/// are ignored, including their `log` settings.
///
/// # Profiles
///
/// - **Development**: Human-readable logs on stderr
/// - **Production**: JSON structured logs on stderr
/// - **Test**: Bare registry; capture is set up via `init_test_capture()`
///
/// # Example
///
/// ```
/// use resultsync_core::logging_facility::{init, Profile};
/// use resultsync_core::{LogConfig, Verbosity};
///
/// init(Profile::Development, &LogConfig::new(Verbosity::Debug));
/// ```
pub fn init(profile: Profile, log: &LogConfig) {
    INIT_ONCE.call_once(|| {
        let result = match profile {
            Profile::Development => tracing_subscriber::fmt()
                .with_env_filter(filter_for(log))
                .with_writer(std::io::stderr)
                .finish()
                .try_init(),
            Profile::Production => tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter_for(log))
                .with_writer(std::io::stderr)
                .finish()
                .try_init(),
            Profile::Test => tracing_subscriber::registry().try_init(),
        };
        // another subscriber (e.g. test capture) already owns the global slot
        result.ok();
    });
}
