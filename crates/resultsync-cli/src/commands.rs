pub mod diff;
pub mod sync;

use std::path::Path;

use resultsync_core::logging_facility::{init, Profile};
use resultsync_core::{ControllerConfig, LogConfig, Verbosity};

/// Load `--config` if given, otherwise defaults, and start logging with it
pub fn load_config(path: Option<&Path>) -> Result<ControllerConfig, Box<dyn std::error::Error>> {
    let config = match path {
        Some(path) => ControllerConfig::from_toml_file(path)?,
        None => ControllerConfig {
            log: LogConfig::new(Verbosity::Warn),
            ..ControllerConfig::named("cli")
        },
    };
    init(Profile::Development, &config.log);
    Ok(config)
}
