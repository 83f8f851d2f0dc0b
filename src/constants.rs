//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Default URL for a fresh configuration
pub const DEFAULT_HTTP_URL: &str = "https://httpbin.org/anything";

/// Fixed timeout applied to every dispatched request
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Directory under the user's home holding persisted settings
pub const CONFIG_DIR_NAME: &str = ".reqscope";

/// Settings file inside [`CONFIG_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Environment variable overriding the settings file location
pub const CONFIG_PATH_ENV: &str = "REQSCOPE_CONFIG";

/// Log file written next to the working directory
pub const LOG_FILE_NAME: &str = "reqscope.log";

/// Application name
pub const APP_NAME: &str = "reqscope";
