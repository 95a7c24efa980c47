/// Application name, used for platform data and config directories.
pub const APP_NAME: &str = "hslog";

/// Filename suffix of the highstate (state-data) artifact.
pub const HIGHSTATE_SUFFIX: &str = "_highstate.log.bz2";

/// Filename suffix of the result artifact.
pub const RESULT_SUFFIX: &str = "_result.log.bz2";

/// `chrono` format of entry timestamps (`2013-08-20T14:03:23`).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Directory name for the log root within the data directory.
pub const LOG_DIR_NAME: &str = "highstate";

/// Config file name within the config directory.
pub const CONFIG_FILENAME: &str = "config.toml";

/// Environment variable overriding the log root.
pub const LOG_DIR_ENV: &str = "HSLOG_LOG_DIR";

/// Environment variable pointing at a config file.
pub const CONFIG_ENV: &str = "HSLOG_CONFIG";
