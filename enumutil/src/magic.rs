/// Name of the environment variable containing the path to a TOML settings
/// file. If not set, the built-in defaults are used.
pub const ENV_CONFIG_PATH: &str = "ENUMUTIL_CONFIG_PATH";

/// Overrides [`Settings::verify_programs`](crate::config::Settings::verify_programs).
pub const ENV_VERIFY: &str = "ENUMUTIL_VERIFY";

/// Overrides [`Settings::self_check`](crate::config::Settings::self_check).
pub const ENV_SELF_CHECK: &str = "ENUMUTIL_SELF_CHECK";

/// Overrides [`Settings::log_listings`](crate::config::Settings::log_listings).
pub const ENV_LOG_LISTINGS: &str = "ENUMUTIL_LOG_LISTINGS";
