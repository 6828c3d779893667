pub const APP_ID: &str = "com.sous.Sous";
pub const APP_NAME: &str = "Sous";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Server used when neither the environment nor the stored settings name one.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";
pub const SERVER_URL_ENV: &str = "SOUS_SERVER_URL";

/// Query parameter that carries the selected recipe version.
pub const VERSION_QUERY_PARAM: &str = "version_id";

pub const DEFAULT_TOAST_DURATION_MS: i64 = 5000;
pub const TOAST_EXIT_TRANSITION_MS: u64 = 300;

pub const STYLE: &str = include_str!("style.css");
