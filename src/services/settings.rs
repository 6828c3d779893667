use anyhow::Result;
use serde::{Deserialize, Serialize};
use url::Url;

use super::database::Database;
use super::location::Location;
use crate::config;

const SETTINGS_KEY: &str = "app_settings";
const LAST_LOCATION_KEY: &str = "last_location";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    pub server_url: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub remember_login: bool,
    #[serde(default = "default_toast_duration")]
    pub toast_duration_ms: i64,
}

fn default_toast_duration() -> i64 {
    config::DEFAULT_TOAST_DURATION_MS
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            server_url: config::DEFAULT_SERVER_URL.to_string(),
            username: None,
            remember_login: false,
            toast_duration_ms: config::DEFAULT_TOAST_DURATION_MS,
        }
    }
}

impl AppSettings {
    /// The server to talk to: the environment override, then the stored
    /// URL, then the default.
    pub fn effective_server_url(&self) -> Url {
        let from_env = std::env::var(config::SERVER_URL_ENV).ok();
        Self::resolve_server_url(from_env.as_deref(), &self.server_url)
    }

    fn resolve_server_url(from_env: Option<&str>, stored: &str) -> Url {
        [from_env, Some(stored), Some(config::DEFAULT_SERVER_URL)]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|candidate| !candidate.is_empty())
            .find_map(|candidate| match Url::parse(candidate) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => Some(url),
                _ => {
                    tracing::warn!("Ignoring invalid server URL: {}", candidate);
                    None
                }
            })
            .unwrap_or_else(|| unreachable!("default server URL is valid"))
    }
}

pub struct SettingsService;

impl SettingsService {
    pub async fn load(db: &Database) -> AppSettings {
        match db.get_setting(SETTINGS_KEY).await {
            Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
                tracing::warn!("Stored settings are unreadable, using defaults: {}", e);
                AppSettings::default()
            }),
            Ok(None) => AppSettings::default(),
            Err(e) => {
                tracing::warn!("Failed to load settings: {}", e);
                AppSettings::default()
            }
        }
    }

    pub async fn save(db: &Database, settings: &AppSettings) -> Result<()> {
        let json = serde_json::to_string(settings)?;
        db.set_setting(SETTINGS_KEY, &json).await
    }

    pub async fn load_last_location(db: &Database) -> Location {
        match db.get_setting(LAST_LOCATION_KEY).await {
            Ok(Some(stored)) => Location::parse(&stored).unwrap_or_default(),
            _ => Location::root(),
        }
    }

    pub async fn save_last_location(db: &Database, location: &Location) -> Result<()> {
        db.set_setting(LAST_LOCATION_KEY, &location.to_string()).await
    }

    pub async fn forget_last_location(db: &Database) -> Result<()> {
        db.delete_setting(LAST_LOCATION_KEY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_defaults_when_nothing_stored() {
        let db = Database::new_in_memory().unwrap();
        let settings = SettingsService::load(&db).await;
        assert_eq!(settings, AppSettings::default());
        assert_eq!(settings.toast_duration_ms, 5000);
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let db = Database::new_in_memory().unwrap();
        let settings = AppSettings {
            server_url: "https://remy.example".into(),
            username: Some("ana".into()),
            remember_login: true,
            toast_duration_ms: 0,
        };
        SettingsService::save(&db, &settings).await.unwrap();
        assert_eq!(SettingsService::load(&db).await, settings);
    }

    #[tokio::test]
    async fn test_partial_settings_fill_defaults() {
        let db = Database::new_in_memory().unwrap();
        db.set_setting(SETTINGS_KEY, r#"{"server_url":"http://10.0.0.2:5000"}"#)
            .await
            .unwrap();
        let settings = SettingsService::load(&db).await;
        assert_eq!(settings.server_url, "http://10.0.0.2:5000");
        assert_eq!(settings.toast_duration_ms, 5000);
        assert!(!settings.remember_login);
    }

    #[tokio::test]
    async fn test_last_location_round_trip() {
        let db = Database::new_in_memory().unwrap();
        assert_eq!(SettingsService::load_last_location(&db).await, Location::root());

        let location = Location::parse("/4?version_id=11").unwrap();
        SettingsService::save_last_location(&db, &location).await.unwrap();
        assert_eq!(SettingsService::load_last_location(&db).await, location);

        SettingsService::forget_last_location(&db).await.unwrap();
        assert_eq!(SettingsService::load_last_location(&db).await, Location::root());
    }

    #[test]
    fn test_server_url_precedence() {
        let url = AppSettings::resolve_server_url(Some("https://env.example"), "https://stored.example");
        assert_eq!(url.host_str(), Some("env.example"));

        let url = AppSettings::resolve_server_url(None, "https://stored.example");
        assert_eq!(url.host_str(), Some("stored.example"));

        let url = AppSettings::resolve_server_url(Some("  "), "not a url");
        assert_eq!(url.as_str(), "http://127.0.0.1:5000/");
    }
}
