pub mod database;
pub mod display;
pub mod export;
pub mod generator;
pub mod keyring;
pub mod loader;
pub mod location;
pub mod navigator;
pub mod pantry;
pub mod session;
pub mod settings;
pub mod sidebar;
pub mod toast;

pub use database::Database;
pub use keyring::KeyringService;
pub use settings::SettingsService;
