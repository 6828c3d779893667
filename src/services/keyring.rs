use std::sync::Arc;

use anyhow::{Context, Result};
use oo7::Keyring;

use crate::config::APP_ID;

const KEYRING_ATTR_APP: &str = "application";
const KEYRING_ATTR_SERVER: &str = "server";
const KEYRING_ATTR_USER: &str = "username";

/// Remembered sign-in passwords, one per server and username.
#[derive(Debug, Clone)]
pub struct KeyringService {
    keyring: Arc<Keyring>,
}

impl KeyringService {
    pub async fn new() -> Result<Self> {
        let keyring = Keyring::new()
            .await
            .context("Failed to initialize keyring")?;
        Ok(Self {
            keyring: Arc::new(keyring),
        })
    }

    pub async fn store_password(&self, server: &str, username: &str, password: &str) -> Result<()> {
        let attributes = Self::attributes(server, username);
        self.keyring
            .create_item(
                &format!("Sous password for {} on {}", username, server),
                &attributes,
                password,
                true,
            )
            .await
            .context("Failed to store password in keyring")?;
        tracing::debug!("Stored password for {} in keyring", username);
        Ok(())
    }

    pub async fn password(&self, server: &str, username: &str) -> Result<Option<String>> {
        let attributes = Self::attributes(server, username);
        let items = self
            .keyring
            .search_items(&attributes)
            .await
            .context("Failed to search keyring")?;

        match items.first() {
            Some(item) => {
                let secret = item.secret().await.context("Failed to read secret")?;
                let password =
                    String::from_utf8(secret.to_vec()).context("Secret is not valid UTF-8")?;
                Ok(Some(password))
            }
            None => Ok(None),
        }
    }

    pub async fn forget_password(&self, server: &str, username: &str) -> Result<()> {
        let attributes = Self::attributes(server, username);
        self.keyring
            .delete(&attributes)
            .await
            .context("Failed to delete password from keyring")?;
        Ok(())
    }

    fn attributes<'a>(server: &'a str, username: &'a str) -> Vec<(&'a str, &'a str)> {
        vec![
            (KEYRING_ATTR_APP, APP_ID),
            (KEYRING_ATTR_SERVER, server),
            (KEYRING_ATTR_USER, username),
        ]
    }
}
