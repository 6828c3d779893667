use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{PantryItem, RecipeContent, RecipeId, VersionId};

/// Every way a server request can fail. Nothing is retried; callers turn
/// these into inline text or toasts with [`ApiError::message_or`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("{0}")]
    Transport(String),

    #[error("Server returned {status:?}: {message:?}")]
    Application {
        status: Option<u16>,
        message: Option<String>,
    },

    #[error("Your session has expired. Please sign in again.")]
    SignedOut,
}

impl ApiError {
    pub fn application(status: Option<u16>, message: impl Into<String>) -> Self {
        ApiError::Application {
            status,
            message: Some(message.into()),
        }
    }

    /// The text to show the user: the server's own `error` when it sent
    /// one, the transport failure as-is, otherwise `fallback`.
    pub fn message_or(&self, fallback: &str) -> String {
        match self {
            ApiError::Transport(message) => message.clone(),
            ApiError::Application {
                message: Some(message),
                ..
            } => message.clone(),
            ApiError::Application { message: None, .. } => fallback.to_string(),
            ApiError::SignedOut => self.to_string(),
        }
    }

    pub fn is_signed_out(&self) -> bool {
        matches!(self, ApiError::SignedOut)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

/// Body of `POST /recipes/generate`. Identifiers the page does not have are
/// left out of the JSON entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateRequest {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe_id: Option<RecipeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_id: Option<VersionId>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub recipe: RecipeContent,
    #[serde(default)]
    pub recipe_id: Option<RecipeId>,
    #[serde(default)]
    version_id: Option<VersionId>,
    #[serde(default)]
    version: Option<VersionId>,
}

impl GenerateResponse {
    pub fn new(
        recipe: RecipeContent,
        recipe_id: Option<RecipeId>,
        version_id: Option<VersionId>,
    ) -> Self {
        Self {
            recipe,
            recipe_id,
            version_id,
            version: None,
        }
    }

    /// Identifier of the version the server just created. Older servers only
    /// send `version`; `version_id` wins when both are set.
    pub fn new_version_id(&self) -> Option<VersionId> {
        self.version_id
            .filter(|id| *id != 0)
            .or(self.version.filter(|id| *id != 0))
    }
}

/// The `{message}` / `{error}` envelope most mutating endpoints answer with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServerMessage {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PantryUpdate {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub items: Vec<PantryItem>,
}

#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "std::ops::Not::not", serialize_with = "checkbox")]
    pub remember: bool,
}

fn checkbox<S: serde::Serializer>(_: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str("on")
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .field("remember", &self.remember)
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl std::fmt::Debug for PasswordChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordChange { .. }")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_request_omits_absent_ids() {
        let request = GenerateRequest {
            prompt: "soup".into(),
            recipe_id: None,
            version_id: None,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({ "prompt": "soup" })
        );

        let request = GenerateRequest {
            prompt: "more salt".into(),
            recipe_id: Some(3),
            version_id: Some(7),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({ "prompt": "more salt", "recipe_id": 3, "version_id": 7 })
        );
    }

    #[test]
    fn test_version_id_preferred_over_version() {
        let response: GenerateResponse = serde_json::from_str(
            r#"{"version":2,"version_id":41,"recipe_id":3,"recipe":{"title":"Soup"}}"#,
        )
        .unwrap();
        assert_eq!(response.new_version_id(), Some(41));
        assert_eq!(response.recipe_id, Some(3));
        assert_eq!(response.recipe.title, "Soup");
    }

    #[test]
    fn test_version_alias_used_when_version_id_missing() {
        let response: GenerateResponse =
            serde_json::from_str(r#"{"version":9,"version_id":0,"recipe":{}}"#).unwrap();
        assert_eq!(response.new_version_id(), Some(9));

        let response: GenerateResponse = serde_json::from_str(r#"{"recipe":{}}"#).unwrap();
        assert_eq!(response.new_version_id(), None);
    }

    #[test]
    fn test_message_or() {
        let err = ApiError::application(Some(400), "rate limited");
        assert_eq!(err.message_or("Failed to generate recipe"), "rate limited");

        let err = ApiError::Application {
            status: Some(500),
            message: None,
        };
        assert_eq!(
            err.message_or("Failed to generate recipe"),
            "Failed to generate recipe"
        );

        let err = ApiError::Transport("connection refused".into());
        assert_eq!(err.message_or("ignored"), "connection refused");
    }

    #[test]
    fn test_credentials_form_and_redaction() {
        let creds = Credentials {
            username: "ana".into(),
            password: "hunter22".into(),
            remember: true,
        };
        assert!(!format!("{creds:?}").contains("hunter22"));
        let value = serde_json::to_value(&creds).unwrap();
        assert_eq!(value["remember"], "on");

        let creds = Credentials {
            remember: false,
            ..creds
        };
        let value = serde_json::to_value(&creds).unwrap();
        assert!(value.get("remember").is_none());
    }
}
