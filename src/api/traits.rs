use async_trait::async_trait;

use super::types::{
    ApiError, Credentials, GenerateRequest, GenerateResponse, PantryUpdate, PasswordChange,
    Registration,
};
use crate::models::{
    DietaryPreferences, PantryItem, RecipeId, RecipeSummary, RecipeVersion, VersionId,
    VersionSummary,
};

/// Everything the client asks of the recipe server.
///
/// Implementations must be cheap to share across commands; the UI holds one
/// behind an `Arc` for the life of the window.
#[async_trait]
pub trait RecipeBackend: Send + Sync + std::fmt::Debug {
    async fn list_recipes(&self) -> Result<Vec<RecipeSummary>, ApiError>;

    async fn list_versions(&self, recipe_id: RecipeId) -> Result<Vec<VersionSummary>, ApiError>;

    async fn version(&self, version_id: VersionId) -> Result<RecipeVersion, ApiError>;

    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, ApiError>;

    /// Returns the server's confirmation message, if any.
    async fn delete_recipe(&self, recipe_id: RecipeId) -> Result<Option<String>, ApiError>;

    async fn pantry_items(&self) -> Result<Vec<PantryItem>, ApiError>;

    /// Replace the whole pantry with the comma separated `items`.
    async fn replace_pantry(&self, items: &str) -> Result<PantryUpdate, ApiError>;

    async fn add_pantry_items(&self, items: &[String]) -> Result<PantryUpdate, ApiError>;

    async fn remove_pantry_item(&self, item_id: i64) -> Result<PantryUpdate, ApiError>;

    async fn preferences(&self) -> Result<DietaryPreferences, ApiError>;

    async fn save_preferences(&self, prefs: &DietaryPreferences)
        -> Result<Option<String>, ApiError>;

    async fn change_password(&self, change: &PasswordChange) -> Result<Option<String>, ApiError>;

    /// Creates the account and signs the session in.
    async fn register(&self, registration: &Registration) -> Result<Option<String>, ApiError>;

    async fn login(&self, credentials: &Credentials) -> Result<(), ApiError>;

    async fn logout(&self) -> Result<(), ApiError>;

    /// Whether the current session is signed in.
    async fn check_session(&self) -> Result<bool, ApiError> {
        match self.list_recipes().await {
            Ok(_) => Ok(true),
            Err(ApiError::SignedOut) => Ok(false),
            Err(err) => Err(err),
        }
    }
}
