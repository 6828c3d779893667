use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::traits::RecipeBackend;
use super::types::{
    ApiError, Credentials, GenerateRequest, GenerateResponse, PantryUpdate, PasswordChange,
    Registration,
};
use crate::models::{
    DietaryPreferences, PantryItem, RecipeContent, RecipeId, RecipeLines, RecipeSummary,
    RecipeVersion, VersionId, VersionSummary,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListRecipes,
    ListVersions(RecipeId),
    Version(VersionId),
    Generate(GenerateRequest),
    DeleteRecipe(RecipeId),
    PantryItems,
    ReplacePantry(String),
    AddPantryItems(Vec<String>),
    RemovePantryItem(i64),
    Preferences,
    SavePreferences(DietaryPreferences),
    ChangePassword,
    Register(String),
    Login(String),
    Logout,
}

/// In-memory backend with canned answers and a log of every call made.
#[derive(Debug, Default)]
pub struct FakeBackend {
    recipes: Mutex<Vec<RecipeSummary>>,
    versions: Mutex<HashMap<RecipeId, Vec<VersionSummary>>>,
    details: Mutex<HashMap<VersionId, RecipeVersion>>,
    generated: Mutex<Option<GenerateResponse>>,
    pantry: Mutex<Vec<PantryItem>>,
    prefs: Mutex<DietaryPreferences>,
    failures: Mutex<HashMap<&'static str, ApiError>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_recipes(self, recipes: Vec<RecipeSummary>) -> Self {
        *self.recipes.lock().unwrap() = recipes;
        self
    }

    pub fn with_versions(self, recipe_id: RecipeId, versions: Vec<VersionSummary>) -> Self {
        self.versions.lock().unwrap().insert(recipe_id, versions);
        self
    }

    pub fn with_version(self, version: RecipeVersion) -> Self {
        self.details.lock().unwrap().insert(version.id, version);
        self
    }

    pub fn with_generated(self, response: GenerateResponse) -> Self {
        *self.generated.lock().unwrap() = Some(response);
        self
    }

    pub fn with_pantry(self, items: Vec<PantryItem>) -> Self {
        *self.pantry.lock().unwrap() = items;
        self
    }

    /// Make every later call to `operation` fail with `err`.
    pub fn failing(self, operation: &'static str, err: ApiError) -> Self {
        self.failures.lock().unwrap().insert(operation, err);
        self
    }

    pub fn set_recipes(&self, recipes: Vec<RecipeSummary>) {
        *self.recipes.lock().unwrap() = recipes;
    }

    pub fn set_failure(&self, operation: &'static str, err: Option<ApiError>) {
        let mut failures = self.failures.lock().unwrap();
        match err {
            Some(err) => failures.insert(operation, err),
            None => failures.remove(operation),
        };
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, operation: &'static str, call: Call) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(call);
        match self.failures.lock().unwrap().get(operation) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn pantry_update(&self, message: &str) -> PantryUpdate {
        PantryUpdate {
            message: Some(message.to_string()),
            items: self.pantry.lock().unwrap().clone(),
        }
    }
}

#[async_trait]
impl RecipeBackend for FakeBackend {
    async fn list_recipes(&self) -> Result<Vec<RecipeSummary>, ApiError> {
        self.record("list_recipes", Call::ListRecipes)?;
        Ok(self.recipes.lock().unwrap().clone())
    }

    async fn list_versions(&self, recipe_id: RecipeId) -> Result<Vec<VersionSummary>, ApiError> {
        self.record("list_versions", Call::ListVersions(recipe_id))?;
        Ok(self
            .versions
            .lock()
            .unwrap()
            .get(&recipe_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn version(&self, version_id: VersionId) -> Result<RecipeVersion, ApiError> {
        self.record("version", Call::Version(version_id))?;
        self.details
            .lock()
            .unwrap()
            .get(&version_id)
            .cloned()
            .ok_or_else(|| ApiError::application(Some(404), "Version not found"))
    }

    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, ApiError> {
        self.record("generate", Call::Generate(request))?;
        self.generated
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ApiError::Transport("no canned generation".into()))
    }

    async fn delete_recipe(&self, recipe_id: RecipeId) -> Result<Option<String>, ApiError> {
        self.record("delete_recipe", Call::DeleteRecipe(recipe_id))?;
        self.recipes.lock().unwrap().retain(|r| r.id != recipe_id);
        Ok(Some("Recipe deleted successfully".into()))
    }

    async fn pantry_items(&self) -> Result<Vec<PantryItem>, ApiError> {
        self.record("pantry_items", Call::PantryItems)?;
        Ok(self.pantry.lock().unwrap().clone())
    }

    async fn replace_pantry(&self, items: &str) -> Result<PantryUpdate, ApiError> {
        self.record("replace_pantry", Call::ReplacePantry(items.to_string()))?;
        Ok(self.pantry_update("Pantry updated successfully"))
    }

    async fn add_pantry_items(&self, items: &[String]) -> Result<PantryUpdate, ApiError> {
        self.record("add_pantry_items", Call::AddPantryItems(items.to_vec()))?;
        let mut pantry = self.pantry.lock().unwrap();
        let mut next_id = pantry.iter().filter_map(|i| i.id).max().unwrap_or(0);
        let mut added = 0;
        for name in items {
            if !pantry.iter().any(|i| &i.name == name) {
                next_id += 1;
                added += 1;
                pantry.push(PantryItem {
                    id: Some(next_id),
                    name: name.clone(),
                });
            }
        }
        drop(pantry);
        Ok(self.pantry_update(&format!("Added {} new item(s) to pantry", added)))
    }

    async fn remove_pantry_item(&self, item_id: i64) -> Result<PantryUpdate, ApiError> {
        self.record("remove_pantry_item", Call::RemovePantryItem(item_id))?;
        self.pantry.lock().unwrap().retain(|i| i.id != Some(item_id));
        Ok(self.pantry_update("Item removed"))
    }

    async fn preferences(&self) -> Result<DietaryPreferences, ApiError> {
        self.record("preferences", Call::Preferences)?;
        Ok(self.prefs.lock().unwrap().clone())
    }

    async fn save_preferences(
        &self,
        prefs: &DietaryPreferences,
    ) -> Result<Option<String>, ApiError> {
        self.record("save_preferences", Call::SavePreferences(prefs.clone()))?;
        *self.prefs.lock().unwrap() = prefs.clone();
        Ok(Some("Preferences updated successfully".into()))
    }

    async fn change_password(&self, _change: &PasswordChange) -> Result<Option<String>, ApiError> {
        self.record("change_password", Call::ChangePassword)?;
        Ok(Some("Password changed successfully".into()))
    }

    async fn register(&self, registration: &Registration) -> Result<Option<String>, ApiError> {
        self.record("register", Call::Register(registration.username.clone()))?;
        Ok(Some("Account created!".into()))
    }

    async fn login(&self, credentials: &Credentials) -> Result<(), ApiError> {
        self.record("login", Call::Login(credentials.username.clone()))
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.record("logout", Call::Logout)
    }
}

pub fn summary(id: RecipeId, title: &str, description: Option<&str>) -> RecipeSummary {
    RecipeSummary {
        id,
        title: Some(title.to_string()),
        description: description.map(str::to_string),
        created_at: None,
        updated_at: None,
    }
}

pub fn version(id: VersionId, recipe_id: RecipeId, ordinal: u32, title: &str) -> RecipeVersion {
    RecipeVersion {
        id,
        recipe_id: Some(recipe_id),
        version: ordinal,
        content: content(title, "- salt\n- water", "1. Boil"),
        created_at: None,
    }
}

pub fn content(title: &str, ingredients: &str, steps: &str) -> RecipeContent {
    RecipeContent {
        title: title.to_string(),
        description: None,
        ingredients: RecipeLines::from_text(ingredients),
        steps: RecipeLines::from_text(steps),
        tips: None,
    }
}
