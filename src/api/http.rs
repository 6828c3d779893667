use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use super::traits::RecipeBackend;
use super::types::{
    ApiError, Credentials, GenerateRequest, GenerateResponse, PantryUpdate, PasswordChange,
    Registration, ServerMessage,
};
use crate::config;
use crate::models::{
    DietaryPreferences, PantryItem, RecipeId, RecipeSummary, RecipeVersion, VersionId,
    VersionSummary,
};

const LOGIN_PATH: &str = "auth/login";

/// `reqwest` client for the recipe server. The server keeps its session in
/// a cookie, so the client carries a cookie store and is shared, never
/// rebuilt per request.
#[derive(Debug)]
pub struct HttpBackend {
    client: Client,
    base: Url,
}

impl HttpBackend {
    pub fn new(base: Url) -> Result<Self, ApiError> {
        let client = Client::builder()
            .cookie_store(true)
            .user_agent(format!("{}/{}", config::APP_NAME, config::VERSION))
            .build()?;
        Ok(Self {
            client,
            base: Self::normalize_base(base),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    // Joining relative paths keeps any prefix the server is mounted under.
    fn normalize_base(mut base: Url) -> Url {
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.set_query(None);
        base.set_fragment(None);
        base
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|e| ApiError::Transport(format!("Invalid request path {}: {}", path, e)))
    }

    fn is_login_page(&self, url: &Url) -> bool {
        self.url(LOGIN_PATH)
            .map(|login| login.path() == url.path().trim_end_matches('/'))
            .unwrap_or(false)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Response, ApiError> {
        request.send().await.map_err(|e| {
            tracing::warn!("Request to {} failed: {}", self.base, e);
            ApiError::Transport(format!("Failed to connect to {}: {}", self.base, e))
        })
    }

    /// Classify a response: bounced to the login page, an application
    /// failure (non-2xx, or a 2xx body carrying `error`), or a decoded value.
    async fn read_json<T: DeserializeOwned>(&self, response: Response) -> Result<T, ApiError> {
        if self.is_login_page(response.url()) {
            tracing::info!("Session is not signed in");
            return Err(ApiError::SignedOut);
        }

        let status = response.status();
        let body = response.text().await?;

        let value: serde_json::Value = match serde_json::from_str(&body) {
            Ok(value) => value,
            Err(e) if status.is_success() => {
                return Err(ApiError::Transport(format!("Invalid response: {}", e)));
            }
            Err(_) => {
                tracing::warn!("HTTP {} without a JSON body", status.as_u16());
                return Err(ApiError::Application {
                    status: Some(status.as_u16()),
                    message: None,
                });
            }
        };

        let error = value
            .get("error")
            .and_then(|e| e.as_str())
            .map(str::to_string);
        if !status.is_success() || error.is_some() {
            tracing::warn!("HTTP {}: {:?}", status.as_u16(), error);
            return Err(ApiError::Application {
                status: Some(status.as_u16()),
                message: error,
            });
        }

        serde_json::from_value(value)
            .map_err(|e| ApiError::Transport(format!("Invalid response: {}", e)))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        tracing::debug!("GET {}", path);
        let response = self.send(self.client.get(self.url(path)?)).await?;
        self.read_json(response).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        tracing::debug!("POST {}", path);
        let response = self
            .send(self.client.post(self.url(path)?).json(body))
            .await?;
        self.read_json(response).await
    }

    async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        tracing::debug!("DELETE {}", path);
        let response = self.send(self.client.delete(self.url(path)?)).await?;
        self.read_json(response).await
    }
}

#[async_trait]
impl RecipeBackend for HttpBackend {
    async fn list_recipes(&self) -> Result<Vec<RecipeSummary>, ApiError> {
        self.get_json("recipes/list").await
    }

    async fn list_versions(&self, recipe_id: RecipeId) -> Result<Vec<VersionSummary>, ApiError> {
        self.get_json(&format!("recipes/versions?recipe_id={}", recipe_id))
            .await
    }

    async fn version(&self, version_id: VersionId) -> Result<RecipeVersion, ApiError> {
        self.get_json(&format!("recipes/versions/{}", version_id))
            .await
    }

    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, ApiError> {
        self.post_json("recipes/generate", &request).await
    }

    async fn delete_recipe(&self, recipe_id: RecipeId) -> Result<Option<String>, ApiError> {
        let reply: ServerMessage = self.delete_json(&format!("recipes/{}", recipe_id)).await?;
        Ok(reply.message)
    }

    async fn pantry_items(&self) -> Result<Vec<PantryItem>, ApiError> {
        self.get_json("pantry/items").await
    }

    async fn replace_pantry(&self, items: &str) -> Result<PantryUpdate, ApiError> {
        self.post_json("pantry/items", &serde_json::json!({ "items": items }))
            .await
    }

    async fn add_pantry_items(&self, items: &[String]) -> Result<PantryUpdate, ApiError> {
        self.post_json(
            "pantry/items/add",
            &serde_json::json!({ "items": items.join(",") }),
        )
        .await
    }

    async fn remove_pantry_item(&self, item_id: i64) -> Result<PantryUpdate, ApiError> {
        self.delete_json(&format!("pantry/items/{}", item_id)).await
    }

    async fn preferences(&self) -> Result<DietaryPreferences, ApiError> {
        self.get_json("settings/preferences").await
    }

    async fn save_preferences(
        &self,
        prefs: &DietaryPreferences,
    ) -> Result<Option<String>, ApiError> {
        let reply: ServerMessage = self.post_json("settings/preferences", prefs).await?;
        Ok(reply.message)
    }

    async fn change_password(&self, change: &PasswordChange) -> Result<Option<String>, ApiError> {
        let reply: ServerMessage = self.post_json("settings/password", change).await?;
        Ok(reply.message)
    }

    async fn register(&self, registration: &Registration) -> Result<Option<String>, ApiError> {
        let reply: ServerMessage = self.post_json("auth/register", registration).await?;
        Ok(reply.message)
    }

    // The login form answers with HTML: a redirect away on success, the
    // login page again (with a flashed error) on failure.
    async fn login(&self, credentials: &Credentials) -> Result<(), ApiError> {
        tracing::debug!("POST {} as {}", LOGIN_PATH, credentials.username);
        let response = self
            .send(self.client.post(self.url(LOGIN_PATH)?).form(credentials))
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Application {
                status: Some(status.as_u16()),
                message: None,
            });
        }
        if self.is_login_page(response.url()) {
            tracing::info!("Sign in rejected for {}", credentials.username);
            return Err(ApiError::application(
                Some(status.as_u16()),
                "Invalid username or password.",
            ));
        }
        tracing::info!("Signed in as {}", credentials.username);
        Ok(())
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let response = self.send(self.client.get(self.url("auth/logout")?)).await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ApiError::Application {
                status: Some(status.as_u16()),
                message: None,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, body_string_contains, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn backend(server: &MockServer) -> HttpBackend {
        HttpBackend::new(Url::parse(&server.uri()).unwrap()).unwrap()
    }

    async fn mount_login_page(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<form>login</form>"))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_list_recipes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/recipes/list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 1, "title": "Soup", "description": "Warm",
                 "created_at": "2024-01-01T00:00:00", "updated_at": "2024-01-02T00:00:00"},
                {"id": 2, "title": null}
            ])))
            .mount(&server)
            .await;

        let recipes = backend(&server).await.list_recipes().await.unwrap();
        assert_eq!(recipes.len(), 2);
        assert_eq!(recipes[0].display_title(), "Soup");
        assert_eq!(recipes[1].display_title(), "Untitled");
    }

    #[tokio::test]
    async fn test_list_versions_sends_recipe_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/recipes/versions"))
            .and(query_param("recipe_id", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 8, "version": 2, "title": "Soup", "created_at": "2024-01-02T00:00:00"},
                {"id": 7, "version": 1, "title": "Soup", "created_at": "2024-01-01T00:00:00"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let versions = backend(&server).await.list_versions(3).await.unwrap();
        assert_eq!(versions.iter().map(|v| v.id).collect::<Vec<_>>(), [8, 7]);
    }

    #[tokio::test]
    async fn test_generate_omits_absent_ids_on_the_wire() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/recipes/generate"))
            .and(body_json(serde_json::json!({ "prompt": "lentil soup" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "version": 1, "version_id": 12, "recipe_id": 4,
                "recipe": {"title": "Lentil Soup", "ingredients": "- lentils", "steps": "1. Simmer"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = backend(&server)
            .await
            .generate(GenerateRequest {
                prompt: "lentil soup".into(),
                recipe_id: None,
                version_id: None,
            })
            .await
            .unwrap();
        assert_eq!(response.new_version_id(), Some(12));
        assert_eq!(response.recipe_id, Some(4));
        assert_eq!(response.recipe.ingredients.lines(), ["- lentils"]);
    }

    #[tokio::test]
    async fn test_error_status_carries_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/recipes/generate"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(serde_json::json!({ "error": "rate limited" })),
            )
            .mount(&server)
            .await;

        let err = backend(&server)
            .await
            .generate(GenerateRequest {
                prompt: "x".into(),
                recipe_id: Some(1),
                version_id: Some(2),
            })
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::application(Some(400), "rate limited"));
    }

    #[tokio::test]
    async fn test_error_status_without_body_uses_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/recipes/5"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = backend(&server).await.delete_recipe(5).await.unwrap_err();
        assert_eq!(err.message_or("Error deleting recipe"), "Error deleting recipe");
    }

    #[tokio::test]
    async fn test_success_body_with_error_is_a_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/settings/preferences"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "error": "nope" })),
            )
            .mount(&server)
            .await;

        let err = backend(&server).await.preferences().await.unwrap_err();
        assert_eq!(err, ApiError::application(Some(200), "nope"));
    }

    #[tokio::test]
    async fn test_undecodable_success_is_transport() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pantry/items"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = backend(&server).await.pantry_items().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport() {
        let backend = HttpBackend::new(Url::parse("http://127.0.0.1:9").unwrap()).unwrap();
        let err = backend.list_recipes().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[tokio::test]
    async fn test_redirect_to_login_is_signed_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/recipes/list"))
            .respond_with(
                ResponseTemplate::new(302)
                    .insert_header("Location", "/auth/login?next=%2Frecipes%2Flist"),
            )
            .mount(&server)
            .await;
        mount_login_page(&server).await;

        let backend = backend(&server).await;
        let err = backend.list_recipes().await.unwrap_err();
        assert!(err.is_signed_out());
        assert!(!backend.check_session().await.unwrap());
    }

    #[tokio::test]
    async fn test_add_pantry_items_joins_with_commas() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/pantry/items/add"))
            .and(body_json(serde_json::json!({ "items": "eggs,milk,flour" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": "Added 3 new item(s) to pantry",
                "items": [{"id": 1, "name": "eggs"}, {"id": 2, "name": "flour"}, {"id": 3, "name": "milk"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let items = vec!["eggs".to_string(), "milk".to_string(), "flour".to_string()];
        let update = backend(&server).await.add_pantry_items(&items).await.unwrap();
        assert_eq!(update.message.as_deref(), Some("Added 3 new item(s) to pantry"));
        assert_eq!(update.items.len(), 3);
    }

    #[tokio::test]
    async fn test_login_success_follows_redirect_home() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(body_string_contains("username=ana"))
            .respond_with(ResponseTemplate::new(302).insert_header("Location", "/"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>home</html>"))
            .mount(&server)
            .await;

        let creds = Credentials {
            username: "ana".into(),
            password: "secret".into(),
            remember: true,
        };
        backend(&server).await.login(&creds).await.unwrap();
    }

    #[tokio::test]
    async fn test_login_rejected_when_form_is_shown_again() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<form>login</form>"))
            .mount(&server)
            .await;

        let creds = Credentials {
            username: "ana".into(),
            password: "wrong".into(),
            remember: false,
        };
        let err = backend(&server).await.login(&creds).await.unwrap_err();
        assert_eq!(err.message_or(""), "Invalid username or password.");
    }

    #[test]
    fn test_base_url_keeps_mount_prefix() {
        let backend = HttpBackend::new(Url::parse("https://example.org/remy").unwrap()).unwrap();
        assert_eq!(
            backend.url("recipes/list").unwrap().as_str(),
            "https://example.org/remy/recipes/list"
        );
        assert!(backend.is_login_page(&Url::parse("https://example.org/remy/auth/login?next=/").unwrap()));
        assert!(!backend.is_login_page(&Url::parse("https://example.org/remy/").unwrap()));
    }
}
