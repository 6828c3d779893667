use crate::api::{ApiError, GenerateRequest, GenerateResponse};
use crate::models::{RecipeContent, RecipeId, Role, VersionId};

use super::location::Location;
use super::session::PageSession;

pub const GENERATED: &str = "Recipe generated!";
pub const GENERATE_FAILED: &str = "Failed to generate recipe";

/// Result of one generation round, for the page to render.
#[derive(Debug, Clone, PartialEq)]
pub enum Generation {
    Generated {
        content: RecipeContent,
        recipe_id: Option<RecipeId>,
        version_id: Option<VersionId>,
        /// Replaces the current history entry.
        location: Location,
    },
    Failed {
        message: String,
        signed_out: bool,
    },
}

/// Prompt → request → response bookkeeping for the develop page.
///
/// Only one request may be outstanding; the page keeps its controls
/// disabled while [`RecipeGenerator::is_busy`] holds.
#[derive(Debug, Default)]
pub struct RecipeGenerator {
    busy: bool,
}

impl RecipeGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Validate the prompt, record the user turn and build the request.
    /// `None` for a blank prompt or while another request is outstanding.
    pub fn begin(&mut self, prompt: &str, session: &mut PageSession) -> Option<GenerateRequest> {
        let prompt = prompt.trim();
        if prompt.is_empty() || self.busy {
            return None;
        }
        self.busy = true;
        session.push_turn(Role::User, prompt);
        Some(GenerateRequest {
            prompt: prompt.to_string(),
            recipe_id: session.recipe_id,
            version_id: session.version_id,
        })
    }

    /// Apply the server's answer. Always releases the lock; on failure the
    /// session's recipe and version are left exactly as they were.
    pub fn finish(
        &mut self,
        result: Result<GenerateResponse, ApiError>,
        session: &mut PageSession,
    ) -> Generation {
        self.busy = false;
        match result {
            Ok(response) => {
                session.push_turn(Role::Assistant, GENERATED);
                session.recipe_id = response.recipe_id.or(session.recipe_id);
                let version_id = response.new_version_id();
                let location = session.adopt_version(version_id);
                tracing::info!(
                    "Generated recipe {:?} version {:?}",
                    session.recipe_id,
                    version_id
                );
                Generation::Generated {
                    content: response.recipe,
                    recipe_id: session.recipe_id,
                    version_id,
                    location,
                }
            }
            Err(err) => {
                tracing::warn!("Generation failed: {}", err);
                let message = format!("Error: {}", err.message_or(GENERATE_FAILED));
                session.push_turn(Role::Assistant, message.clone());
                Generation::Failed {
                    message,
                    signed_out: err.is_signed_out(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{content, Call, FakeBackend};
    use crate::api::RecipeBackend;

    fn editing_session() -> PageSession {
        let mut session = PageSession::new(Location::edit(3).with_version_id(Some(8)));
        session.recipe_id = Some(3);
        session.version_id = Some(8);
        session
    }

    async fn run(
        generator: &mut RecipeGenerator,
        backend: &FakeBackend,
        session: &mut PageSession,
        prompt: &str,
    ) -> Option<Generation> {
        let request = generator.begin(prompt, session)?;
        assert!(generator.is_busy());
        let result = backend.generate(request).await;
        Some(generator.finish(result, session))
    }

    #[test]
    fn test_blank_prompt_is_a_no_op() {
        let mut generator = RecipeGenerator::new();
        let mut session = PageSession::new(Location::root());
        assert!(generator.begin("   \n", &mut session).is_none());
        assert!(!generator.is_busy());
        assert!(session.conversation.is_empty());
    }

    #[test]
    fn test_single_flight() {
        let mut generator = RecipeGenerator::new();
        let mut session = PageSession::new(Location::root());
        assert!(generator.begin("soup", &mut session).is_some());
        assert!(generator.begin("stew", &mut session).is_none());
        assert_eq!(session.conversation.len(), 1);
    }

    #[test]
    fn test_fresh_page_sends_prompt_only() {
        let mut generator = RecipeGenerator::new();
        let mut session = PageSession::new(Location::root());
        let request = generator.begin("  lentil soup ", &mut session).unwrap();
        assert_eq!(
            request,
            GenerateRequest {
                prompt: "lentil soup".into(),
                recipe_id: None,
                version_id: None,
            }
        );
        assert_eq!(session.conversation[0].role, Role::User);
        assert_eq!(session.conversation[0].text, "lentil soup");
    }

    #[tokio::test]
    async fn test_success_adopts_identifiers() {
        let backend = FakeBackend::new().with_generated(GenerateResponse::new(
            content("Lentil Soup", "- lentils", "1. Simmer"),
            Some(4),
            Some(12),
        ));
        let mut generator = RecipeGenerator::new();
        let mut session = PageSession::new(Location::root());

        let outcome = run(&mut generator, &backend, &mut session, "lentil soup")
            .await
            .unwrap();

        let Generation::Generated {
            content, location, ..
        } = outcome
        else {
            panic!("expected success");
        };
        assert_eq!(content.title, "Lentil Soup");
        assert_eq!(location.to_string(), "/?version_id=12");
        assert_eq!(session.recipe_id, Some(4));
        assert_eq!(session.version_id, Some(12));
        assert_eq!(session.conversation.last().unwrap().text, GENERATED);
        assert!(!generator.is_busy());
    }

    #[tokio::test]
    async fn test_server_error_keeps_identifiers() {
        let backend = FakeBackend::new()
            .failing("generate", ApiError::application(Some(400), "rate limited"));
        let mut generator = RecipeGenerator::new();
        let mut session = editing_session();
        let before = session.location.clone();

        let outcome = run(&mut generator, &backend, &mut session, "more salt")
            .await
            .unwrap();

        assert_eq!(
            outcome,
            Generation::Failed {
                message: "Error: rate limited".into(),
                signed_out: false,
            }
        );
        let last = session.conversation.last().unwrap();
        assert_eq!(last.role, Role::Assistant);
        assert_eq!(last.text, "Error: rate limited");
        assert_eq!(session.recipe_id, Some(3));
        assert_eq!(session.version_id, Some(8));
        assert_eq!(session.location, before);
        assert!(!generator.is_busy());
        assert_eq!(
            backend.calls(),
            [Call::Generate(GenerateRequest {
                prompt: "more salt".into(),
                recipe_id: Some(3),
                version_id: Some(8),
            })]
        );
    }

    #[tokio::test]
    async fn test_error_without_message_and_transport_error() {
        let mut generator = RecipeGenerator::new();
        let mut session = editing_session();

        let backend = FakeBackend::new().failing(
            "generate",
            ApiError::Application {
                status: Some(500),
                message: None,
            },
        );
        run(&mut generator, &backend, &mut session, "x").await;
        assert_eq!(
            session.conversation.last().unwrap().text,
            "Error: Failed to generate recipe"
        );

        let backend =
            FakeBackend::new().failing("generate", ApiError::Transport("connection reset".into()));
        run(&mut generator, &backend, &mut session, "y").await;
        assert_eq!(
            session.conversation.last().unwrap().text,
            "Error: connection reset"
        );
        assert_eq!((session.recipe_id, session.version_id), (Some(3), Some(8)));
    }
}
