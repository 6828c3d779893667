use crate::models::{ConversationTurn, RecipeId, Role, VersionId};

use super::location::Location;

/// Per-page context. One is built when a page becomes ready and dropped with
/// the page; nothing in it outlives a navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSession {
    pub location: Location,
    pub recipe_id: Option<RecipeId>,
    pub version_id: Option<VersionId>,
    pub conversation: Vec<ConversationTurn>,
}

impl PageSession {
    pub fn new(location: Location) -> Self {
        Self {
            location,
            recipe_id: None,
            version_id: None,
            conversation: Vec::new(),
        }
    }

    pub fn push_turn(&mut self, role: Role, text: impl Into<String>) -> &ConversationTurn {
        self.conversation.push(ConversationTurn::new(role, text));
        &self.conversation[self.conversation.len() - 1]
    }

    /// Record `version_id` as current and return the location that should
    /// replace the current history entry.
    pub fn adopt_version(&mut self, version_id: Option<VersionId>) -> Location {
        self.version_id = version_id;
        self.location = self.location.with_version_id(version_id);
        self.location.clone()
    }

    /// `/{recipe}?version_id={v}`: where the develop page's back link goes.
    pub fn view_link(&self) -> Option<Location> {
        self.recipe_id
            .map(|id| Location::recipe(id).with_version_id(self.version_id))
    }

    /// `/recipes/{recipe}/edit?version_id={v}`: the view page's edit link.
    pub fn edit_link(&self) -> Option<Location> {
        self.recipe_id
            .map(|id| Location::edit(id).with_version_id(self.version_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_blank() {
        let session = PageSession::new(Location::root());
        assert_eq!(session.recipe_id, None);
        assert_eq!(session.version_id, None);
        assert!(session.conversation.is_empty());
        assert_eq!(session.view_link(), None);
    }

    #[test]
    fn test_adopt_version_rewrites_location() {
        let mut session = PageSession::new(Location::parse("/recipes/3/edit").unwrap());
        session.recipe_id = Some(3);
        let replaced = session.adopt_version(Some(12));
        assert_eq!(replaced.to_string(), "/recipes/3/edit?version_id=12");
        assert_eq!(session.view_link().unwrap().to_string(), "/3?version_id=12");
        assert_eq!(
            session.edit_link().unwrap().to_string(),
            "/recipes/3/edit?version_id=12"
        );

        let replaced = session.adopt_version(None);
        assert_eq!(replaced.to_string(), "/recipes/3/edit");
    }
}
