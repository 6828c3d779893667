use crate::api::ApiError;
use crate::models::{RecipeContent, RecipeId, RecipeVersion, VersionId, VersionSummary};

use super::loader::EmbeddedData;
use super::location::Location;
use super::session::PageSession;

pub const VERSION_LOAD_ERROR: &str = "Failed to load version";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    Unloaded,
    Loaded(VersionId),
}

/// The single transition a page runs when it first becomes ready.
#[derive(Debug, Clone, PartialEq)]
pub enum InitialTrigger {
    /// Edit data came with the page: show it as-is.
    Embedded {
        recipe_id: RecipeId,
        version_id: Option<VersionId>,
        content: RecipeContent,
    },
    /// The location names a version: fetch it.
    Fetch(VersionId),
    /// The page's own recipe data: adopt its version without fetching.
    Adopt(RecipeVersion),
    None,
}

impl InitialTrigger {
    /// Edit data beats a version in the location, which beats the page's
    /// embedded recipe; otherwise nothing happens.
    pub fn select(embedded: Option<&EmbeddedData>, location: &Location) -> Self {
        if let Some(EmbeddedData::EditRecipe {
            recipe_id,
            version_id,
            content,
        }) = embedded
        {
            return InitialTrigger::Embedded {
                recipe_id: *recipe_id,
                version_id: version_id.or(location.version_id()),
                content: content.clone(),
            };
        }

        if let Some(version_id) = location.version_id() {
            // The view page only honours versions it actually lists.
            let listed = match embedded {
                Some(EmbeddedData::Recipe { versions, .. }) => {
                    versions.iter().any(|v| v.id == version_id)
                }
                _ => true,
            };
            if listed {
                return InitialTrigger::Fetch(version_id);
            }
        }

        match embedded {
            Some(EmbeddedData::Recipe { latest, .. }) => InitialTrigger::Adopt(latest.clone()),
            _ => InitialTrigger::None,
        }
    }
}

/// The recipe's newest version, shown while a `Fetch` trigger is in flight
/// so a failed fetch still leaves the recipe on screen.
pub fn interim_version(embedded: Option<&EmbeddedData>) -> Option<&RecipeVersion> {
    match embedded {
        Some(EmbeddedData::Recipe { latest, .. }) => Some(latest),
        _ => None,
    }
}

/// The version history list beside the recipe.
#[derive(Debug, Clone, PartialEq)]
pub enum VersionListing {
    NoRecipe,
    Loading,
    Listed(Vec<VersionSummary>),
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionEntry {
    pub id: VersionId,
    pub label: String,
    pub title: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionListView {
    Entries(Vec<VersionEntry>),
    Placeholder(&'static str),
    Error(&'static str),
}

/// Which version a page shows, and the fetch that may be changing it.
///
/// A failed fetch leaves everything as it was. When several selections race,
/// only the newest request is applied.
#[derive(Debug, Clone)]
pub struct VersionNavigator {
    state: NavState,
    requested: Option<VersionId>,
    listing: VersionListing,
}

impl Default for VersionNavigator {
    fn default() -> Self {
        Self {
            state: NavState::Unloaded,
            requested: None,
            listing: VersionListing::NoRecipe,
        }
    }
}

impl VersionNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    pub fn current(&self) -> Option<VersionId> {
        match self.state {
            NavState::Loaded(id) => Some(id),
            NavState::Unloaded => None,
        }
    }

    /// Start loading `version_id`; the caller fetches it and reports back.
    pub fn request(&mut self, version_id: VersionId) -> VersionId {
        self.requested = Some(version_id);
        version_id
    }

    /// Complete a fetch. Returns false (and changes nothing) if a newer
    /// request has been made since.
    pub fn apply_loaded(&mut self, version: &RecipeVersion) -> bool {
        if self.requested != Some(version.id) {
            tracing::debug!("Ignoring superseded version {}", version.id);
            return false;
        }
        self.requested = None;
        self.state = NavState::Loaded(version.id);
        true
    }

    /// A fetch failed: the message to show. State and markers stay put.
    pub fn apply_failure(&mut self, version_id: VersionId, err: &ApiError) -> Option<String> {
        if self.requested != Some(version_id) {
            return None;
        }
        self.requested = None;
        tracing::warn!("Failed to load version {}: {}", version_id, err);
        Some(err.message_or(VERSION_LOAD_ERROR))
    }

    /// Take a version as current without fetching it (embedded data or a
    /// generation response). Cancels interest in any pending fetch.
    pub fn adopt(&mut self, version_id: Option<VersionId>) {
        self.requested = None;
        self.state = match version_id {
            Some(id) => NavState::Loaded(id),
            None => NavState::Unloaded,
        };
    }

    /// Adopt `version_id` and move the page's location onto it. Returns the
    /// location that replaces the current history entry.
    pub fn adopt_into(
        &mut self,
        session: &mut PageSession,
        version_id: Option<VersionId>,
    ) -> Location {
        self.adopt(version_id);
        session.adopt_version(version_id)
    }

    pub fn set_listing(&mut self, listing: VersionListing) {
        self.listing = listing;
    }

    pub fn listing(&self) -> &VersionListing {
        &self.listing
    }

    pub fn apply_listing(&mut self, result: Result<Vec<VersionSummary>, ApiError>) {
        self.listing = match result {
            Ok(versions) => VersionListing::Listed(versions),
            Err(err) => {
                tracing::warn!("Failed to load versions: {}", err);
                VersionListing::Error
            }
        };
    }

    /// Rows for the version list, with at most one marked active: the one
    /// matching the current version.
    pub fn list_view(&self) -> VersionListView {
        match &self.listing {
            VersionListing::NoRecipe => {
                VersionListView::Placeholder("Start a conversation to generate a recipe...")
            }
            VersionListing::Loading => VersionListView::Placeholder("Loading versions…"),
            VersionListing::Error => VersionListView::Error("Error loading versions"),
            VersionListing::Listed(versions) if versions.is_empty() => {
                VersionListView::Placeholder("No versions yet")
            }
            VersionListing::Listed(versions) => VersionListView::Entries(
                versions
                    .iter()
                    .map(|v| VersionEntry {
                        id: v.id,
                        label: v.label(),
                        title: v.title.clone(),
                        active: self.current() == Some(v.id),
                    })
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{content, version};

    fn listed() -> Vec<VersionSummary> {
        vec![
            VersionSummary::from(&version(9, 3, 3, "Soup v3")),
            VersionSummary::from(&version(8, 3, 2, "Soup v2")),
            VersionSummary::from(&version(7, 3, 1, "Soup v1")),
        ]
    }

    fn active_ids(nav: &VersionNavigator) -> Vec<VersionId> {
        match nav.list_view() {
            VersionListView::Entries(entries) => {
                entries.into_iter().filter(|e| e.active).map(|e| e.id).collect()
            }
            _ => vec![],
        }
    }

    #[test]
    fn test_edit_data_wins_and_adopts_url_version() {
        let embedded = EmbeddedData::EditRecipe {
            recipe_id: 3,
            version_id: None,
            content: content("Soup", "", ""),
        };
        let location = Location::parse("/recipes/3/edit?version_id=8").unwrap();
        assert_eq!(
            InitialTrigger::select(Some(&embedded), &location),
            InitialTrigger::Embedded {
                recipe_id: 3,
                version_id: Some(8),
                content: content("Soup", "", ""),
            }
        );
    }

    #[test]
    fn test_url_version_beats_recipe_data() {
        let embedded = EmbeddedData::Recipe {
            recipe_id: 3,
            latest: version(9, 3, 3, "Soup v3"),
            versions: listed(),
        };
        let location = Location::parse("/3?version_id=7").unwrap();
        assert_eq!(
            InitialTrigger::select(Some(&embedded), &location),
            InitialTrigger::Fetch(7)
        );

        // A version the page does not list is ignored.
        let location = Location::parse("/3?version_id=70").unwrap();
        assert_eq!(
            InitialTrigger::select(Some(&embedded), &location),
            InitialTrigger::Adopt(version(9, 3, 3, "Soup v3"))
        );
    }

    #[test]
    fn test_unlisted_url_version_is_rewritten() {
        let embedded = EmbeddedData::Recipe {
            recipe_id: 3,
            latest: version(9, 3, 3, "Soup v3"),
            versions: listed(),
        };
        let location = Location::parse("/3?version_id=70").unwrap();
        let InitialTrigger::Adopt(latest) = InitialTrigger::select(Some(&embedded), &location)
        else {
            panic!("expected the newest version to be adopted");
        };

        let mut nav = VersionNavigator::new();
        nav.apply_listing(Ok(listed()));
        let mut session = PageSession::new(location);
        let replaced = nav.adopt_into(&mut session, Some(latest.id));

        assert_eq!(replaced, Location::parse("/3?version_id=9").unwrap());
        assert_eq!(session.location, replaced);
        assert_eq!(session.version_id, Some(9));
        assert_eq!(active_ids(&nav), [9]);
    }

    #[test]
    fn test_failed_url_fetch_keeps_interim_version() {
        let embedded = EmbeddedData::Recipe {
            recipe_id: 3,
            latest: version(9, 3, 3, "Soup v3"),
            versions: listed(),
        };
        let location = Location::parse("/3?version_id=7").unwrap();
        assert_eq!(
            InitialTrigger::select(Some(&embedded), &location),
            InitialTrigger::Fetch(7)
        );
        let interim = interim_version(Some(&embedded)).unwrap();
        assert_eq!(interim.content.title, "Soup v3");

        // The interim version is shown but not marked active.
        let mut nav = VersionNavigator::new();
        nav.apply_listing(Ok(listed()));
        nav.request(7);
        assert!(nav.apply_failure(7, &ApiError::Transport("down".into())).is_some());
        assert_eq!(nav.state(), NavState::Unloaded);
        assert!(active_ids(&nav).is_empty());

        assert_eq!(interim_version(None), None);
    }

    #[test]
    fn test_develop_page_url_version_fetches() {
        let location = Location::parse("/?version_id=4").unwrap();
        assert_eq!(InitialTrigger::select(None, &location), InitialTrigger::Fetch(4));
        assert_eq!(
            InitialTrigger::select(None, &Location::root()),
            InitialTrigger::None
        );
    }

    #[test]
    fn test_exactly_one_active_marker() {
        let mut nav = VersionNavigator::new();
        nav.apply_listing(Ok(listed()));
        assert!(active_ids(&nav).is_empty());

        for id in [8, 7, 9, 8] {
            let requested = nav.request(id);
            assert!(nav.apply_loaded(&version(requested, 3, 1, "x")));
            assert_eq!(active_ids(&nav), [id]);
            assert_eq!(nav.state(), NavState::Loaded(id));
        }
    }

    #[test]
    fn test_failed_fetch_changes_nothing() {
        let mut nav = VersionNavigator::new();
        nav.apply_listing(Ok(listed()));
        nav.adopt(Some(9));

        nav.request(7);
        let message = nav.apply_failure(7, &ApiError::application(Some(404), "Version not found"));
        assert_eq!(message.as_deref(), Some("Version not found"));
        assert_eq!(nav.state(), NavState::Loaded(9));
        assert_eq!(active_ids(&nav), [9]);
    }

    #[test]
    fn test_superseded_fetch_is_ignored() {
        let mut nav = VersionNavigator::new();
        nav.request(7);
        nav.request(8);
        assert!(!nav.apply_loaded(&version(7, 3, 1, "old")));
        assert_eq!(nav.state(), NavState::Unloaded);
        assert!(nav.apply_loaded(&version(8, 3, 2, "new")));
        assert_eq!(nav.current(), Some(8));
    }

    #[test]
    fn test_listing_placeholders() {
        let mut nav = VersionNavigator::new();
        assert_eq!(
            nav.list_view(),
            VersionListView::Placeholder("Start a conversation to generate a recipe...")
        );
        nav.apply_listing(Ok(vec![]));
        assert_eq!(nav.list_view(), VersionListView::Placeholder("No versions yet"));
        nav.apply_listing(Err(ApiError::Transport("down".into())));
        assert_eq!(nav.list_view(), VersionListView::Error("Error loading versions"));
    }
}
