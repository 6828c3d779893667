use crate::api::{ApiError, RecipeBackend};
use crate::models::{RecipeContent, RecipeId, RecipeVersion, VersionId, VersionSummary};

use super::location::{Location, Route};
use super::toast::FlashNotice;

pub const RECIPE_NOT_FOUND: &str = "Recipe not found";
pub const PAGE_NOT_FOUND: &str = "Page not found";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Develop,
    View,
    Pantry,
}

/// Data delivered with a page so it can render without a second request.
#[derive(Debug, Clone, PartialEq)]
pub enum EmbeddedData {
    /// Seeds the develop page when editing an existing recipe.
    EditRecipe {
        recipe_id: RecipeId,
        version_id: Option<VersionId>,
        content: RecipeContent,
    },
    /// The view page's recipe: its newest version and the version list.
    Recipe {
        recipe_id: RecipeId,
        latest: RecipeVersion,
        versions: Vec<VersionSummary>,
    },
}

/// A resolved page waiting to be shown.
#[derive(Debug, Clone, PartialEq)]
pub struct PageContent {
    pub location: Location,
    pub kind: PageKind,
    pub embedded: Option<EmbeddedData>,
    pub flashes: Vec<FlashNotice>,
}

impl PageContent {
    fn new(location: Location, kind: PageKind, embedded: Option<EmbeddedData>) -> Self {
        Self {
            location,
            kind,
            embedded,
            flashes: Vec::new(),
        }
    }

    fn redirect_home(mut flashes: Vec<FlashNotice>, message: &str) -> Self {
        tracing::info!("Redirecting home: {}", message);
        flashes.push(FlashNotice::new("error", message));
        Self {
            location: Location::root(),
            kind: PageKind::Develop,
            embedded: None,
            flashes,
        }
    }
}

/// Resolve `location` into the page to show.
///
/// `carried` is data the previous page already had (the edit link carries
/// the displayed version) and wins over fetching. Only `SignedOut` is
/// returned as an error; every other failure becomes a redirect home with an
/// error flash.
pub async fn resolve_page(
    backend: &dyn RecipeBackend,
    location: Location,
    carried: Option<EmbeddedData>,
    flashes: Vec<FlashNotice>,
) -> Result<PageContent, ApiError> {
    let resolved = match location.route() {
        Route::Develop => Ok(Some(PageContent::new(location, PageKind::Develop, None))),
        Route::Pantry => Ok(Some(PageContent::new(location, PageKind::Pantry, None))),
        Route::View(recipe_id) => resolve_view(backend, location, recipe_id).await,
        Route::Edit(recipe_id) => resolve_edit(backend, location, recipe_id, carried).await,
        Route::NotFound => {
            tracing::debug!("No page for {}", location);
            return Ok(PageContent::redirect_home(flashes, PAGE_NOT_FOUND));
        }
    };

    match resolved {
        Ok(Some(mut page)) => {
            page.flashes = flashes;
            Ok(page)
        }
        Ok(None) => Ok(PageContent::redirect_home(flashes, RECIPE_NOT_FOUND)),
        Err(ApiError::SignedOut) => Err(ApiError::SignedOut),
        Err(err) => {
            tracing::warn!("Failed to load page: {}", err);
            Ok(PageContent::redirect_home(
                flashes,
                &err.message_or("Error loading recipe"),
            ))
        }
    }
}

async fn resolve_view(
    backend: &dyn RecipeBackend,
    location: Location,
    recipe_id: RecipeId,
) -> Result<Option<PageContent>, ApiError> {
    let versions = backend.list_versions(recipe_id).await?;
    let Some(newest) = versions.first() else {
        return Ok(None);
    };
    let latest = backend.version(newest.id).await?;
    Ok(Some(PageContent::new(
        location,
        PageKind::View,
        Some(EmbeddedData::Recipe {
            recipe_id,
            latest,
            versions,
        }),
    )))
}

async fn resolve_edit(
    backend: &dyn RecipeBackend,
    location: Location,
    recipe_id: RecipeId,
    carried: Option<EmbeddedData>,
) -> Result<Option<PageContent>, ApiError> {
    if let Some(EmbeddedData::EditRecipe {
        recipe_id: carried_id,
        ..
    }) = &carried
    {
        if *carried_id == recipe_id {
            return Ok(Some(PageContent::new(location, PageKind::Develop, carried)));
        }
    }

    let versions = backend.list_versions(recipe_id).await?;
    if versions.is_empty() {
        return Ok(None);
    }

    let requested = location.version_id();
    let chosen = requested
        .and_then(|id| versions.iter().find(|v| v.id == id))
        .unwrap_or(&versions[0]);
    let detail = backend.version(chosen.id).await?;

    Ok(Some(PageContent::new(
        location,
        PageKind::Develop,
        Some(EmbeddedData::EditRecipe {
            recipe_id,
            version_id: requested,
            content: detail.content,
        }),
    )))
}

pub type NavigationToken = u64;

/// Moves resolved pages into view, one navigation at a time.
///
/// Each navigation gets a token. A resolved page is only accepted for the
/// newest token, and [`ContentLoader::take_ready`] hands it out exactly once;
/// pages are built from that and nothing else.
#[derive(Debug, Default)]
pub struct ContentLoader {
    token: NavigationToken,
    pending: Option<PageContent>,
    fired: bool,
    visible: Option<Location>,
}

impl ContentLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a navigation, superseding any unfinished one.
    pub fn begin(&mut self) -> NavigationToken {
        self.token += 1;
        self.pending = None;
        self.fired = false;
        self.token
    }

    /// Hand over a resolved page. Returns false if it belongs to a
    /// superseded navigation or this navigation already delivered.
    pub fn deliver(&mut self, token: NavigationToken, content: PageContent) -> bool {
        if token != self.token || self.fired || self.pending.is_some() {
            tracing::debug!("Dropping stale page for {}", content.location);
            return false;
        }
        self.pending = Some(content);
        true
    }

    /// The readiness signal: the pending page, moved into the visible slot.
    /// `Some` at most once per navigation.
    pub fn take_ready(&mut self) -> Option<PageContent> {
        let content = self.pending.take()?;
        self.fired = true;
        self.visible = Some(content.location.clone());
        Some(content)
    }

    pub fn is_current(&self, token: NavigationToken) -> bool {
        token == self.token
    }

    pub fn is_loading(&self) -> bool {
        !self.fired
    }

    pub fn visible(&self) -> Option<&Location> {
        self.visible.as_ref()
    }

    /// Keep the visible location in step with in-page replacements. Refused
    /// while a navigation is pending: the outgoing page no longer owns the
    /// current entry.
    pub fn replace_visible(&mut self, location: Location) -> bool {
        if self.is_loading() {
            tracing::debug!("Ignoring replacement {} during navigation", location);
            return false;
        }
        self.visible = Some(location);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{content, version, Call, FakeBackend};
    use crate::models::VersionSummary;

    fn versions_of(recipe: &[RecipeVersion]) -> Vec<VersionSummary> {
        recipe.iter().map(VersionSummary::from).collect()
    }

    fn backend() -> FakeBackend {
        let v1 = version(7, 3, 1, "Soup");
        let v2 = version(8, 3, 2, "Better Soup");
        FakeBackend::new()
            .with_versions(3, versions_of(&[v2.clone(), v1.clone()]))
            .with_version(v1)
            .with_version(v2)
    }

    #[tokio::test]
    async fn test_develop_and_pantry_need_no_requests() {
        let backend = FakeBackend::new();
        let page = resolve_page(&backend, Location::root(), None, vec![])
            .await
            .unwrap();
        assert_eq!(page.kind, PageKind::Develop);
        assert_eq!(page.embedded, None);

        let page = resolve_page(&backend, Location::pantry(), None, vec![])
            .await
            .unwrap();
        assert_eq!(page.kind, PageKind::Pantry);
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_view_embeds_latest_version() {
        let backend = backend();
        let page = resolve_page(&backend, Location::recipe(3), None, vec![])
            .await
            .unwrap();
        assert_eq!(page.kind, PageKind::View);
        let Some(EmbeddedData::Recipe {
            latest, versions, ..
        }) = page.embedded
        else {
            panic!("expected recipe data");
        };
        assert_eq!(latest.id, 8);
        assert_eq!(versions.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_recipe_redirects_with_flash() {
        let backend = FakeBackend::new();
        let carried = vec![FlashNotice::new("info", "hello")];
        let page = resolve_page(&backend, Location::recipe(99), None, carried)
            .await
            .unwrap();
        assert_eq!(page.location, Location::root());
        assert_eq!(page.kind, PageKind::Develop);
        assert_eq!(
            page.flashes,
            [
                FlashNotice::new("info", "hello"),
                FlashNotice::new("error", RECIPE_NOT_FOUND)
            ]
        );
    }

    #[tokio::test]
    async fn test_unknown_path_redirects_home() {
        let backend = FakeBackend::new();
        let page = resolve_page(&backend, Location::parse("/nope").unwrap(), None, vec![])
            .await
            .unwrap();
        assert_eq!(page.location, Location::root());
        assert_eq!(page.flashes, [FlashNotice::new("error", PAGE_NOT_FOUND)]);
    }

    #[tokio::test]
    async fn test_edit_uses_carried_data_without_fetching() {
        let backend = backend();
        let carried = EmbeddedData::EditRecipe {
            recipe_id: 3,
            version_id: Some(7),
            content: content("Soup", "- salt", "1. Boil"),
        };
        let location = Location::edit(3).with_version_id(Some(7));
        let page = resolve_page(&backend, location, Some(carried.clone()), vec![])
            .await
            .unwrap();
        assert_eq!(page.embedded, Some(carried));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_edit_fetches_requested_version() {
        let backend = backend();
        let location = Location::edit(3).with_version_id(Some(7));
        let page = resolve_page(&backend, location, None, vec![]).await.unwrap();
        let Some(EmbeddedData::EditRecipe {
            version_id, content, ..
        }) = page.embedded
        else {
            panic!("expected edit data");
        };
        assert_eq!(version_id, Some(7));
        assert_eq!(content.title, "Soup");
        assert_eq!(backend.calls(), [Call::ListVersions(3), Call::Version(7)]);
    }

    #[tokio::test]
    async fn test_edit_falls_back_to_latest_for_foreign_version() {
        let backend = backend();
        let location = Location::edit(3).with_version_id(Some(500));
        let page = resolve_page(&backend, location, None, vec![]).await.unwrap();
        assert!(backend.calls().contains(&Call::Version(8)));
        assert!(matches!(
            page.embedded,
            Some(EmbeddedData::EditRecipe { recipe_id: 3, .. })
        ));
    }

    #[tokio::test]
    async fn test_signed_out_propagates() {
        let backend = FakeBackend::new().failing("list_versions", ApiError::SignedOut);
        let err = resolve_page(&backend, Location::recipe(3), None, vec![])
            .await
            .unwrap_err();
        assert!(err.is_signed_out());
    }

    #[tokio::test]
    async fn test_transport_failure_redirects_with_message() {
        let backend = FakeBackend::new()
            .failing("list_versions", ApiError::Transport("connection refused".into()));
        let page = resolve_page(&backend, Location::recipe(3), None, vec![])
            .await
            .unwrap();
        assert_eq!(page.flashes, [FlashNotice::new("error", "connection refused")]);
    }

    fn page(path: &str) -> PageContent {
        PageContent::new(Location::parse(path).unwrap(), PageKind::Develop, None)
    }

    #[test]
    fn test_readiness_fires_once() {
        let mut loader = ContentLoader::new();
        let token = loader.begin();
        assert!(loader.is_loading());
        assert!(loader.take_ready().is_none());

        assert!(loader.deliver(token, page("/")));
        let ready = loader.take_ready().unwrap();
        assert_eq!(ready.location, Location::root());
        assert_eq!(loader.visible(), Some(&Location::root()));
        assert!(!loader.is_loading());

        assert!(loader.take_ready().is_none());
        assert!(!loader.deliver(token, page("/")));
        assert!(loader.take_ready().is_none());
    }

    #[test]
    fn test_replacement_refused_while_navigating() {
        let mut loader = ContentLoader::new();
        let token = loader.begin();
        loader.deliver(token, page("/3"));
        loader.take_ready();

        assert!(loader.replace_visible(Location::parse("/3?version_id=9").unwrap()));
        assert_eq!(loader.visible(), Some(&Location::parse("/3?version_id=9").unwrap()));

        // A late version fetch from /3 lands after /pantry was requested.
        loader.begin();
        assert!(!loader.replace_visible(Location::parse("/3?version_id=8").unwrap()));
        assert_eq!(loader.visible(), Some(&Location::parse("/3?version_id=9").unwrap()));
    }

    #[test]
    fn test_stale_page_is_dropped() {
        let mut loader = ContentLoader::new();
        let first = loader.begin();
        let second = loader.begin();
        assert!(!loader.is_current(first));

        assert!(!loader.deliver(first, page("/1")));
        assert!(loader.take_ready().is_none());

        assert!(loader.deliver(second, page("/2")));
        assert_eq!(loader.take_ready().unwrap().location.to_string(), "/2");
    }

    #[test]
    fn test_new_navigation_discards_pending() {
        let mut loader = ContentLoader::new();
        let first = loader.begin();
        assert!(loader.deliver(first, page("/1")));
        let _second = loader.begin();
        assert!(loader.take_ready().is_none());
    }
}
