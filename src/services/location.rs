use std::fmt;

use url::Url;

use crate::config::VERSION_QUERY_PARAM;
use crate::models::{RecipeId, VersionId};

// Locations are server-relative; this origin only exists so `url` can do
// the path and query handling.
const ORIGIN: &str = "http://sous.local/";

/// Where the window currently is: a server-relative path plus query.
#[derive(Clone, PartialEq, Eq)]
pub struct Location {
    url: Url,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Develop,
    View(RecipeId),
    Edit(RecipeId),
    Pantry,
    NotFound,
}

impl Location {
    pub fn root() -> Self {
        Self::parse("/").unwrap_or_else(|_| unreachable!("root location is valid"))
    }

    pub fn parse(input: &str) -> Result<Self, url::ParseError> {
        let origin = Url::parse(ORIGIN)?;
        let mut url = origin.join(input.trim())?;
        // Only the path and query belong to a location.
        if url.origin() != origin.origin() {
            url = origin.join(&format!("{}{}", url.path(), query_suffix(&url)))?;
        }
        url.set_fragment(None);
        if url.query() == Some("") {
            url.set_query(None);
        }
        Ok(Self { url })
    }

    pub fn recipe(recipe_id: RecipeId) -> Self {
        Self::from_path(&format!("/{}", recipe_id))
    }

    pub fn edit(recipe_id: RecipeId) -> Self {
        Self::from_path(&format!("/recipes/{}/edit", recipe_id))
    }

    pub fn pantry() -> Self {
        Self::from_path("/pantry")
    }

    fn from_path(path: &str) -> Self {
        let mut location = Self::root();
        location.url.set_path(path);
        location
    }

    pub fn path(&self) -> &str {
        self.url.path()
    }

    pub fn query_param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    /// The selected version named in the query, if it is a usable id.
    pub fn version_id(&self) -> Option<VersionId> {
        self.query_param(VERSION_QUERY_PARAM)
            .and_then(|value| value.trim().parse::<VersionId>().ok())
            .filter(|id| *id > 0)
    }

    /// A copy with the version parameter set or removed; every other query
    /// parameter is kept in order.
    pub fn with_version_id(&self, version_id: Option<VersionId>) -> Self {
        let others: Vec<(String, String)> = self
            .url
            .query_pairs()
            .filter(|(key, _)| key != VERSION_QUERY_PARAM)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        let mut url = self.url.clone();
        url.set_query(None);
        if !others.is_empty() || version_id.is_some() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &others {
                pairs.append_pair(key, value);
            }
            if let Some(id) = version_id {
                pairs.append_pair(VERSION_QUERY_PARAM, &id.to_string());
            }
        }
        Self { url }
    }

    pub fn route(&self) -> Route {
        let segments: Vec<&str> = self
            .path()
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        match segments.as_slice() {
            [] => Route::Develop,
            ["pantry"] => Route::Pantry,
            [id] => id.parse().map(Route::View).unwrap_or(Route::NotFound),
            ["recipes", id, "edit"] => id.parse().map(Route::Edit).unwrap_or(Route::NotFound),
            _ => Route::NotFound,
        }
    }

    /// Path equality, ignoring a trailing slash.
    pub fn is_path(&self, path: &str) -> bool {
        normalize(self.path()) == normalize(path)
    }
}

fn normalize(path: &str) -> &str {
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

fn query_suffix(url: &Url) -> String {
    url.query().map(|q| format!("?{}", q)).unwrap_or_default()
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.url.path(), query_suffix(&self.url))
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Location({})", self)
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::root()
    }
}

/// Back/forward list of visited locations.
///
/// `push` records a navigation; `replace` rewrites the current entry in
/// place, which is how version selection updates the location without
/// adding history.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Location>,
    index: usize,
}

impl History {
    pub fn new(start: Location) -> Self {
        Self {
            entries: vec![start],
            index: 0,
        }
    }

    pub fn current(&self) -> &Location {
        &self.entries[self.index]
    }

    pub fn push(&mut self, location: Location) {
        self.entries.truncate(self.index + 1);
        self.entries.push(location);
        self.index = self.entries.len() - 1;
    }

    pub fn replace(&mut self, location: Location) {
        self.entries[self.index] = location;
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn back(&mut self) -> Option<&Location> {
        if !self.can_go_back() {
            return None;
        }
        self.index -= 1;
        Some(self.current())
    }

    pub fn forward(&mut self) -> Option<&Location> {
        if !self.can_go_forward() {
            return None;
        }
        self.index += 1;
        Some(self.current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes() {
        assert_eq!(Location::parse("/").unwrap().route(), Route::Develop);
        assert_eq!(Location::parse("").unwrap().route(), Route::Develop);
        assert_eq!(Location::parse("/12").unwrap().route(), Route::View(12));
        assert_eq!(Location::parse("/12/").unwrap().route(), Route::View(12));
        assert_eq!(
            Location::parse("/recipes/12/edit?version_id=3").unwrap().route(),
            Route::Edit(12)
        );
        assert_eq!(Location::parse("/pantry").unwrap().route(), Route::Pantry);
        assert_eq!(Location::parse("/abc").unwrap().route(), Route::NotFound);
        assert_eq!(Location::parse("/recipes/x/edit").unwrap().route(), Route::NotFound);
    }

    #[test]
    fn test_full_urls_keep_only_path_and_query() {
        let location = Location::parse("https://remy.example/7?version_id=2#top").unwrap();
        assert_eq!(location.to_string(), "/7?version_id=2");
    }

    #[test]
    fn test_version_id_parsing() {
        assert_eq!(Location::parse("/7?version_id=42").unwrap().version_id(), Some(42));
        assert_eq!(Location::parse("/7?version_id=abc").unwrap().version_id(), None);
        assert_eq!(Location::parse("/7?version_id=0").unwrap().version_id(), None);
        assert_eq!(Location::parse("/7").unwrap().version_id(), None);
    }

    #[test]
    fn test_with_version_id_keeps_other_params() {
        let location = Location::parse("/7?tab=steps&version_id=1").unwrap();
        assert_eq!(
            location.with_version_id(Some(5)).to_string(),
            "/7?tab=steps&version_id=5"
        );
        assert_eq!(location.with_version_id(None).to_string(), "/7?tab=steps");
        assert_eq!(
            Location::recipe(7).with_version_id(None).to_string(),
            "/7"
        );
    }

    #[test]
    fn test_is_path_ignores_trailing_slash() {
        let location = Location::parse("/7/?version_id=1").unwrap();
        assert!(location.is_path("/7"));
        assert!(location.is_path("/7/"));
        assert!(!location.is_path("/70"));
        assert!(Location::root().is_path("/"));
    }

    #[test]
    fn test_history_push_replace_back_forward() {
        let mut history = History::new(Location::root());
        history.push(Location::recipe(3));
        history.replace(Location::recipe(3).with_version_id(Some(9)));
        assert!(history.can_go_back());
        assert!(!history.can_go_forward());
        assert_eq!(history.current().to_string(), "/3?version_id=9");

        assert_eq!(history.back().map(|l| l.to_string()), Some("/".to_string()));
        assert!(history.back().is_none());
        history.push(Location::pantry());
        assert!(!history.can_go_forward());
        assert_eq!(history.back().map(|l| l.to_string()), Some("/".to_string()));
    }
}
