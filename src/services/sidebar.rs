use crate::models::RecipeSummary;

use super::location::Location;

pub const LOAD_ERROR: &str = "Error loading recipes";

/// Cached recipe summaries plus the active search query.
///
/// Filtering never touches the network; it runs over the snapshot from the
/// last successful load. A failed load keeps that snapshot.
#[derive(Debug, Default)]
pub struct RecipeIndex {
    cached: Vec<RecipeSummary>,
    query: String,
    load_error: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarEntry {
    pub id: i64,
    pub title: String,
    pub path: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarView {
    Entries(Vec<SidebarEntry>),
    Placeholder(&'static str),
    Error(&'static str),
}

impl RecipeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply_loaded(&mut self, recipes: Vec<RecipeSummary>) {
        self.cached = recipes;
        self.load_error = false;
    }

    pub fn apply_failure(&mut self) {
        self.load_error = true;
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn has_query(&self) -> bool {
        !self.query.trim().is_empty()
    }

    pub fn cached(&self) -> &[RecipeSummary] {
        &self.cached
    }

    /// Case-insensitive substring match on title and description. A blank
    /// query matches everything.
    pub fn filter(&self, query: &str) -> Vec<&RecipeSummary> {
        if query.trim().is_empty() {
            return self.cached.iter().collect();
        }
        let needle = query.to_lowercase();
        self.cached
            .iter()
            .filter(|recipe| {
                recipe
                    .title
                    .as_deref()
                    .unwrap_or_default()
                    .to_lowercase()
                    .contains(&needle)
                    || recipe
                        .description
                        .as_deref()
                        .unwrap_or_default()
                        .to_lowercase()
                        .contains(&needle)
            })
            .collect()
    }

    /// What the list should show for the current query and location.
    pub fn view(&self, current: &Location) -> SidebarView {
        if self.load_error {
            return SidebarView::Error(LOAD_ERROR);
        }

        let matches = self.filter(&self.query);
        if matches.is_empty() {
            return SidebarView::Placeholder(if self.has_query() {
                "No matching recipes"
            } else {
                "No recipes yet"
            });
        }

        SidebarView::Entries(
            matches
                .into_iter()
                .map(|recipe| {
                    let path = recipe.path();
                    SidebarEntry {
                        id: recipe.id,
                        title: recipe.display_title().to_string(),
                        active: current.is_path(&path),
                        path,
                    }
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::summary;

    fn index() -> RecipeIndex {
        let mut index = RecipeIndex::new();
        index.apply_loaded(vec![
            summary(1, "Tomato Soup", Some("Quick and warm")),
            summary(2, "Pasta", Some("With tomato sauce")),
            summary(3, "Pancakes", None),
        ]);
        index
    }

    #[test]
    fn test_empty_filter_is_identity() {
        let index = index();
        let all: Vec<_> = index.cached().iter().collect();
        assert_eq!(index.filter(""), all);
        assert_eq!(index.filter("   "), all);
    }

    #[test]
    fn test_filter_matches_title_and_description() {
        let index = index();
        let ids: Vec<_> = index.filter("TOMATO").iter().map(|r| r.id).collect();
        assert_eq!(ids, [1, 2]);
        let ids: Vec<_> = index.filter("cake").iter().map(|r| r.id).collect();
        assert_eq!(ids, [3]);
    }

    #[test]
    fn test_active_entry_follows_location() {
        let index = index();
        let location = Location::parse("/2/?version_id=5").unwrap();
        let SidebarView::Entries(entries) = index.view(&location) else {
            panic!("expected entries");
        };
        let active: Vec<_> = entries.iter().filter(|e| e.active).map(|e| e.id).collect();
        assert_eq!(active, [2]);

        let SidebarView::Entries(entries) = index.view(&Location::edit(2)) else {
            panic!("expected entries");
        };
        assert!(entries.iter().all(|e| !e.active));
    }

    #[test]
    fn test_empty_states() {
        let mut index = RecipeIndex::new();
        assert_eq!(
            index.view(&Location::root()),
            SidebarView::Placeholder("No recipes yet")
        );

        let mut index_with = self::index();
        index_with.set_query("zzz");
        assert_eq!(
            index_with.view(&Location::root()),
            SidebarView::Placeholder("No matching recipes")
        );

        index.apply_failure();
        assert_eq!(index.view(&Location::root()), SidebarView::Error(LOAD_ERROR));
    }

    #[test]
    fn test_failed_reload_keeps_snapshot_and_query_survives_reload() {
        let mut index = index();
        index.set_query("pan");
        index.apply_failure();
        assert_eq!(index.cached().len(), 3);

        index.apply_loaded(vec![summary(4, "Pan Pizza", None), summary(5, "Salad", None)]);
        let SidebarView::Entries(entries) = index.view(&Location::root()) else {
            panic!("expected entries");
        };
        assert_eq!(entries.iter().map(|e| e.id).collect::<Vec<_>>(), [4]);
    }
}
