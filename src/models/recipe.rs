use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::timestamp;

pub type RecipeId = i64;

/// Ordered display lines for ingredients or steps.
///
/// The server stores these as one newline-delimited block, but payloads built
/// elsewhere may carry a list. Both collapse into this one representation when
/// the payload is decoded, so nothing downstream has to care which it was.
/// Lines keep whatever bullet or ordinal markers they were written with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeLines(Vec<String>);

impl RecipeLines {
    pub fn from_text(text: &str) -> Self {
        Self(
            text.split('\n')
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn from_list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            items
                .into_iter()
                .map(Into::into)
                .filter(|line: &String| !line.trim().is_empty())
                .collect(),
        )
    }

    pub fn lines(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The newline-joined block, as the server stores it.
    pub fn to_text(&self) -> String {
        self.0.join("\n")
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LinesRepr {
    Text(String),
    List(Vec<String>),
}

impl<'de> Deserialize<'de> for RecipeLines {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = Option::<LinesRepr>::deserialize(deserializer)?;
        Ok(match repr {
            Some(LinesRepr::Text(text)) => Self::from_text(&text),
            Some(LinesRepr::List(items)) => Self::from_list(items),
            None => Self::default(),
        })
    }
}

impl Serialize for RecipeLines {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_text())
    }
}

/// The displayable body shared by recipes, versions and generation results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeContent {
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "non_empty")]
    pub description: Option<String>,
    #[serde(default)]
    pub ingredients: RecipeLines,
    #[serde(default)]
    pub steps: RecipeLines,
    #[serde(default, deserialize_with = "non_empty")]
    pub tips: Option<String>,
}

/// Sidebar entry from `/recipes/list`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecipeSummary {
    pub id: RecipeId,
    #[serde(default, alias = "name", deserialize_with = "non_empty")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "non_empty")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "timestamp::lenient")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::lenient")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl RecipeSummary {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled")
    }

    pub fn path(&self) -> String {
        format!("/{}", self.id)
    }
}

/// Treats `null` and blank strings alike.
pub(crate) fn non_empty<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
