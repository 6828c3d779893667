use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::recipe::{RecipeContent, RecipeId};
use super::timestamp;

pub type VersionId = i64;

/// Full version detail from `/recipes/versions/{id}`.
///
/// Versions are immutable once the server creates them; a newer one
/// supersedes but never replaces an older one.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecipeVersion {
    pub id: VersionId,
    #[serde(default)]
    pub recipe_id: Option<RecipeId>,
    #[serde(default)]
    pub version: u32,
    #[serde(flatten)]
    pub content: RecipeContent,
    #[serde(default, deserialize_with = "timestamp::lenient")]
    pub created_at: Option<DateTime<Utc>>,
}

/// One row of `/recipes/versions?recipe_id=`, newest first.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VersionSummary {
    pub id: VersionId,
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "timestamp::lenient")]
    pub created_at: Option<DateTime<Utc>>,
}

impl VersionSummary {
    pub fn label(&self) -> String {
        format!("v{}", self.version)
    }
}

impl From<&RecipeVersion> for VersionSummary {
    fn from(version: &RecipeVersion) -> Self {
        Self {
            id: version.id,
            version: version.version,
            title: version.content.title.clone(),
            created_at: version.created_at,
        }
    }
}
