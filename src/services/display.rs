use std::sync::LazyLock;

use regex::Regex;

use crate::models::RecipeContent;

static INGREDIENT_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-•*–—]\s*").expect("ingredient marker pattern"));
static STEP_ORDINAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[.)]\s*").expect("step ordinal pattern"));

/// `"- salt"` → `"salt"`. Only the rendered copy is touched.
pub fn strip_ingredient_marker(line: &str) -> String {
    INGREDIENT_MARKER.replace(line.trim(), "").trim().to_string()
}

/// `"2) Stir"` → `"Stir"`.
pub fn strip_step_number(line: &str) -> String {
    STEP_ORDINAL.replace(line.trim(), "").trim().to_string()
}

/// What the recipe content area shows for one recipe or version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeDisplay {
    pub title: String,
    pub description: Option<String>,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub tips: Option<String>,
}

impl From<&RecipeContent> for RecipeDisplay {
    fn from(content: &RecipeContent) -> Self {
        Self {
            title: content.title.clone(),
            description: content.description.clone(),
            ingredients: content
                .ingredients
                .lines()
                .iter()
                .map(|line| strip_ingredient_marker(line))
                .filter(|line| !line.is_empty())
                .collect(),
            steps: content
                .steps
                .lines()
                .iter()
                .map(|line| strip_step_number(line))
                .filter(|line| !line.is_empty())
                .collect(),
            tips: content.tips.clone(),
        }
    }
}
