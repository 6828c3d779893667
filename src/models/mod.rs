pub mod conversation;
pub mod pantry;
pub mod preferences;
pub mod recipe;
pub mod timestamp;
pub mod version;

pub use conversation::{ConversationTurn, Role};
pub use pantry::PantryItem;
pub use preferences::{DietType, DietaryPreferences};
pub use recipe::{RecipeContent, RecipeId, RecipeLines, RecipeSummary};
pub use version::{RecipeVersion, VersionId, VersionSummary};
