use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DietType {
    #[default]
    Omnivore,
    Vegetarian,
    Vegan,
    Pescatarian,
    Keto,
    Paleo,
    GlutenFree,
    DairyFree,
    /// Whatever the server stored that this build does not know about.
    #[serde(untagged)]
    Other(String),
}

impl DietType {
    pub const KNOWN: [DietType; 8] = [
        DietType::Omnivore,
        DietType::Vegetarian,
        DietType::Vegan,
        DietType::Pescatarian,
        DietType::Keto,
        DietType::Paleo,
        DietType::GlutenFree,
        DietType::DairyFree,
    ];

    pub fn display_name(&self) -> &str {
        match self {
            DietType::Omnivore => "Omnivore",
            DietType::Vegetarian => "Vegetarian",
            DietType::Vegan => "Vegan",
            DietType::Pescatarian => "Pescatarian",
            DietType::Keto => "Keto",
            DietType::Paleo => "Paleo",
            DietType::GlutenFree => "Gluten-free",
            DietType::DairyFree => "Dairy-free",
            DietType::Other(name) => name,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DietaryPreferences {
    #[serde(default)]
    pub diet_type: DietType,
    #[serde(default)]
    pub foods_to_avoid: String,
    #[serde(default)]
    pub foods_i_love: String,
}
