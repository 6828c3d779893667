use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PantryItem {
    pub id: Option<i64>,
    pub name: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PantryItemRepr {
    Name(String),
    Full {
        #[serde(default)]
        id: Option<i64>,
        #[serde(default)]
        name: Option<String>,
    },
}

// Older server builds list bare names; those items have no id and cannot be
// removed individually.
impl<'de> Deserialize<'de> for PantryItem {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match PantryItemRepr::deserialize(deserializer)? {
            PantryItemRepr::Name(name) => PantryItem { id: None, name },
            PantryItemRepr::Full { id, name } => PantryItem {
                id,
                name: name.unwrap_or_else(|| "Unknown".to_string()),
            },
        })
    }
}

impl PantryItem {
    pub fn is_removable(&self) -> bool {
        self.id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_item_shapes() {
        let items: Vec<PantryItem> =
            serde_json::from_str(r#"["rice", {"id": 4, "name": "beans"}, {"id": 5}]"#).unwrap();
        assert_eq!(items[0], PantryItem { id: None, name: "rice".into() });
        assert!(!items[0].is_removable());
        assert_eq!(items[1].id, Some(4));
        assert_eq!(items[2].name, "Unknown");
    }
}
