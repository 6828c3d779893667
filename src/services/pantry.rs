use std::collections::HashSet;

use crate::models::PantryItem;

pub const EMPTY_INPUT: &str = "Please enter at least one item.";
pub const NO_VALID_ITEMS: &str = "Please enter at least one valid item.";

/// Split pantry input on commas and newlines into lowercase names with
/// duplicates and blanks removed, keeping first-seen order.
pub fn parse_pantry_input(input: &str) -> Result<Vec<String>, &'static str> {
    if input.trim().is_empty() {
        return Err(EMPTY_INPUT);
    }

    let mut seen = HashSet::new();
    let items: Vec<String> = input
        .split([',', '\n'])
        .map(|item| item.trim().to_lowercase())
        .filter(|item| !item.is_empty())
        .filter(|item| seen.insert(item.clone()))
        .collect();

    if items.is_empty() {
        return Err(NO_VALID_ITEMS);
    }
    Ok(items)
}

/// The body for replacing the whole pantry during registration. Blank input
/// means the step was skipped.
pub fn seed_payload(input: &str) -> Result<Option<String>, &'static str> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    parse_pantry_input(input).map(|items| Some(items.join(",")))
}

/// What the pantry list area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PantryView {
    Loading,
    Empty,
    Items(Vec<PantryItem>),
    Error(String),
}

impl PantryView {
    pub fn from_items(items: Vec<PantryItem>) -> Self {
        if items.is_empty() {
            PantryView::Empty
        } else {
            PantryView::Items(items)
        }
    }

    pub fn count_label(&self) -> Option<String> {
        match self {
            PantryView::Items(items) => {
                let n = items.len();
                Some(format!("{} ingredient{}", n, if n == 1 { "" } else { "s" }))
            }
            _ => None,
        }
    }

    pub fn placeholder(&self) -> Option<String> {
        match self {
            PantryView::Loading => Some("Loading…".to_string()),
            PantryView::Empty => Some("Your pantry is empty!".to_string()),
            PantryView::Error(message) => Some(format!("Error loading pantry items: {}", message)),
            PantryView::Items(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_separators_and_case() {
        assert_eq!(
            parse_pantry_input("eggs, milk\nFlour, EGGS").unwrap(),
            ["eggs", "milk", "flour"]
        );
    }

    #[test]
    fn test_no_duplicates_or_blanks() {
        let inputs = [
            "a,,b\n\n,A",
            " Salt , salt,SALT ",
            "x\ny\nx\nY\n",
            "olive oil, Olive Oil ,olive  oil",
        ];
        for input in inputs {
            let items = parse_pantry_input(input).unwrap();
            let unique: HashSet<_> = items.iter().collect();
            assert_eq!(unique.len(), items.len(), "{input:?}");
            assert!(items.iter().all(|i| !i.is_empty() && *i == i.to_lowercase()));
        }
    }

    #[test]
    fn test_empty_and_separator_only_input() {
        assert_eq!(parse_pantry_input("   "), Err(EMPTY_INPUT));
        assert_eq!(parse_pantry_input(" ,\n , "), Err(NO_VALID_ITEMS));
    }

    #[test]
    fn test_seed_payload_is_deduplicated() {
        assert_eq!(
            seed_payload("eggs, milk\nFlour, EGGS"),
            Ok(Some("eggs,milk,flour".to_string()))
        );
        assert_eq!(seed_payload("eggs\nmilk"), Ok(Some("eggs,milk".to_string())));
        assert_eq!(seed_payload(" \n "), Ok(None));
        assert_eq!(seed_payload(",\n,"), Err(NO_VALID_ITEMS));
    }

    #[test]
    fn test_view_labels() {
        let view = PantryView::from_items(vec![]);
        assert_eq!(view, PantryView::Empty);
        assert_eq!(view.placeholder().as_deref(), Some("Your pantry is empty!"));

        let view = PantryView::from_items(vec![PantryItem {
            id: Some(1),
            name: "rice".into(),
        }]);
        assert_eq!(view.count_label().as_deref(), Some("1 ingredient"));
        assert_eq!(PantryView::Empty.count_label(), None);
        assert_eq!(view.placeholder(), None);
    }
}
