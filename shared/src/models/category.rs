//! Category Model

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed classification of a catalog item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Drinks,
    Desserts,
    Salads,
    Dishes,
    Other,
}

impl Category {
    /// All categories in menu tab order
    pub const ALL: [Category; 5] = [
        Category::Drinks,
        Category::Desserts,
        Category::Salads,
        Category::Dishes,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Drinks => "drinks",
            Category::Desserts => "desserts",
            Category::Salads => "salads",
            Category::Dishes => "dishes",
            Category::Other => "other",
        }
    }

    /// Map a backend category label onto the closed set.
    ///
    /// Matching is case-insensitive and accepts singular forms plus the
    /// labels the backend has used historically. Anything unrecognised is
    /// `Other`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "drinks" | "drink" | "coffee" | "beverage" | "beverages" => Category::Drinks,
            "desserts" | "dessert" | "cake" | "cakes" => Category::Desserts,
            "salads" | "salad" => Category::Salads,
            "dishes" | "dish" | "food" | "meal" | "meals" => Category::Dishes,
            _ => Category::Other,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                AppError::validation(format!("Unknown category: {}", s)).with_detail("category", s)
            })
    }
}

/// Category selection in the menu: every category, or exactly one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(selected) => *selected == category,
        }
    }

    /// The selected category, `None` for `All`
    pub fn category(&self) -> Option<Category> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Only(c) => Some(*c),
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        CategoryFilter::Only(category)
    }
}

impl FromStr for CategoryFilter {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(CategoryFilter::All)
        } else {
            s.parse().map(CategoryFilter::Only)
        }
    }
}

impl TryFrom<String> for CategoryFilter {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        match filter {
            CategoryFilter::All => "all".to_string(),
            CategoryFilter::Only(c) => c.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label_is_lenient() {
        assert_eq!(Category::from_label("Coffee"), Category::Drinks);
        assert_eq!(Category::from_label("DESSERT"), Category::Desserts);
        assert_eq!(Category::from_label(" salads "), Category::Salads);
        assert_eq!(Category::from_label("meal"), Category::Dishes);
        assert_eq!(Category::from_label("merch"), Category::Other);
    }

    #[test]
    fn test_from_str_is_strict() {
        assert_eq!("Drinks".parse::<Category>().unwrap(), Category::Drinks);
        assert!("coffee".parse::<Category>().is_err());
    }

    #[test]
    fn test_filter_parse_and_match() {
        let all: CategoryFilter = "all".parse().unwrap();
        assert_eq!(all, CategoryFilter::All);
        assert!(all.matches(Category::Salads));

        let drinks: CategoryFilter = "drinks".parse().unwrap();
        assert!(drinks.matches(Category::Drinks));
        assert!(!drinks.matches(Category::Dishes));
        assert_eq!(drinks.category(), Some(Category::Drinks));
    }

    #[test]
    fn test_filter_serde() {
        let json = serde_json::to_string(&CategoryFilter::Only(Category::Desserts)).unwrap();
        assert_eq!(json, "\"desserts\"");
        let filter: CategoryFilter = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(filter, CategoryFilter::All);
        assert!(serde_json::from_str::<CategoryFilter>("\"pastries\"").is_err());
    }
}
