//! The closed set of labels used to classify transactions and budgets.
//!
//! Categories are a fixed enumeration rather than user-managed rows: every
//! transaction and budget carries exactly one of the 17 labels below, and the
//! reporting views are keyed on them.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};

/// A category for expenses and income, e.g. 'Groceries', 'Dining Out'.
///
/// Each category is bound to a display color so that clients do not need
/// their own lookup table; see [Category::color].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Rent, mortgage and other housing costs.
    Housing,
    /// Public transport, fuel and vehicle costs.
    Transportation,
    /// Supermarket shopping.
    Groceries,
    /// Restaurants, cafes and takeaways.
    #[serde(rename = "Dining Out")]
    DiningOut,
    /// Power, water and other utilities.
    Utilities,
    /// Internet and phone plans.
    #[serde(rename = "Internet & Phone")]
    InternetAndPhone,
    /// Movies, games, streaming subscriptions.
    Entertainment,
    /// Doctor visits, medication, health insurance excesses.
    Healthcare,
    /// Clothing and general retail.
    Shopping,
    /// Courses, books, tuition.
    Education,
    /// Flights, accommodation, holidays.
    Travel,
    /// Insurance premiums.
    Insurance,
    /// Contributions to investment accounts.
    Investments,
    /// Gifts and charitable donations.
    #[serde(rename = "Gifts & Donations")]
    GiftsAndDonations,
    /// Haircuts, cosmetics and the like.
    #[serde(rename = "Personal Care")]
    PersonalCare,
    /// Gym memberships and sports.
    Fitness,
    /// Anything that does not fit the other categories.
    Other,
}

/// Every category, in display order.
pub const ALL_CATEGORIES: [Category; 17] = [
    Category::Housing,
    Category::Transportation,
    Category::Groceries,
    Category::DiningOut,
    Category::Utilities,
    Category::InternetAndPhone,
    Category::Entertainment,
    Category::Healthcare,
    Category::Shopping,
    Category::Education,
    Category::Travel,
    Category::Insurance,
    Category::Investments,
    Category::GiftsAndDonations,
    Category::PersonalCare,
    Category::Fitness,
    Category::Other,
];

impl Category {
    /// The category's display label, e.g. "Dining Out".
    ///
    /// This is the exact string used in JSON payloads and in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Housing => "Housing",
            Category::Transportation => "Transportation",
            Category::Groceries => "Groceries",
            Category::DiningOut => "Dining Out",
            Category::Utilities => "Utilities",
            Category::InternetAndPhone => "Internet & Phone",
            Category::Entertainment => "Entertainment",
            Category::Healthcare => "Healthcare",
            Category::Shopping => "Shopping",
            Category::Education => "Education",
            Category::Travel => "Travel",
            Category::Insurance => "Insurance",
            Category::Investments => "Investments",
            Category::GiftsAndDonations => "Gifts & Donations",
            Category::PersonalCare => "Personal Care",
            Category::Fitness => "Fitness",
            Category::Other => "Other",
        }
    }

    /// The hex color used to display the category in charts.
    pub fn color(self) -> &'static str {
        match self {
            Category::Housing => "#FF6B6B",
            Category::Transportation => "#4ECDC4",
            Category::Groceries => "#45B7D1",
            Category::DiningOut => "#96CEB4",
            Category::Utilities => "#FFEEAD",
            Category::InternetAndPhone => "#D4A5A5",
            Category::Entertainment => "#9B5DE5",
            Category::Healthcare => "#F15BB5",
            Category::Shopping => "#00BBF9",
            Category::Education => "#FFA07A",
            Category::Travel => "#98FB98",
            Category::Insurance => "#DDA0DD",
            Category::Investments => "#87CEEB",
            Category::GiftsAndDonations => "#FFB6C1",
            Category::PersonalCare => "#E6E6FA",
            Category::Fitness => "#B8860B",
            Category::Other => "#757575",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The error returned when a string is not one of the 17 category labels.
#[derive(Debug, thiserror::Error, PartialEq)]
#[error("{0:?} is not a valid category")]
pub struct ParseCategoryError(String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_CATEGORIES
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| ParseCategoryError(s.to_owned()))
    }
}

impl ToSql for Category {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Category {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error: ParseCategoryError| FromSqlError::Other(Box::new(error)))
    }
}

#[cfg(test)]
mod category_tests {
    use std::collections::HashSet;

    use crate::category::{ALL_CATEGORIES, Category};

    #[test]
    fn there_are_seventeen_categories() {
        assert_eq!(ALL_CATEGORIES.len(), 17);
    }

    #[test]
    fn labels_round_trip_through_parse() {
        for category in ALL_CATEGORIES {
            let parsed: Category = category.as_str().parse().expect("Could not parse label");
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn serde_uses_display_labels() {
        for category in ALL_CATEGORIES {
            let json = serde_json::to_string(&category).expect("Could not serialize category");
            assert_eq!(json, format!("{:?}", category.as_str()));

            let parsed: Category =
                serde_json::from_str(&json).expect("Could not deserialize category");
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn unknown_label_is_rejected() {
        let result = serde_json::from_str::<Category>("\"Crypto\"");
        assert!(result.is_err());

        let result = "Crypto".parse::<Category>();
        assert!(result.is_err());
    }

    #[test]
    fn colors_are_distinct_hex_strings() {
        let colors: HashSet<&str> = ALL_CATEGORIES
            .into_iter()
            .map(Category::color)
            .inspect(|color| {
                assert!(color.starts_with('#') && color.len() == 7, "got {color:?}");
            })
            .collect();

        assert_eq!(colors.len(), ALL_CATEGORIES.len());
    }
}
