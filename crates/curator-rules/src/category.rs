//! Asset categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the fixed buckets assets are organised into.
///
/// Declaration order is the iteration order used for scanning and for
/// gallery output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Environments,
    Weapons,
    Vehicles,
    Factions,
    Renders,
    Ui,
}

impl Category {
    /// All categories in scan order.
    pub const ALL: [Category; 6] = [
        Category::Environments,
        Category::Weapons,
        Category::Vehicles,
        Category::Factions,
        Category::Renders,
        Category::Ui,
    ];

    /// Directory and wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Environments => "environments",
            Category::Weapons => "weapons",
            Category::Vehicles => "vehicles",
            Category::Factions => "factions",
            Category::Renders => "renders",
            Category::Ui => "ui",
        }
    }

    /// Name with the first letter capitalised ("Weapons", "Ui").
    pub fn label(&self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown category name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category '{0}' (expected one of: environments, weapons, vehicles, factions, renders, ui)")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
