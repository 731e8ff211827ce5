//! Gallery allowlist overrides.

use serde_json::Value;
use std::collections::BTreeMap;

use crate::Category;

/// Errors for allowlist parsing.
#[derive(Debug, thiserror::Error)]
pub enum AllowlistError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("allowlist must be a JSON object mapping category to filenames")]
    NotAnObject,
}

/// Explicit gallery membership per category.
///
/// Parsing is lenient: unknown category keys, non-array values, and
/// non-string members are dropped rather than rejecting the whole file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Allowlist {
    entries: BTreeMap<Category, Vec<String>>,
}

impl Allowlist {
    /// Build an allowlist from explicit entries.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Category, Vec<S>)>,
        S: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(c, names)| (c, names.into_iter().map(Into::into).collect()))
                .collect(),
        }
    }

    /// Parse from JSON text.
    pub fn from_json(json: &str) -> Result<Self, AllowlistError> {
        let value: Value = serde_json::from_str(json)?;
        let Value::Object(map) = value else {
            return Err(AllowlistError::NotAnObject);
        };

        let mut entries = BTreeMap::new();
        for (key, value) in map {
            let Ok(category) = key.parse::<Category>() else {
                continue;
            };
            let Value::Array(items) = value else {
                continue;
            };
            let names: Vec<String> = items
                .into_iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect();
            entries.insert(category, names);
        }

        Ok(Self { entries })
    }

    /// The pinned filenames for `category`, if the allowlist governs it.
    ///
    /// Returns `None` when the category is absent or its list is empty, in
    /// which case heuristics apply.
    pub fn for_category(&self, category: Category) -> Option<&[String]> {
        self.entries
            .get(&category)
            .filter(|names| !names.is_empty())
            .map(Vec::as_slice)
    }

    /// Number of categories with a non-empty list.
    pub fn governed_categories(&self) -> usize {
        self.entries.values().filter(|v| !v.is_empty()).count()
    }
}
