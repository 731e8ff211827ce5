//! Asset manifest (manifest.json)
//!
//! Lists every filter-surviving file per category with its size and mtime.
//! The site reads it for gallery stats; it is rewritten in full on each scan.

use chrono::{DateTime, Utc};
use curator_rules::Category;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use crate::scan::AssetFile;

/// A single file in the manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// File name within the category directory
    pub filename: String,

    /// Size in bytes
    pub size: u64,

    /// Last modification time
    #[serde(with = "iso_millis")]
    pub modified: DateTime<Utc>,
}

impl From<&AssetFile> for ManifestEntry {
    fn from(file: &AssetFile) -> Self {
        Self {
            filename: file.filename.clone(),
            size: file.size_bytes,
            modified: file.modified,
        }
    }
}

/// Files of one category keyed by file name
pub type CategoryEntries = BTreeMap<String, ManifestEntry>;

/// The manifest document
///
/// Field order is the wire order: categories in scan order, then `total`
/// and `lastUpdated`. Keys written by other tools are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default)]
    pub environments: CategoryEntries,
    #[serde(default)]
    pub weapons: CategoryEntries,
    #[serde(default)]
    pub vehicles: CategoryEntries,
    #[serde(default)]
    pub factions: CategoryEntries,
    #[serde(default)]
    pub renders: CategoryEntries,
    #[serde(default)]
    pub ui: CategoryEntries,

    /// Number of files across all categories
    #[serde(default)]
    pub total: usize,

    /// When the scan ran
    #[serde(with = "iso_millis")]
    pub last_updated: DateTime<Utc>,

    /// Keys this tool does not own
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Manifest {
    /// Empty manifest stamped with `last_updated`
    pub fn new(last_updated: DateTime<Utc>) -> Self {
        Self {
            environments: CategoryEntries::new(),
            weapons: CategoryEntries::new(),
            vehicles: CategoryEntries::new(),
            factions: CategoryEntries::new(),
            renders: CategoryEntries::new(),
            ui: CategoryEntries::new(),
            total: 0,
            last_updated,
            extra: Map::new(),
        }
    }

    /// Build from per-category file lists
    pub fn from_files<'a, I>(files: I, last_updated: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = &'a AssetFile>,
    {
        let mut manifest = Self::new(last_updated);
        for file in files {
            manifest
                .category_mut(file.category)
                .insert(file.filename.clone(), ManifestEntry::from(file));
        }
        manifest.recompute_total();
        manifest
    }

    /// Entries for `category`
    pub fn category(&self, category: Category) -> &CategoryEntries {
        match category {
            Category::Environments => &self.environments,
            Category::Weapons => &self.weapons,
            Category::Vehicles => &self.vehicles,
            Category::Factions => &self.factions,
            Category::Renders => &self.renders,
            Category::Ui => &self.ui,
        }
    }

    /// Mutable entries for `category`
    pub fn category_mut(&mut self, category: Category) -> &mut CategoryEntries {
        match category {
            Category::Environments => &mut self.environments,
            Category::Weapons => &mut self.weapons,
            Category::Vehicles => &mut self.vehicles,
            Category::Factions => &mut self.factions,
            Category::Renders => &mut self.renders,
            Category::Ui => &mut self.ui,
        }
    }

    /// Set `total` from the category maps
    pub fn recompute_total(&mut self) {
        self.total = Category::ALL
            .iter()
            .map(|c| self.category(*c).len())
            .sum();
    }

    /// Keep only entries for which `keep(category, filename)` holds.
    ///
    /// Returns the number of removed entries and updates `total`.
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(Category, &str) -> bool,
    {
        let mut removed = 0;
        for category in Category::ALL {
            let entries = self.category_mut(category);
            let before = entries.len();
            entries.retain(|filename, _| keep(category, filename));
            removed += before - entries.len();
        }
        self.recompute_total();
        removed
    }

    /// Total bytes across all entries
    pub fn total_size(&self) -> u64 {
        Category::ALL
            .iter()
            .flat_map(|c| self.category(*c).values())
            .map(|e| e.size)
            .sum()
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Write to file, replacing any previous content
    pub fn write_to_file(&self, path: &Path) -> io::Result<()> {
        let json = self.to_json().map_err(|e| {
            io::Error::new(io::ErrorKind::InvalidData, format!("JSON error: {}", e))
        })?;
        fs::write(path, json)
    }

    /// Load from file
    pub fn from_file(path: &Path) -> io::Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("JSON error: {}", e)))
    }
}

/// ISO-8601 UTC with millisecond precision (`2025-01-02T03:04:05.678Z`)
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 123_000_000).unwrap()
    }

    fn file(category: Category, name: &str, size: u64) -> AssetFile {
        AssetFile {
            category,
            filename: name.to_string(),
            size_bytes: size,
            modified: at(1_700_000_000),
        }
    }

    fn sample() -> Manifest {
        let files = vec![
            file(Category::Renders, "hero-main.png", 100),
            file(Category::Renders, "TG_RENDER_00001_.png", 50),
            file(Category::Ui, "extract_128.png", 5),
        ];
        Manifest::from_files(&files, at(1_735_787_045))
    }

    #[test]
    fn test_from_files_counts_total() {
        let manifest = sample();
        assert_eq!(manifest.total, 3);
        assert_eq!(manifest.renders.len(), 2);
        assert!(manifest.weapons.is_empty());
        assert_eq!(manifest.total_size(), 155);
    }

    #[test]
    fn test_wire_format() {
        let manifest = sample();
        let value: Value = serde_json::from_str(&manifest.to_json().unwrap()).unwrap();

        assert_eq!(value["weapons"], serde_json::json!({}));
        assert_eq!(value["total"], 3);
        assert_eq!(value["lastUpdated"], "2025-01-02T03:04:05.123Z");
        assert_eq!(
            value["renders"]["hero-main.png"],
            serde_json::json!({
                "filename": "hero-main.png",
                "size": 100,
                "modified": "2023-11-14T22:13:20.123Z"
            })
        );
    }

    #[test]
    fn test_key_order() {
        let json = sample().to_json().unwrap();
        let positions: Vec<_> = [
            "\"environments\"",
            "\"weapons\"",
            "\"vehicles\"",
            "\"factions\"",
            "\"renders\"",
            "\"ui\"",
            "\"total\"",
            "\"lastUpdated\"",
        ]
        .iter()
        .map(|k| json.find(k).unwrap())
        .collect();
        let mut sorted = positions.clone();
        sorted.sort();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_round_trip_keeps_foreign_keys() {
        let mut value: Value = serde_json::from_str(&sample().to_json().unwrap()).unwrap();
        value["aaa"] = serde_json::json!(["/assets/images/renders/hero-main.png"]);

        let parsed = Manifest::from_json(&value.to_string()).unwrap();
        assert_eq!(parsed.renders, sample().renders);
        assert!(parsed.extra.contains_key("aaa"));
        assert!(parsed.to_json().unwrap().contains("\"aaa\""));
    }

    #[test]
    fn test_retain() {
        let mut manifest = sample();
        let removed = manifest.retain(|category, name| {
            category != Category::Renders || name.starts_with("hero")
        });
        assert_eq!(removed, 1);
        assert_eq!(manifest.total, 2);
        assert!(manifest.renders.contains_key("hero-main.png"));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("manifest.json");
        let manifest = sample();
        manifest.write_to_file(&path).unwrap();
        assert_eq!(Manifest::from_file(&path).unwrap(), manifest);
    }
}
