//! Per-category curation
//!
//! Turns one category listing into an immutable result: the files that go
//! into the manifest and the curated subset that goes into the gallery.
//! Results for all categories are then folded into the run outputs. Nothing
//! here touches the filesystem.

use chrono::{DateTime, Utc};
use curator_rules::{
    detect_description, detect_rarity, detect_style, include_in_gallery, normalize_key, score,
    title_case, Allowlist, CandidateScore, Category, DedupKey, Rarity, Selector, Style,
};

use crate::manifest::Manifest;
use crate::scan::{AssetFile, CategoryListing};

/// The variant chosen to represent its dedup group in the gallery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CuratedAsset {
    pub file: AssetFile,
    pub key: DedupKey,
    pub score: CandidateScore,
    pub display_name: String,
    pub style: Style,
    pub description: String,
    pub rarity: Rarity,
}

impl CuratedAsset {
    /// Attach display metadata to a selected file
    pub fn classify(file: AssetFile, key: DedupKey, score: CandidateScore) -> Self {
        let name = file.filename.as_str();
        Self {
            display_name: title_case(name),
            style: detect_style(name),
            description: detect_description(name, file.category),
            rarity: detect_rarity(name),
            file,
            key,
            score,
        }
    }

    pub fn category(&self) -> Category {
        self.file.category
    }

    pub fn filename(&self) -> &str {
        &self.file.filename
    }
}

/// How a category's directory was read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryStatus {
    Scanned,
    Missing,
    Failed(String),
}

/// Curation outcome for one category
#[derive(Debug, Clone)]
pub struct CategoryResult {
    pub category: Category,
    pub status: CategoryStatus,
    /// Every filter-surviving file (manifest input)
    pub files: Vec<AssetFile>,
    /// Number of files that passed the gallery inclusion predicate
    pub candidates: usize,
    /// Group winners in first-seen order (gallery input)
    pub curated: Vec<CuratedAsset>,
}

/// Curate one category listing.
pub fn curate_category(
    category: Category,
    listing: CategoryListing,
    allowlist: Option<&Allowlist>,
) -> CategoryResult {
    let (status, files) = match listing {
        CategoryListing::Listed(files) => (CategoryStatus::Scanned, files),
        CategoryListing::Missing(_) => (CategoryStatus::Missing, Vec::new()),
        CategoryListing::Failed(e) => (CategoryStatus::Failed(e.to_string()), Vec::new()),
    };

    let mut selector = Selector::new();
    for file in &files {
        if !include_in_gallery(category, &file.filename, allowlist).is_included() {
            continue;
        }
        selector.offer_scored(normalize_key(&file.filename), score(&file.filename), file);
    }

    let candidates = selector.offered();
    let curated = selector
        .into_selected()
        .into_iter()
        .map(|s| CuratedAsset::classify(s.item.clone(), s.key, s.score))
        .collect();

    CategoryResult {
        category,
        status,
        files,
        candidates,
        curated,
    }
}

/// Results for every category, in scan order
#[derive(Debug, Clone, Default)]
pub struct Curation {
    pub results: Vec<CategoryResult>,
}

impl Curation {
    pub fn new(results: Vec<CategoryResult>) -> Self {
        Self { results }
    }

    /// Manifest covering every filter-surviving file
    pub fn manifest(&self, last_updated: DateTime<Utc>) -> Manifest {
        Manifest::from_files(self.results.iter().flat_map(|r| r.files.iter()), last_updated)
    }

    /// Gallery assets, categories in scan order
    pub fn curated(&self) -> impl Iterator<Item = &CuratedAsset> {
        self.results.iter().flat_map(|r| r.curated.iter())
    }

    /// Number of manifest entries
    pub fn total_files(&self) -> usize {
        self.results.iter().map(|r| r.files.len()).sum()
    }

    /// Number of gallery blocks
    pub fn total_curated(&self) -> usize {
        self.results.iter().map(|r| r.curated.len()).sum()
    }
}
