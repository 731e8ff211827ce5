//! Explain command output
//!
//! Shows every decision the scan would make for a single file name, as JSON
//! or as a human-readable report. Nothing is read from disk.

use curator_rules::{
    detect_description, detect_rarity, detect_style, disallow_marker, include_in_gallery,
    is_image, normalize_key, score_breakdown, title_case, Allowlist, Category, Inclusion, Rarity,
    ScoreContribution, Style,
};
use serde::{Deserialize, Serialize};

/// Explanation of how one file is curated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplainOutput {
    /// Category directory the file lives in
    pub category: Category,

    /// File name as given
    pub filename: String,

    /// Whether the extension is a recognized image type
    pub is_image: bool,

    /// Disallow marker found in the name, if any
    pub disallow_marker: Option<String>,

    /// Whether the file is listed in the manifest
    pub in_manifest: bool,

    /// Gallery inclusion decision
    pub inclusion: Inclusion,

    /// Dedup group key
    pub key: String,

    /// Candidate score
    pub score: i32,

    /// Score rules that matched
    pub breakdown: Vec<ScoreContribution>,

    pub display_name: String,
    pub style: Style,
    pub description: String,
    pub rarity: Rarity,

    /// Whether the file can represent its group in the gallery
    pub eligible: bool,
}

impl ExplainOutput {
    pub fn new(category: Category, filename: &str, allowlist: Option<&Allowlist>) -> Self {
        let image = is_image(filename);
        let marker = disallow_marker(filename);
        let in_manifest = image && marker.is_none();
        let inclusion = include_in_gallery(category, filename, allowlist);
        let breakdown = score_breakdown(filename);

        Self {
            category,
            filename: filename.to_string(),
            is_image: image,
            disallow_marker: marker.map(str::to_string),
            in_manifest,
            eligible: in_manifest && inclusion.is_included(),
            inclusion,
            key: normalize_key(filename).as_str().to_string(),
            score: breakdown.iter().map(|c| c.weight).sum(),
            breakdown,
            display_name: title_case(filename),
            style: detect_style(filename),
            description: detect_description(filename, category),
            rarity: detect_rarity(filename),
        }
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Human-readable report
    pub fn to_human(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("File: {}/{}", self.category, self.filename));
        lines.push(String::new());

        if !self.is_image {
            lines.push("Manifest: SKIPPED (not an image)".to_string());
        } else if let Some(marker) = &self.disallow_marker {
            lines.push(format!("Manifest: SKIPPED (disallowed marker '{}')", marker));
        } else {
            lines.push("Manifest: LISTED".to_string());
        }

        let decision = if self.eligible { "ELIGIBLE" } else { "EXCLUDED" };
        lines.push(format!("Gallery: {} ({})", decision, self.inclusion));
        lines.push(String::new());

        lines.push(format!("Dedup key: {}", self.key));
        lines.push(format!("Score: {}", self.score));
        for c in &self.breakdown {
            lines.push(format!("  {:+} {}", c.weight, c.rule));
        }
        lines.push(String::new());

        lines.push(format!("Display name: {}", self.display_name));
        lines.push(format!("Style: {}", self.style.as_str()));
        lines.push(format!("Description: {}", self.description));
        lines.push(format!("Rarity: {}", self.rarity.label()));

        lines.join("\n")
    }
}
