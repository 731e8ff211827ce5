//! Gallery inclusion predicate.
//!
//! Decides whether a filter-surviving file is a gallery candidate at all,
//! before dedup grouping. The manifest is not affected.

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use crate::{Allowlist, Category};

/// Descriptors that admit a file even when its name looks generated.
pub const CURATED_HINTS: &[&str] = &[
    "metro",
    "corridor",
    "facility",
    "bunker",
    "tech-wastes",
    "research",
    "security",
    "hero",
    "stalker",
    "walker",
    "apc",
    "plasma",
    "ion",
];

/// Gallery inclusion decision with its reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", content = "detail", rename_all = "snake_case")]
pub enum Inclusion {
    /// UI icons are never showcased
    UiCategory,
    /// Palette swatches are never showcased
    Palette,
    /// Listed in the allowlist for its category
    Allowlisted,
    /// Category is governed by the allowlist and the file is not on it
    NotAllowlisted,
    /// Lowercase-hyphenated name without generator markers
    Semantic,
    /// Contains a curated descriptor
    CuratedHint(String),
    /// No rule admitted the file
    NoMatch,
}

impl Inclusion {
    /// True if the file is a gallery candidate.
    pub fn is_included(&self) -> bool {
        matches!(
            self,
            Inclusion::Allowlisted | Inclusion::Semantic | Inclusion::CuratedHint(_)
        )
    }
}

impl fmt::Display for Inclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inclusion::UiCategory => write!(f, "excluded: ui assets are not showcased"),
            Inclusion::Palette => write!(f, "excluded: palette swatch"),
            Inclusion::Allowlisted => write!(f, "included: listed in allowlist"),
            Inclusion::NotAllowlisted => {
                write!(f, "excluded: category is allowlisted and file is not listed")
            }
            Inclusion::Semantic => write!(f, "included: semantic hyphenated name"),
            Inclusion::CuratedHint(hint) => write!(f, "included: curated descriptor '{}'", hint),
            Inclusion::NoMatch => write!(f, "excluded: generated name without curated descriptor"),
        }
    }
}

struct Patterns {
    semantic: Regex,
    pipeline_caps: Regex,
    pipeline_tokens: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        semantic: Regex::new(r"(?i)[a-z]+-[a-z0-9-]+\.(?:png|jpe?g|webp)$").expect("valid pattern"),
        pipeline_caps: Regex::new(r"[A-Z]{2,}[_\d]").expect("valid pattern"),
        pipeline_tokens: Regex::new(r"(?i)cfg|s\d|_\d{5,}").expect("valid pattern"),
    })
}

/// True if the name looks like a hand-curated, hyphenated filename.
pub fn is_semantic(filename: &str) -> bool {
    patterns().semantic.is_match(filename)
}

/// True if the name carries generator markers (caps runs, seeds, cfg).
pub fn is_pipeliney(filename: &str) -> bool {
    let p = patterns();
    p.pipeline_caps.is_match(filename) || p.pipeline_tokens.is_match(filename)
}

/// Decide gallery eligibility for one file.
pub fn include_in_gallery(
    category: Category,
    filename: &str,
    allowlist: Option<&Allowlist>,
) -> Inclusion {
    if category == Category::Ui {
        return Inclusion::UiCategory;
    }

    let lower = filename.to_lowercase();
    if lower.contains("palette") {
        return Inclusion::Palette;
    }

    if let Some(pinned) = allowlist.and_then(|a| a.for_category(category)) {
        return if pinned.iter().any(|name| name == filename) {
            Inclusion::Allowlisted
        } else {
            Inclusion::NotAllowlisted
        };
    }

    if is_semantic(filename) && !is_pipeliney(filename) {
        return Inclusion::Semantic;
    }

    match CURATED_HINTS.iter().find(|hint| lower.contains(*hint)) {
        Some(hint) => Inclusion::CuratedHint(hint.to_string()),
        None => Inclusion::NoMatch,
    }
}
