//! Preference scoring for filename variants.
//!
//! The score is the sum of weighted predicates. It only orders variants that
//! share a dedup key; the absolute value has no meaning.

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Integer preference score.
pub type CandidateScore = i32;

/// A weighted scoring predicate.
#[derive(Debug, Clone, Copy)]
pub struct ScoreRule {
    /// Stable rule name
    pub name: &'static str,
    /// Added to the score when the predicate holds
    pub weight: CandidateScore,
    /// Predicate over the full filename
    pub predicate: fn(&str) -> bool,
}

impl ScoreRule {
    /// True if this rule applies to `filename`.
    pub fn matches(&self, filename: &str) -> bool {
        (self.predicate)(filename)
    }
}

/// Scoring rules, summed in order.
pub const SCORE_RULES: &[ScoreRule] = &[
    ScoreRule {
        name: "hyphenated",
        weight: 3,
        predicate: is_hyphenated,
    },
    ScoreRule {
        name: "hero",
        weight: 3,
        predicate: mentions_hero,
    },
    ScoreRule {
        name: "premium",
        weight: 2,
        predicate: mentions_premium,
    },
    ScoreRule {
        name: "finish",
        weight: 2,
        predicate: mentions_finish,
    },
    ScoreRule {
        name: "resolution-hint",
        weight: 1,
        predicate: has_resolution_hint,
    },
    ScoreRule {
        name: "toned",
        weight: -1,
        predicate: mentions_toned,
    },
    ScoreRule {
        name: "digit-heavy",
        weight: -2,
        predicate: is_digit_heavy,
    },
    ScoreRule {
        name: "long-name",
        weight: -2,
        predicate: is_long,
    },
];

fn stem(filename: &str) -> &str {
    filename.rsplit_once('.').map_or(filename, |(stem, _)| stem)
}

fn contains_ci(filename: &str, needle: &str) -> bool {
    filename.to_lowercase().contains(needle)
}

fn is_hyphenated(filename: &str) -> bool {
    stem(filename).contains('-')
}

fn mentions_hero(filename: &str) -> bool {
    contains_ci(filename, "hero")
}

fn mentions_premium(filename: &str) -> bool {
    contains_ci(filename, "premium")
}

fn mentions_finish(filename: &str) -> bool {
    contains_ci(filename, "clean") || contains_ci(filename, "gritty")
}

fn has_resolution_hint(filename: &str) -> bool {
    static QHD: OnceLock<Regex> = OnceLock::new();
    let qhd = QHD.get_or_init(|| {
        Regex::new(r"(?i)(?:^|[^a-z0-9])2560x1440(?:[^a-z0-9]|$)").expect("valid pattern")
    });
    qhd.is_match(filename) || contains_ci(filename, "1920w")
}

fn mentions_toned(filename: &str) -> bool {
    contains_ci(filename, "toned")
}

fn is_digit_heavy(filename: &str) -> bool {
    filename.chars().filter(|c| c.is_ascii_digit()).count() > 6
}

fn is_long(filename: &str) -> bool {
    filename.chars().count() > 60
}

/// One rule's contribution to a score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreContribution {
    pub rule: String,
    pub weight: CandidateScore,
}

/// Score `filename` with the built-in rules.
pub fn score(filename: &str) -> CandidateScore {
    SCORE_RULES
        .iter()
        .filter(|r| r.matches(filename))
        .map(|r| r.weight)
        .sum()
}

/// The rules that contributed to `score(filename)`.
pub fn score_breakdown(filename: &str) -> Vec<ScoreContribution> {
    SCORE_RULES
        .iter()
        .filter(|r| r.matches(filename))
        .map(|r| ScoreContribution {
            rule: r.name.to_string(),
            weight: r.weight,
        })
        .collect()
}
