//! Filename rules for asset curation.
//!
//! Everything in this crate is a pure function of filenames (plus an
//! optional allowlist): which files are admitted, how filename variants
//! collapse into one dedup key, which variant is preferred, whether a file
//! belongs in the public gallery, and how it is labelled there. Filesystem
//! access lives in the `asset-curator` crate.

mod allowlist;
mod category;
mod classify;
mod filter;
mod inclusion;
mod normalize;
mod score;
mod select;

pub use allowlist::{Allowlist, AllowlistError};
pub use category::{Category, UnknownCategory};
pub use classify::{detect_description, detect_rarity, detect_style, title_case, Rarity, Style};
pub use filter::{
    disallow_marker, is_admitted, is_disallowed, is_image, DISALLOW_MARKERS, IMAGE_EXTENSIONS,
};
pub use inclusion::{include_in_gallery, is_pipeliney, is_semantic, Inclusion, CURATED_HINTS};
pub use normalize::{
    normalize_key, rule, CompiledRule, DedupKey, NormalizeRule, Normalizer, NORMALIZE_RULES,
};
pub use score::{
    score, score_breakdown, CandidateScore, ScoreContribution, ScoreRule, SCORE_RULES,
};
pub use select::{Selected, Selector};
