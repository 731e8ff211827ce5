//! Dedup key normalization.
//!
//! A filename is reduced to a key by an ordered table of rewrite rules.
//! Order matters: later rules assume earlier ones already removed the
//! extension and numeric noise. Each rule can be compiled and applied on its
//! own, which is how the tests exercise them.

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Separator class used to delimit tokens.
const SEP: &str = r"[_\s-]";

/// A single rewrite rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeRule {
    /// Stable rule name
    pub name: &'static str,
    /// regex-lite pattern
    pub pattern: &'static str,
    /// Literal replacement text
    pub replacement: &'static str,
    /// Re-apply until the input stops changing
    pub repeat: bool,
}

/// The normalization rules, in application order.
///
/// Token rules (`year`, `resolution`, `sampler`, `toned`) only match whole tokens
/// bounded by `_`, `-`, whitespace, or the string edges. They consume the
/// delimiters and leave a single `_` behind, so they are repeated to catch
/// adjacent tokens.
pub const NORMALIZE_RULES: &[NormalizeRule] = &[
    NormalizeRule {
        name: "extension",
        pattern: r"\.[^.]+$",
        replacement: "",
        repeat: false,
    },
    NormalizeRule {
        name: "year",
        pattern: r"(?:^|[_\s-])(?:19|20)\d{2,}(?:[_\s-]|$)",
        replacement: "_",
        repeat: true,
    },
    NormalizeRule {
        name: "resolution",
        pattern: r"(?i)(?:^|[_\s-])\d{3,4}x\d{3,4}(?:[_\s-]|$)",
        replacement: "_",
        repeat: true,
    },
    NormalizeRule {
        name: "sampler",
        pattern: r"(?i)(?:^|[_\s-])(?:s\d{1,3}|cfg\d+(?:\.\d+)?)(?:[_\s-]|$)",
        replacement: "_",
        repeat: true,
    },
    NormalizeRule {
        name: "toned",
        pattern: r"(?i)(?:^|[_\s-])toned(?:[_\s-]|$)",
        replacement: "_",
        repeat: true,
    },
    NormalizeRule {
        name: "run-id",
        pattern: r"_?\d{5,}_?",
        replacement: "",
        repeat: false,
    },
    NormalizeRule {
        name: "sequence",
        pattern: r"_?0000\d_?",
        replacement: "",
        repeat: false,
    },
    NormalizeRule {
        name: "width-suffix",
        pattern: r"(?i)_?1920w_?",
        replacement: "",
        repeat: false,
    },
    NormalizeRule {
        name: "pipeline-prefix",
        pattern: r"(?i)^[_\s-]*(?:HQ_|LORE_|PROD_|REFINE_SHARP_)+",
        replacement: "",
        repeat: true,
    },
    NormalizeRule {
        name: "separators",
        pattern: r"[_\s-]+",
        replacement: "-",
        repeat: false,
    },
    NormalizeRule {
        name: "trim",
        pattern: r"^-+|-+$",
        replacement: "",
        repeat: false,
    },
];

/// Look up a rule by name.
pub fn rule(name: &str) -> Option<&'static NormalizeRule> {
    NORMALIZE_RULES.iter().find(|r| r.name == name)
}

impl NormalizeRule {
    /// Compile the rule's pattern.
    pub fn compile(&self) -> Result<CompiledRule, regex_lite::Error> {
        Ok(CompiledRule {
            rule: *self,
            regex: Regex::new(self.pattern)?,
        })
    }
}

/// A rule with its compiled pattern.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    rule: NormalizeRule,
    regex: Regex,
}

impl CompiledRule {
    /// Rule name.
    pub fn name(&self) -> &'static str {
        self.rule.name
    }

    /// Apply the rule to `input`.
    pub fn apply(&self, input: &str) -> String {
        let mut current = self.regex.replace_all(input, self.rule.replacement).into_owned();
        if self.rule.repeat {
            loop {
                let next = self.regex.replace_all(&current, self.rule.replacement);
                if next == current {
                    break;
                }
                current = next.into_owned();
            }
        }
        current
    }
}

/// Normalized identifier grouping filename variants of one logical asset.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DedupKey(String);

impl DedupKey {
    /// Key text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DedupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Applies a rule table in order.
#[derive(Debug, Clone)]
pub struct Normalizer {
    rules: Vec<CompiledRule>,
    separators: Regex,
}

impl Normalizer {
    /// Build a normalizer from an explicit rule list.
    pub fn from_rules(rules: &[NormalizeRule]) -> Result<Self, regex_lite::Error> {
        let rules = rules
            .iter()
            .map(NormalizeRule::compile)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            rules,
            separators: Regex::new(&format!("{}+", SEP))?,
        })
    }

    /// Names of the rules, in order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Reduce `filename` to its dedup key.
    ///
    /// A name made up entirely of stripped tokens (e.g. `2024.png`) falls
    /// back to its collapsed stem rather than the empty key.
    pub fn normalize(&self, filename: &str) -> DedupKey {
        let stripped = self
            .rules
            .iter()
            .fold(filename.to_string(), |acc, rule| rule.apply(&acc))
            .to_lowercase();

        if !stripped.is_empty() {
            return DedupKey(stripped);
        }

        let stem = filename.rsplit_once('.').map_or(filename, |(stem, _)| stem);
        let collapsed = self.separators.replace_all(stem, "-");
        DedupKey(collapsed.trim_matches('-').to_lowercase())
    }
}

fn shared() -> &'static Normalizer {
    static NORMALIZER: OnceLock<Normalizer> = OnceLock::new();
    NORMALIZER.get_or_init(|| {
        Normalizer::from_rules(NORMALIZE_RULES).expect("built-in normalize rules compile")
    })
}

/// Reduce `filename` to its dedup key using the built-in rules.
pub fn normalize_key(filename: &str) -> DedupKey {
    shared().normalize(filename)
}
