//! Keep rules for pruning
//!
//! Glob patterns (relative to the images dir) that protect files from
//! deletion even when nothing references them.

use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;

/// Always kept regardless of configuration
const DEFAULT_KEEPS: &[&str] = &["manifest.json", "**/.gitkeep"];

/// Errors for keep rules
#[derive(Debug, thiserror::Error)]
pub enum KeepError {
    #[error("Glob pattern error: {0}")]
    GlobError(#[from] globset::Error),
}

/// Keep rules for filtering prune candidates
#[derive(Debug)]
pub struct KeepRules {
    glob_set: GlobSet,
    patterns: Vec<String>,
}

impl KeepRules {
    /// Defaults plus the given patterns
    pub fn new<I, S>(patterns: I) -> Result<Self, KeepError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GlobSetBuilder::new();
        let mut kept = Vec::new();

        let configured: Vec<S> = patterns.into_iter().collect();
        for pattern in DEFAULT_KEEPS
            .iter()
            .copied()
            .chain(configured.iter().map(|p| p.as_ref().trim()))
        {
            if pattern.is_empty() || pattern.starts_with('#') {
                continue;
            }
            builder.add(Glob::new(pattern)?);
            kept.push(pattern.to_string());
        }

        Ok(Self {
            glob_set: builder.build()?,
            patterns: kept,
        })
    }

    /// Patterns in effect, defaults first
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Check if a relative path is protected
    pub fn is_kept(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.glob_set.is_match(path_str.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let rules = KeepRules::new(Vec::<String>::new()).unwrap();
        assert!(rules.is_kept(Path::new("manifest.json")));
        assert!(rules.is_kept(Path::new("renders/.gitkeep")));
        assert!(!rules.is_kept(Path::new("renders/manifest.json")));
        assert!(!rules.is_kept(Path::new("logo.png")));
    }

    #[test]
    fn test_configured_patterns() {
        let rules = KeepRules::new(["logo.png", "renders/hero-*.png", "", "# comment"]).unwrap();
        assert!(rules.is_kept(Path::new("logo.png")));
        assert!(rules.is_kept(Path::new("renders/hero-main.png")));
        assert!(!rules.is_kept(Path::new("renders/TG_RENDER_00001_.png")));
        assert_eq!(rules.patterns().len(), DEFAULT_KEEPS.len() + 2);
    }

    #[test]
    fn test_invalid_pattern() {
        let err = KeepRules::new(["renders/[oops"]).unwrap_err();
        assert!(matches!(err, KeepError::GlobError(_)));
    }
}
