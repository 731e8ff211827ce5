//! Unused asset cleanup
//!
//! Compares every asset file under the images dir against a reference list
//! and deletes the unreferenced ones. Dry run unless explicitly executed.

mod keep;

pub use keep::{KeepError, KeepRules};

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

use crate::config::{CuratorPaths, PruneConfig, MANIFEST_FILE};
use crate::manifest::Manifest;

/// Extensions considered by the cleanup
pub const PRUNE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "json"];

/// Errors for prune operations
#[derive(Debug, thiserror::Error)]
pub enum PruneError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Failed to walk images directory: {0}")]
    WalkError(#[from] walkdir::Error),

    #[error("Invalid keep pattern: {0}")]
    KeepError(#[from] KeepError),

    #[error("References file not found: {0}")]
    ReferencesNotFound(PathBuf),

    #[error("Cannot read manifest {path}: {source}")]
    ManifestUnreadable { path: PathBuf, source: io::Error },
}

/// Paths (relative to the images dir) that are in use
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct References {
    paths: BTreeSet<String>,
}

impl References {
    /// Parse a reference list: one path per line, blanks and `#` comments skipped.
    pub fn parse(contents: &str) -> Self {
        let mut paths: BTreeSet<String> = contents
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .map(|l| l.trim_start_matches("./").trim_start_matches('/').replace('\\', "/"))
            .collect();
        paths.insert(MANIFEST_FILE.to_string());
        Self { paths }
    }

    /// Load a reference list. A missing file is an error.
    pub fn from_file(path: &Path) -> Result<Self, PruneError> {
        if !path.exists() {
            return Err(PruneError::ReferencesNotFound(path.to_path_buf()));
        }
        Ok(Self::parse(&fs::read_to_string(path)?))
    }

    pub fn contains(&self, relative: &str) -> bool {
        self.paths.contains(relative)
    }

    /// Whether a manifest entry is still in use
    pub fn references_entry(&self, category: &str, filename: &str) -> bool {
        self.contains(&format!("{}/{}", category, filename)) || self.contains(filename)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// An unreferenced file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PruneCandidate {
    /// Path relative to the images dir, `/`-separated
    pub path: String,
    pub size: u64,
}

/// A file that could not be removed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PruneFailure {
    pub path: String,
    pub error: String,
}

/// Outcome of a prune run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PruneReport {
    /// Whether files were actually deleted
    pub executed: bool,

    /// Asset files found under the images dir
    pub scanned: usize,

    /// Number of reference entries (including implicit ones)
    pub references: usize,

    /// Unreferenced, unprotected files
    pub candidates: Vec<PruneCandidate>,

    /// Bytes held by the candidates
    pub total_bytes: u64,

    /// Files removed (execute only)
    pub deleted: Vec<String>,

    /// Files or outputs that could not be updated
    pub failures: Vec<PruneFailure>,

    /// Manifest entries dropped by the rewrite
    pub manifest_entries_removed: usize,
}

impl PruneReport {
    /// Human-readable summary
    pub fn to_human(&self) -> String {
        let mut lines = Vec::new();
        lines.push(format!(
            "Found {} asset files, {} references",
            self.scanned, self.references
        ));
        lines.push(format!("Unused assets: {}", self.candidates.len()));
        for c in &self.candidates {
            lines.push(format!("  - {} ({})", c.path, format_size(c.size)));
        }
        lines.push(format!("Total space: {}", format_size(self.total_bytes)));

        if self.executed {
            lines.push(format!("Deleted: {}", self.deleted.len()));
            lines.push(format!(
                "Manifest entries removed: {}",
                self.manifest_entries_removed
            ));
            for f in &self.failures {
                lines.push(format!("  ! {}: {}", f.path, f.error));
            }
        } else {
            lines.push("Dry run; re-run with --execute to delete.".to_string());
        }
        lines.join("\n")
    }
}

fn format_size(bytes: u64) -> String {
    format!("{:.2}MB", bytes as f64 / 1024.0 / 1024.0)
}

/// `/`-separated path of `path` below `base`
fn relative_slash_path(base: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(base).ok()?;
    let parts: Option<Vec<&str>> = rel
        .components()
        .map(|c| match c {
            Component::Normal(s) => s.to_str(),
            _ => None,
        })
        .collect();
    Some(parts?.join("/"))
}

fn has_prune_extension(name: &str) -> bool {
    name.rsplit_once('.').is_some_and(|(_, ext)| {
        PRUNE_EXTENSIONS
            .iter()
            .any(|e| e.eq_ignore_ascii_case(ext))
    })
}

/// Unused-asset cleanup for one images dir
#[derive(Debug)]
pub struct Pruner {
    images_dir: PathBuf,
    manifest_path: PathBuf,
    references: References,
    keep: KeepRules,
}

impl Pruner {
    pub fn new(
        images_dir: PathBuf,
        manifest_path: PathBuf,
        references: References,
        keep: KeepRules,
    ) -> Self {
        Self {
            images_dir,
            manifest_path,
            references,
            keep,
        }
    }

    /// Build from resolved paths and the `[prune]` config section
    pub fn from_config(paths: &CuratorPaths, config: &PruneConfig) -> Result<Self, PruneError> {
        let references = References::from_file(&paths.references_path)?;
        info!(
            references = references.len(),
            "Loaded asset references from {}",
            paths.display_relative(&paths.references_path)
        );
        let keep = KeepRules::new(&config.keep)?;
        Ok(Self::new(
            paths.images_dir.clone(),
            paths.manifest_path.clone(),
            references,
            keep,
        ))
    }

    /// Every asset file under the images dir, sorted, as relative paths with sizes.
    pub fn asset_files(&self) -> Result<Vec<PruneCandidate>, PruneError> {
        let mut files = Vec::new();
        for entry in WalkDir::new(&self.images_dir)
            .follow_links(false)
            .sort_by_file_name()
        {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str() else {
                continue;
            };
            if !has_prune_extension(name) {
                continue;
            }
            let Some(path) = relative_slash_path(&self.images_dir, entry.path()) else {
                warn!("Skipping non UTF-8 path: {}", entry.path().display());
                continue;
            };
            let size = entry.metadata()?.len();
            files.push(PruneCandidate { path, size });
        }
        Ok(files)
    }

    fn is_protected(&self, candidate: &PruneCandidate) -> bool {
        self.references.contains(&candidate.path)
            || self.keep.is_kept(Path::new(&candidate.path))
            || self.images_dir.join(&candidate.path) == self.manifest_path
    }

    /// Collect candidates; delete them and rewrite the manifest when `execute` is set.
    pub fn run(&self, execute: bool) -> Result<PruneReport, PruneError> {
        let files = self.asset_files()?;
        let scanned = files.len();
        let candidates: Vec<PruneCandidate> = files
            .into_iter()
            .filter(|c| !self.is_protected(c))
            .collect();
        let total_bytes: u64 = candidates.iter().map(|c| c.size).sum();
        info!(
            scanned,
            unused = candidates.len(),
            total_bytes,
            "Analyzed asset usage"
        );

        let mut report = PruneReport {
            executed: execute,
            scanned,
            references: self.references.len(),
            candidates,
            total_bytes,
            ..Default::default()
        };

        if !execute {
            return Ok(report);
        }

        // Nothing is deleted unless the manifest can be rewritten afterwards
        let manifest = self.load_manifest()?;

        for candidate in &report.candidates {
            let full = self.images_dir.join(&candidate.path);
            match fs::remove_file(&full) {
                Ok(()) => {
                    debug!("Deleted {}", candidate.path);
                    report.deleted.push(candidate.path.clone());
                }
                Err(e) => {
                    warn!("Failed to delete {}: {}", candidate.path, e);
                    report.failures.push(PruneFailure {
                        path: candidate.path.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }
        info!(deleted = report.deleted.len(), "Removed unused assets");

        if let Some(manifest) = manifest {
            match self.rewrite_manifest(manifest) {
                Ok(removed) => report.manifest_entries_removed = removed,
                Err(e) => {
                    error!("Failed to update manifest: {}", e);
                    report.failures.push(PruneFailure {
                        path: self.manifest_path.display().to_string(),
                        error: e.to_string(),
                    });
                }
            }
        }

        Ok(report)
    }

    /// Parse the current manifest, `None` when there is none yet.
    fn load_manifest(&self) -> Result<Option<Manifest>, PruneError> {
        if !self.manifest_path.exists() {
            debug!("No manifest at {}", self.manifest_path.display());
            return Ok(None);
        }
        Manifest::from_file(&self.manifest_path)
            .map(Some)
            .map_err(|source| PruneError::ManifestUnreadable {
                path: self.manifest_path.clone(),
                source,
            })
    }

    /// Whether a manifest entry should survive the rewrite
    fn keeps_entry(&self, category: &str, filename: &str) -> bool {
        self.references.references_entry(category, filename)
            || self
                .keep
                .is_kept(Path::new(&format!("{}/{}", category, filename)))
    }

    /// Drop manifest entries that are no longer in use. Returns the number removed.
    fn rewrite_manifest(&self, mut manifest: Manifest) -> io::Result<usize> {
        let removed =
            manifest.retain(|category, filename| self.keeps_entry(category.as_str(), filename));
        manifest.write_to_file(&self.manifest_path)?;
        info!(removed, "Updated manifest");
        Ok(removed)
    }
}
