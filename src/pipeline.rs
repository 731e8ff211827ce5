//! Scan pipeline orchestration
//!
//! Walks every category, curates each one independently, folds the results
//! into the manifest and gallery fragment, and writes both outputs. Per
//! category problems are logged and skipped; only output failures abort.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use curator_rules::{Allowlist, Category};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{CuratorConfig, CuratorPaths};
use crate::curate::{curate_category, CategoryStatus, Curation};
use crate::gallery;
use crate::manifest::Manifest;
use crate::scan::{CategoryListing, Scanner};

/// Pipeline errors
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("cannot create output directory {path}: {source}")]
    OutputDir { path: PathBuf, source: io::Error },

    #[error("cannot write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

impl PipelineError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            PipelineError::OutputDir { .. } => 1,
            PipelineError::Write { .. } => 1,
        }
    }
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Load the optional allowlist.
///
/// A missing or malformed file yields `None` and the heuristics apply.
pub fn load_allowlist(path: &Path) -> Option<Allowlist> {
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "No gallery allowlist");
            return None;
        }
    };
    match Allowlist::from_json(&contents) {
        Ok(allowlist) => {
            info!(
                categories = allowlist.governed_categories(),
                "Loaded gallery allowlist"
            );
            Some(allowlist)
        }
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Ignoring malformed gallery allowlist");
            None
        }
    }
}

/// Everything a scan produced
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub curation: Curation,
    pub manifest: Manifest,
    pub gallery: String,
    pub manifest_path: PathBuf,
    pub gallery_path: PathBuf,
}

/// The scan pipeline for one project root
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: CuratorConfig,
    paths: CuratorPaths,
}

impl Pipeline {
    pub fn new(config: CuratorConfig, root: &Path) -> Self {
        let paths = config.resolve(root);
        Self { config, paths }
    }

    pub fn paths(&self) -> &CuratorPaths {
        &self.paths
    }

    /// Scan and curate every category without writing anything.
    pub fn curate(&self, allowlist: Option<&Allowlist>) -> Curation {
        let scanner = Scanner::new(self.paths.images_dir.clone());
        let results = Category::ALL
            .iter()
            .map(|&category| {
                let listing = scanner.list(category);
                if let CategoryListing::Missing(dir) = &listing {
                    info!(
                        "Skipping missing category directory: {}",
                        self.paths.display_relative(dir)
                    );
                }
                let result = curate_category(category, listing, allowlist);
                match &result.status {
                    CategoryStatus::Failed(e) => warn!("Error scanning {}: {}", category, e),
                    CategoryStatus::Scanned => debug!(
                        %category,
                        files = result.files.len(),
                        candidates = result.candidates,
                        curated = result.curated.len(),
                        "Scanned category"
                    ),
                    CategoryStatus::Missing => {}
                }
                result
            })
            .collect();
        Curation::new(results)
    }

    /// Run the full pipeline stamped with the current time.
    pub fn run(&self) -> PipelineResult<ScanReport> {
        self.run_at(Utc::now())
    }

    /// Run the full pipeline stamped with `now`.
    pub fn run_at(&self, now: DateTime<Utc>) -> PipelineResult<ScanReport> {
        info!("Scanning local assets in {}", self.paths.images_dir.display());

        for path in [&self.paths.manifest_path, &self.paths.gallery_path] {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|source| PipelineError::OutputDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let allowlist = load_allowlist(&self.paths.allowlist_path);
        let curation = self.curate(allowlist.as_ref());

        let manifest = curation.manifest(now);
        manifest
            .write_to_file(&self.paths.manifest_path)
            .map_err(|source| PipelineError::Write {
                path: self.paths.manifest_path.clone(),
                source,
            })?;
        info!(
            "Wrote manifest: {}",
            self.paths.display_relative(&self.paths.manifest_path)
        );

        let fragment = gallery::render_fragment(curation.curated(), self.config.asset_base());
        gallery::write_fragment(&self.paths.gallery_path, &fragment).map_err(|source| {
            PipelineError::Write {
                path: self.paths.gallery_path.clone(),
                source,
            }
        })?;
        info!(
            "Wrote gallery snippet: {}",
            self.paths.display_relative(&self.paths.gallery_path)
        );
        info!(
            total = manifest.total,
            curated = curation.total_curated(),
            "Assets found: {}",
            manifest.total
        );

        Ok(ScanReport {
            curation,
            manifest,
            gallery: fragment,
            manifest_path: self.paths.manifest_path.clone(),
            gallery_path: self.paths.gallery_path.clone(),
        })
    }
}
