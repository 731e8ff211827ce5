//! Category directory walker
//!
//! Lists the regular files directly inside each category directory, applies
//! the filter stage, and reads size and mtime for the files that survive.
//! Listing is sorted by file name so discovery order does not depend on the
//! platform.

use chrono::{DateTime, Utc};
use curator_rules::{disallow_marker, is_image, Category};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Errors while listing a single category
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Walk error: {0}")]
    WalkError(#[from] walkdir::Error),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// One admitted image file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetFile {
    /// Category the file was found under
    pub category: Category,
    /// File name, unique within the category directory
    pub filename: String,
    /// Size in bytes
    pub size_bytes: u64,
    /// Last modification time
    pub modified: DateTime<Utc>,
}

/// Outcome of listing one category directory
#[derive(Debug)]
pub enum CategoryListing {
    /// Admitted files in name order
    Listed(Vec<AssetFile>),
    /// The directory does not exist
    Missing(PathBuf),
    /// Listing failed; the category contributes nothing
    Failed(ScanError),
}

impl CategoryListing {
    /// Admitted files, empty unless listing succeeded.
    pub fn files(&self) -> &[AssetFile] {
        match self {
            CategoryListing::Listed(files) => files,
            _ => &[],
        }
    }
}

/// Walks `<images_dir>/<category>` directories.
#[derive(Debug, Clone)]
pub struct Scanner {
    images_dir: PathBuf,
}

impl Scanner {
    pub fn new(images_dir: PathBuf) -> Self {
        Self { images_dir }
    }

    /// Directory for `category`.
    pub fn category_dir(&self, category: Category) -> PathBuf {
        self.images_dir.join(category.as_str())
    }

    /// List one category.
    pub fn list(&self, category: Category) -> CategoryListing {
        let dir = self.category_dir(category);
        match fs::metadata(&dir) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => return CategoryListing::Missing(dir),
            Err(e) => return CategoryListing::Failed(e.into()),
            Ok(meta) if !meta.is_dir() => {
                return CategoryListing::Failed(ScanError::NotADirectory(dir))
            }
            Ok(_) => {}
        }

        match collect_files(&dir, category) {
            Ok(files) => CategoryListing::Listed(files),
            Err(e) => CategoryListing::Failed(e),
        }
    }
}

fn collect_files(dir: &Path, category: Category) -> Result<Vec<AssetFile>, ScanError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by(|a, b| a.file_name().cmp(b.file_name()))
    {
        let entry = entry?;

        // Symlinks and subdirectories are not regular files
        if !entry.file_type().is_file() {
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            warn!(path = %entry.path().display(), "Skipping file with non UTF-8 name");
            continue;
        };

        if !is_image(name) {
            debug!(%category, file = name, "Skipping non-image file");
            continue;
        }
        if let Some(marker) = disallow_marker(name) {
            debug!(%category, file = name, marker, "Skipping disallowed variant");
            continue;
        }

        let metadata = entry.metadata()?;
        files.push(AssetFile {
            category,
            filename: name.to_string(),
            size_bytes: metadata.len(),
            modified: DateTime::<Utc>::from(metadata.modified()?),
        });
    }

    Ok(files)
}
