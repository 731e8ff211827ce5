//! Asset Curator - local asset scanning and gallery curation
//!
//! Walks the site's category image directories, writes a manifest of every
//! usable file, and emits a gallery fragment with one curated variant per
//! dedup group. Naming rules live in the `curator-rules` crate.

pub mod config;
pub mod curate;
pub mod explain;
pub mod gallery;
pub mod manifest;
pub mod pipeline;
pub mod prune;
pub mod scan;

pub use config::{ConfigError, CuratorConfig, CuratorPaths};
pub use curate::{curate_category, CategoryResult, CategoryStatus, CuratedAsset, Curation};
pub use explain::ExplainOutput;
pub use manifest::{Manifest, ManifestEntry};
pub use pipeline::{load_allowlist, Pipeline, PipelineError, ScanReport};
pub use prune::{PruneError, PruneReport, Pruner};
pub use scan::{AssetFile, CategoryListing, ScanError, Scanner};
