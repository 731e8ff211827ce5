//! Built-in defaults
//!
//! Paths are relative to the project root and match the static site layout.

/// Directory holding one subdirectory per category
pub const IMAGES_DIR: &str = "site/assets/images";

/// Directory receiving generated HTML snippets
pub const SNIPPETS_DIR: &str = "site/assets/snippets";

/// Manifest file name inside the images directory
pub const MANIFEST_FILE: &str = "manifest.json";

/// Gallery fragment file name inside the snippets directory
pub const GALLERY_FILE: &str = "gallery-items.html";

/// Optional gallery allowlist
pub const ALLOWLIST_PATH: &str = "scripts/gallery-allowlist.json";

/// Asset references used by `prune`
pub const REFERENCES_PATH: &str = "scripts/asset-references.txt";

/// URL prefix under which the site serves the images directory
pub const ASSET_BASE_URL: &str = "/assets/images";

/// Config file looked up at the project root
pub const CONFIG_FILE: &str = "curator.toml";

pub(crate) fn images_dir() -> String {
    IMAGES_DIR.to_string()
}

pub(crate) fn snippets_dir() -> String {
    SNIPPETS_DIR.to_string()
}

pub(crate) fn allowlist_path() -> String {
    ALLOWLIST_PATH.to_string()
}

pub(crate) fn references_path() -> String {
    REFERENCES_PATH.to_string()
}

pub(crate) fn asset_base_url() -> String {
    ASSET_BASE_URL.to_string()
}
