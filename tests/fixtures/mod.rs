//! Site tree fixtures for integration tests
//!
//! Builds a throwaway project root laid out like the real site:
//! `site/assets/images/<category>/`, `site/assets/snippets/` and `scripts/`.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use asset_curator::{CuratorConfig, CuratorPaths};
use tempfile::TempDir;

pub struct SiteFixture {
    dir: TempDir,
    paths: CuratorPaths,
}

impl SiteFixture {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let paths = CuratorConfig::default().resolve(dir.path());
        fs::create_dir_all(&paths.images_dir).expect("create images dir");
        Self { dir, paths }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn paths(&self) -> &CuratorPaths {
        &self.paths
    }

    /// Write `<images>/<category>/<name>` with `contents`
    pub fn add(&self, category: &str, name: &str, contents: &str) -> PathBuf {
        let dir = self.paths.images_dir.join(category);
        fs::create_dir_all(&dir).expect("create category dir");
        let path = dir.join(name);
        fs::write(&path, contents).expect("write asset");
        path
    }

    /// Write a file relative to the images dir
    pub fn add_image_path(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.paths.images_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dir");
        }
        fs::write(&path, contents).expect("write file");
        path
    }

    pub fn write_allowlist(&self, json: &str) {
        self.write_script(&self.paths.allowlist_path, json);
    }

    pub fn write_references(&self, lines: &str) {
        self.write_script(&self.paths.references_path, lines);
    }

    pub fn write_config(&self, toml: &str) {
        fs::write(self.root().join("curator.toml"), toml).expect("write config");
    }

    fn write_script(&self, path: &Path, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create scripts dir");
        }
        fs::write(path, contents).expect("write script file");
    }

    pub fn manifest_json(&self) -> serde_json::Value {
        let text = fs::read_to_string(&self.paths.manifest_path).expect("read manifest");
        serde_json::from_str(&text).expect("parse manifest")
    }

    pub fn gallery_html(&self) -> String {
        fs::read_to_string(&self.paths.gallery_path).expect("read gallery")
    }
}
