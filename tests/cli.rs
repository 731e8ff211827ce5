//! Command-line behavior: default scan, exit codes, output formats

mod fixtures;

use fixtures::SiteFixture;
use std::path::Path;
use std::process::{Command, Output};

fn curator(root: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_asset-curator"))
        .arg("--root")
        .arg(root)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run asset-curator")
}

#[test]
fn test_no_subcommand_scans() {
    let site = SiteFixture::new();
    site.add("renders", "hero-main.png", "x");

    let out = curator(site.root(), &[]);
    assert!(out.status.success());
    assert!(site.paths().manifest_path.exists());
    assert!(site.gallery_html().contains("renders/hero-main.png"));
}

#[test]
fn test_scan_logs_to_stderr() {
    let site = SiteFixture::new();
    let out = curator(site.root(), &["scan"]);
    assert!(out.status.success());
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Skipping missing category directory"));
    assert!(stderr.contains("Wrote manifest"));
}

#[test]
fn test_malformed_config_fails() {
    let site = SiteFixture::new();
    site.write_config("asset_base_url = [");
    let out = curator(site.root(), &["scan"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(!site.paths().manifest_path.exists());
}

#[test]
fn test_explain_exit_codes() {
    let site = SiteFixture::new();

    let eligible = curator(site.root(), &["explain", "renders", "hero-render-final.png"]);
    assert_eq!(eligible.status.code(), Some(0));
    let json: serde_json::Value = serde_json::from_slice(&eligible.stdout).unwrap();
    assert_eq!(json["eligible"], true);
    assert_eq!(json["key"], "hero-render-final");

    let excluded = curator(site.root(), &["explain", "ui", "hero-icon.png", "--human"]);
    assert_eq!(excluded.status.code(), Some(1));
    let text = String::from_utf8_lossy(&excluded.stdout);
    assert!(text.contains("Gallery: EXCLUDED"));
}

#[test]
fn test_explain_rejects_unknown_category() {
    let site = SiteFixture::new();
    let out = curator(site.root(), &["explain", "props", "crate.png"]);
    assert!(!out.status.success());
}

#[test]
fn test_prune_json_dry_run() {
    let site = SiteFixture::new();
    site.add("renders", "hero-main.png", "x");
    site.add("renders", "old.png", "x");
    site.write_references("renders/hero-main.png\n");

    let out = curator(site.root(), &["prune", "--json"]);
    assert!(out.status.success());
    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["executed"], false);
    assert_eq!(report["candidates"][0]["path"], "renders/old.png");
    assert!(site.paths().images_dir.join("renders/old.png").exists());
}

#[test]
fn test_prune_without_references_fails() {
    let site = SiteFixture::new();
    site.add("renders", "old.png", "x");
    let out = curator(site.root(), &["prune", "--execute"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(site.paths().images_dir.join("renders/old.png").exists());
}
