//! Unused asset cleanup tests

mod fixtures;

use asset_curator::prune::{KeepRules, References};
use asset_curator::{CuratorConfig, Manifest, Pipeline, PruneError, Pruner};
use fixtures::SiteFixture;

fn pruner(site: &SiteFixture, keep: &[&str]) -> Pruner {
    let mut config = CuratorConfig::default();
    config.prune.keep = keep.iter().map(|s| s.to_string()).collect();
    Pruner::from_config(site.paths(), &config.prune).expect("pruner")
}

fn populated_site() -> SiteFixture {
    let site = SiteFixture::new();
    site.add("renders", "hero-main.png", "hero");
    site.add("renders", "TG_RENDER_00001_.png", "0123456789");
    site.add("factions", "directorate-emblem.png", "x");
    site.add("factions", "Free77_palette.png", "xx");
    site.add_image_path("logo.png", "logo");
    site.add_image_path("renders/notes.md", "not an asset");
    Pipeline::new(CuratorConfig::default(), site.root())
        .run()
        .expect("scan");
    site.write_references("# home page\nrenders/hero-main.png\nfactions/directorate-emblem.png\n");
    site
}

#[test]
fn test_dry_run_deletes_nothing() {
    let site = populated_site();
    let report = pruner(&site, &[]).run(false).unwrap();

    assert!(!report.executed);
    let paths: Vec<&str> = report.candidates.iter().map(|c| c.path.as_str()).collect();
    assert_eq!(
        paths,
        vec!["factions/Free77_palette.png", "logo.png", "renders/TG_RENDER_00001_.png"]
    );
    assert_eq!(report.total_bytes, 2 + 4 + 10);
    assert!(report.deleted.is_empty());
    assert!(site.paths().images_dir.join("logo.png").exists());
    assert!(site.paths().images_dir.join("renders/TG_RENDER_00001_.png").exists());
}

#[test]
fn test_manifest_is_never_a_candidate() {
    let site = populated_site();
    let report = pruner(&site, &[]).run(false).unwrap();
    assert!(site.paths().manifest_path.exists());
    assert!(report.candidates.iter().all(|c| c.path != "manifest.json"));
    // manifest.json, logo.png and four category files
    assert_eq!(report.scanned, 6);
}

#[test]
fn test_keep_globs_protect_files() {
    let site = populated_site();
    let report = pruner(&site, &["logo.png", "factions/*_palette.png"])
        .run(false)
        .unwrap();
    let paths: Vec<&str> = report.candidates.iter().map(|c| c.path.as_str()).collect();
    assert_eq!(paths, vec!["renders/TG_RENDER_00001_.png"]);
}

#[test]
fn test_execute_deletes_and_rewrites_manifest() {
    let site = populated_site();
    let before = Manifest::from_file(&site.paths().manifest_path).unwrap();
    assert_eq!(before.total, 4);

    let report = pruner(&site, &["logo.png"]).run(true).unwrap();

    assert!(report.executed);
    assert_eq!(
        report.deleted,
        vec!["factions/Free77_palette.png", "renders/TG_RENDER_00001_.png"]
    );
    assert!(report.failures.is_empty());
    assert!(!site.paths().images_dir.join("renders/TG_RENDER_00001_.png").exists());
    assert!(site.paths().images_dir.join("logo.png").exists());
    assert!(site.paths().images_dir.join("renders/notes.md").exists());

    let after = Manifest::from_file(&site.paths().manifest_path).unwrap();
    assert_eq!(report.manifest_entries_removed, 2);
    assert_eq!(after.total, 2);
    assert!(after.renders.contains_key("hero-main.png"));
    assert!(after.factions.contains_key("directorate-emblem.png"));
    assert_eq!(after.last_updated, before.last_updated);
}

#[test]
fn test_bare_filename_reference_keeps_manifest_entry() {
    let site = populated_site();
    site.write_references("renders/hero-main.png\ndirectorate-emblem.png\n");

    let report = pruner(&site, &[]).run(true).unwrap();
    let after = Manifest::from_file(&site.paths().manifest_path).unwrap();

    // the file itself is unreferenced by path and gets deleted
    assert!(report
        .deleted
        .contains(&"factions/directorate-emblem.png".to_string()));
    // its manifest entry survives through the bare name
    assert!(after.factions.contains_key("directorate-emblem.png"));
}

#[test]
fn test_missing_references_file_is_an_error() {
    let site = SiteFixture::new();
    site.add("renders", "hero-main.png", "x");
    let err = Pruner::from_config(site.paths(), &Default::default()).unwrap_err();
    assert!(matches!(err, PruneError::ReferencesNotFound(_)));
    assert!(site.paths().images_dir.join("renders/hero-main.png").exists());
}

#[test]
fn test_execute_without_manifest() {
    let site = SiteFixture::new();
    site.add("renders", "old.png", "x");
    let pruner = Pruner::new(
        site.paths().images_dir.clone(),
        site.paths().manifest_path.clone(),
        References::parse(""),
        KeepRules::new(Vec::<String>::new()).unwrap(),
    );
    let report = pruner.run(true).unwrap();
    assert_eq!(report.deleted, vec!["renders/old.png"]);
    assert_eq!(report.manifest_entries_removed, 0);
    assert!(!site.paths().manifest_path.exists());
}

#[test]
fn test_unreadable_manifest_aborts_before_deleting() {
    let site = populated_site();
    std::fs::write(
        &site.paths().manifest_path,
        r#"{"renders": {}, "total": {}, "lastUpdated": {}}"#,
    )
    .unwrap();

    let err = pruner(&site, &[]).run(true).unwrap_err();
    assert!(matches!(err, PruneError::ManifestUnreadable { .. }));
    assert!(site.paths().images_dir.join("renders/TG_RENDER_00001_.png").exists());
    assert!(site.paths().images_dir.join("factions/Free77_palette.png").exists());
    assert!(site.paths().images_dir.join("logo.png").exists());
}

#[test]
fn test_unreadable_manifest_does_not_block_dry_run() {
    let site = populated_site();
    std::fs::write(&site.paths().manifest_path, "{ broken").unwrap();

    let report = pruner(&site, &[]).run(false).unwrap();
    assert_eq!(report.candidates.len(), 3);
}

#[test]
fn test_kept_files_stay_in_manifest() {
    let site = populated_site();
    let report = pruner(&site, &["factions/*_palette.png"]).run(true).unwrap();

    assert!(!report
        .deleted
        .contains(&"factions/Free77_palette.png".to_string()));
    assert!(site.paths().images_dir.join("factions/Free77_palette.png").exists());

    let after = Manifest::from_file(&site.paths().manifest_path).unwrap();
    assert!(after.factions.contains_key("Free77_palette.png"));
    assert!(!after.renders.contains_key("TG_RENDER_00001_.png"));
    assert_eq!(after.total, 3);
    assert_eq!(report.manifest_entries_removed, 1);
}
