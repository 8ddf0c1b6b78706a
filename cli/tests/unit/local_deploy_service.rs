//! Tests for the deploy procedure against a local filesystem target.

#![allow(clippy::expect_used)]

use std::path::Path;

use luteformobile_setup::application::ports::DeployTarget;
use luteformobile_setup::application::services::deploy::{
    DeployReport, LocalTarget, deploy_bundle, plan_deployment,
};
use luteformobile_setup::domain::BaseHrefOutcome;
use luteformobile_setup::domain::base_href::BASE_HREF_MARKERS;
use luteformobile_setup::domain::bundle::BundlePath;
use luteformobile_setup::infra::fs::StdFs;

use crate::helpers::{
    CollectingReporter, INDEX_HTML, NoopReporter, mkdirs, snapshot, top_level_names, write_bundle,
    write_file,
};

async fn deploy(bundle_dir: &Path, static_path: &Path) -> DeployReport {
    let fs = StdFs;
    let bundle = BundlePath::confirmed(bundle_dir.to_path_buf());
    let plan = plan_deployment(&fs, &bundle).expect("plan");
    let target = LocalTarget::new(&fs, static_path);
    deploy_bundle(&target, &bundle, &plan, &NoopReporter)
        .await
        .expect("deploy")
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).expect("read")
}

#[tokio::test]
async fn test_only_allow_listed_members_are_deployed() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let bundle = tmp.path().join("bundle");
    let static_path = tmp.path().join("static");
    write_bundle(&bundle, INDEX_HTML);
    mkdirs(&static_path);

    let report = deploy(&bundle, &static_path).await;

    let dest = static_path.join("luteformobile");
    assert_eq!(
        top_level_names(&dest),
        vec![
            "assets",
            "canvaskit",
            "favicon.png",
            "flutter.js",
            "flutter_bootstrap.js",
            "flutter_service_worker.js",
            "icons",
            "index.html",
            "main.dart.js",
            "manifest.json",
            "version.json",
        ]
    );
    assert_eq!(report.skipped, vec!["README.md", "setup_pwa.py"]);
    assert_eq!(report.copied.len(), 11);
    assert_eq!(report.destination, dest.display().to_string());
}

#[tokio::test]
async fn test_nested_directories_are_copied_whole() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let bundle = tmp.path().join("bundle");
    let static_path = tmp.path().join("static");
    write_bundle(&bundle, INDEX_HTML);

    deploy(&bundle, &static_path).await;

    let dest = static_path.join("luteformobile");
    assert_eq!(snapshot(&dest.join("assets")), snapshot(&bundle.join("assets")));
    assert_eq!(read(&dest.join("assets/fonts/MaterialIcons.otf")), "otf");
    assert_eq!(read(&dest.join("canvaskit/canvaskit.wasm")), "wasm");
}

#[tokio::test]
async fn test_base_href_is_rewritten_in_deployed_copy_only() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let bundle = tmp.path().join("bundle");
    let static_path = tmp.path().join("static");
    write_bundle(&bundle, INDEX_HTML);

    let report = deploy(&bundle, &static_path).await;

    assert_eq!(report.base_href, BaseHrefOutcome::Rewritten);
    let deployed = read(&static_path.join("luteformobile/index.html"));
    assert!(deployed.contains(r#"<base href="/static/luteformobile/">"#));
    assert!(!deployed.contains(r#"<base href="/">"#));
    assert_eq!(read(&bundle.join("index.html")), INDEX_HTML);
}

#[tokio::test]
async fn test_every_marker_form_is_rewritten() {
    for marker in BASE_HREF_MARKERS {
        let tmp = tempfile::tempdir().expect("tempdir");
        let bundle = tmp.path().join("bundle");
        let static_path = tmp.path().join("static");
        write_bundle(&bundle, &format!("<html><head>{marker}</head></html>"));

        let report = deploy(&bundle, &static_path).await;

        assert_eq!(report.base_href, BaseHrefOutcome::Rewritten, "marker {marker}");
        assert_eq!(
            read(&static_path.join("luteformobile/index.html")),
            r#"<html><head><base href="/static/luteformobile/"></head></html>"#
        );
    }
}

#[tokio::test]
async fn test_unrecognised_base_href_is_left_alone() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let bundle = tmp.path().join("bundle");
    let static_path = tmp.path().join("static");
    let html = r#"<html><head><base href="/custom/"></head></html>"#;
    write_bundle(&bundle, html);

    let report = deploy(&bundle, &static_path).await;

    assert_eq!(report.base_href, BaseHrefOutcome::NoMarker);
    assert_eq!(read(&static_path.join("luteformobile/index.html")), html);
}

#[tokio::test]
async fn test_missing_entry_html_skips_rewrite() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let bundle = tmp.path().join("bundle");
    let static_path = tmp.path().join("static");
    write_bundle(&bundle, INDEX_HTML);
    std::fs::remove_file(bundle.join("index.html")).expect("remove");

    let report = deploy(&bundle, &static_path).await;

    assert_eq!(report.base_href, BaseHrefOutcome::EntryMissing);
    assert!(!static_path.join("luteformobile/index.html").exists());
}

#[tokio::test]
async fn test_redeploy_replaces_previous_contents() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let bundle = tmp.path().join("bundle");
    let static_path = tmp.path().join("static");
    write_bundle(&bundle, INDEX_HTML);
    let dest = static_path.join("luteformobile");
    write_file(&dest.join("old_chunk.js"), "stale");
    write_file(&dest.join("assets").join("stale.json"), "stale");

    deploy(&bundle, &static_path).await;
    let first = snapshot(&dest);
    deploy(&bundle, &static_path).await;

    assert_eq!(snapshot(&dest), first);
    assert!(!dest.join("old_chunk.js").exists());
    assert!(!dest.join("assets").join("stale.json").exists());
}

#[tokio::test]
async fn test_siblings_of_deploy_dir_are_untouched() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let bundle = tmp.path().join("bundle");
    let static_path = tmp.path().join("static");
    write_bundle(&bundle, INDEX_HTML);
    write_file(&static_path.join("css").join("lute.css"), "body{}");

    deploy(&bundle, &static_path).await;

    assert_eq!(read(&static_path.join("css/lute.css")), "body{}");
}

#[tokio::test]
async fn test_skipped_members_are_reported() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let bundle_dir = tmp.path().join("bundle");
    write_bundle(&bundle_dir, INDEX_HTML);
    let fs = StdFs;
    let bundle = BundlePath::confirmed(bundle_dir);
    let plan = plan_deployment(&fs, &bundle).expect("plan");
    let target = LocalTarget::new(&fs, &tmp.path().join("static"));
    let reporter = CollectingReporter::default();

    deploy_bundle(&target, &bundle, &plan, &reporter)
        .await
        .expect("deploy");

    let log = reporter.joined();
    assert!(log.contains("warn: skipping README.md"));
    assert!(log.contains("warn: skipping setup_pwa.py"));
    assert!(!log.contains(".last_build_id"));
    assert!(log.contains(&format!("success: copied app files to {}", target.destination())));
}
