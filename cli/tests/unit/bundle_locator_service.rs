//! Tests for the `bundle_locator` application service.

#![allow(clippy::expect_used)]

use luteformobile_setup::application::services::bundle_locator::locate_bundle;
use luteformobile_setup::domain::SetupError;
use luteformobile_setup::infra::fs::StdFs;

use crate::helpers::{INDEX_HTML, write_bundle, write_file};

#[test]
fn test_bundle_in_base_dir() {
    let tmp = tempfile::tempdir().expect("tempdir");
    write_bundle(tmp.path(), INDEX_HTML);

    let bundle = locate_bundle(&StdFs, tmp.path()).expect("found");
    assert_eq!(bundle.as_path(), tmp.path());
}

#[test]
fn test_bundle_in_build_output_dir() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let web = tmp.path().join("build").join("web");
    write_bundle(&web, INDEX_HTML);

    let bundle = locate_bundle(&StdFs, tmp.path()).expect("found");
    assert_eq!(bundle.as_path(), web);
}

#[test]
fn test_base_dir_needs_both_entry_html_and_compiled_app() {
    let tmp = tempfile::tempdir().expect("tempdir");
    write_file(&tmp.path().join("index.html"), INDEX_HTML);
    let web = tmp.path().join("build").join("web");
    write_bundle(&web, INDEX_HTML);

    let bundle = locate_bundle(&StdFs, tmp.path()).expect("found");
    assert_eq!(bundle.as_path(), web);
}

#[test]
fn test_missing_bundle_lists_searched_dirs() {
    let tmp = tempfile::tempdir().expect("tempdir");
    write_file(&tmp.path().join("main.dart.js"), "void main(){}");

    let err = locate_bundle(&StdFs, tmp.path()).expect_err("not found");
    match err {
        SetupError::BundleNotFound { searched } => {
            assert_eq!(
                searched,
                vec![tmp.path().to_path_buf(), tmp.path().join("build").join("web")]
            );
        }
        other => panic!("unexpected error: {other}"),
    }
}
