//! End-to-end deploy and detect runs against scratch directories.

#![allow(clippy::expect_used)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

const INDEX_HTML: &str = "<html><head><base href=\"/\"></head><body></body></html>";

struct Sandbox {
    _tmp: tempfile::TempDir,
    root: PathBuf,
    home: PathBuf,
    project: PathBuf,
}

impl Sandbox {
    fn new() -> Self {
        let tmp = tempfile::tempdir().expect("tempdir");
        let root = std::fs::canonicalize(tmp.path()).expect("canonical tempdir");
        let home = root.join("home");
        let project = root.join("work").join("lute-pwa");
        std::fs::create_dir_all(&home).expect("home");
        std::fs::create_dir_all(&project).expect("project");
        Self {
            _tmp: tmp,
            root,
            home,
            project,
        }
    }

    /// A built web app directly in the project directory.
    fn with_bundle(self) -> Self {
        write(&self.project.join("index.html"), INDEX_HTML);
        write(&self.project.join("main.dart.js"), "void main(){}");
        write(&self.project.join("manifest.json"), "{}");
        write(&self.project.join("assets").join("AssetManifest.json"), "{}");
        write(&self.project.join("setup_pwa.py"), "");
        self
    }

    /// A Lute source checkout at `~/lute`; returns its static directory.
    fn with_source_checkout(&self) -> PathBuf {
        let static_dir = self.home.join("lute").join("lute").join("static");
        std::fs::create_dir_all(&static_dir).expect("static");
        static_dir
    }

    /// A Lute checkout that contains the project directory; returns its
    /// static directory.
    fn with_enclosing_checkout(&self) -> PathBuf {
        let checkout = self.project.parent().expect("parent");
        let static_dir = checkout.join("lute").join("static");
        std::fs::create_dir_all(&static_dir).expect("static");
        static_dir
    }

    /// Runs from inside the project directory with no explicit base dir.
    fn cmd_in_project(&self) -> Command {
        let mut cmd = self.cmd();
        cmd.env_remove("LUTE_PWA_BASE_DIR").current_dir(&self.project);
        cmd
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("lute-pwa-setup"));
        cmd.env("NO_COLOR", "1")
            .env("HOME", &self.home)
            .env("LUTE_PWA_CONFIG", self.home.join("no-such-config.yaml"))
            .env("LUTE_PWA_CONTAINER_RUNTIME", "lute-pwa-test-no-such-runtime")
            .env("LUTE_PWA_BASE_DIR", &self.project)
            .env_remove("LUTE_PWA_BUNDLE")
            .env_remove("RUST_LOG");
        cmd
    }
}

fn write(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    std::fs::write(path, content).expect("write");
}

#[test]
fn test_deploy_into_source_checkout() {
    let sandbox = Sandbox::new().with_bundle();
    let static_dir = sandbox.with_source_checkout();

    sandbox
        .cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("LuteForMobile PWA Setup"))
        .stdout(predicate::str::contains("Deployment complete"))
        .stdout(predicate::str::contains(":5001/static/luteformobile/"));

    let dest = static_dir.join("luteformobile");
    let html = std::fs::read_to_string(dest.join("index.html")).expect("index");
    assert!(html.contains(r#"<base href="/static/luteformobile/">"#));
    assert!(dest.join("main.dart.js").is_file());
    assert!(dest.join("assets").join("AssetManifest.json").is_file());
    assert!(!dest.join("setup_pwa.py").exists());
}

#[test]
fn test_deploy_subcommand_json_report() {
    let sandbox = Sandbox::new().with_bundle();
    let static_dir = sandbox.with_source_checkout();

    let output = sandbox
        .cmd()
        .args(["deploy", "--json"])
        .output()
        .expect("run");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(
        report["destination"],
        static_dir.join("luteformobile").display().to_string()
    );
    assert_eq!(report["base_href"], "rewritten");
    assert_eq!(report["skipped"], serde_json::json!(["setup_pwa.py"]));
    assert_eq!(
        report["copied"],
        serde_json::json!(["assets", "index.html", "main.dart.js", "manifest.json"])
    );
}

#[test]
fn test_dry_run_writes_nothing() {
    let sandbox = Sandbox::new().with_bundle();
    let static_dir = sandbox.with_source_checkout();

    sandbox
        .cmd()
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("+ main.dart.js"))
        .stdout(predicate::str::contains("setup_pwa.py (skipped)"));

    assert!(!static_dir.join("luteformobile").exists());
}

#[test]
fn test_bundle_flag_points_at_build_output() {
    let sandbox = Sandbox::new();
    let static_dir = sandbox.with_source_checkout();
    let app = sandbox.project.join("app");
    let web = app.join("build").join("web");
    write(&web.join("index.html"), INDEX_HTML);
    write(&web.join("main.dart.js"), "void main(){}");

    sandbox
        .cmd()
        .arg("--bundle")
        .arg(&app)
        .assert()
        .success();

    assert!(static_dir.join("luteformobile").join("main.dart.js").is_file());
}

#[test]
fn test_missing_installation_fails_with_guidance() {
    let sandbox = Sandbox::new().with_bundle();

    sandbox
        .cmd()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Could not find a Lute installation"))
        .stderr(predicate::str::contains("pip install lute3"));
}

#[test]
fn test_missing_bundle_fails_before_detection() {
    let sandbox = Sandbox::new();
    sandbox.with_source_checkout();

    sandbox
        .cmd()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Could not find the web app bundle"))
        .stderr(predicate::str::contains("--bundle"));
}

#[test]
fn test_json_error_carries_code() {
    let sandbox = Sandbox::new().with_bundle();

    let output = sandbox.cmd().arg("--json").output().expect("run");
    assert_eq!(output.status.code(), Some(1));

    let err: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(err["error"], true);
    assert_eq!(err["code"], "installation_not_found");
}

#[test]
fn test_detect_reports_source_checkout_as_json() {
    let sandbox = Sandbox::new();
    let static_dir = sandbox.with_source_checkout();

    let output = sandbox
        .cmd()
        .args(["detect", "--json"])
        .output()
        .expect("run");
    assert!(output.status.success());

    let info: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(info["type"], "source");
    assert_eq!(info["static_path"], static_dir.display().to_string());
    assert_eq!(info["install_root"], sandbox.home.join("lute").display().to_string());
}

#[test]
fn test_detect_human_output() {
    let sandbox = Sandbox::new();
    sandbox.with_source_checkout();

    sandbox
        .cmd()
        .arg("detect")
        .assert()
        .success()
        .stdout(predicate::str::contains("Installation:"))
        .stdout(predicate::str::contains("source"));
}

fn detect_json(mut cmd: Command) -> serde_json::Value {
    let output = cmd.args(["detect", "--json"]).output().expect("run");
    assert!(
        output.status.success(),
        "stdout: {}\nstderr: {}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid JSON")
}

#[test]
fn test_default_base_dir_finds_enclosing_checkout() {
    let sandbox = Sandbox::new();
    let static_dir = sandbox.with_enclosing_checkout();

    let info = detect_json(sandbox.cmd_in_project());

    assert_eq!(info["type"], "source");
    assert_eq!(info["static_path"], static_dir.display().to_string());
}

#[test]
fn test_relative_base_dir_finds_enclosing_checkout() {
    let sandbox = Sandbox::new();
    let static_dir = sandbox.with_enclosing_checkout();
    let mut cmd = sandbox.cmd_in_project();
    cmd.env("LUTE_PWA_BASE_DIR", ".");

    let info = detect_json(cmd);

    assert_eq!(info["type"], "source");
    assert_eq!(info["static_path"], static_dir.display().to_string());
}

#[test]
fn test_relative_base_dir_deploys_from_cwd() {
    let sandbox = Sandbox::new().with_bundle();
    let static_dir = sandbox.with_enclosing_checkout();
    let mut cmd = sandbox.cmd();
    cmd.env("LUTE_PWA_BASE_DIR", "lute-pwa")
        .current_dir(sandbox.project.parent().expect("parent"));

    cmd.assert().success();

    assert!(static_dir.join("luteformobile").join("main.dart.js").is_file());
}

#[cfg(unix)]
#[test]
fn test_slow_runtime_times_out_and_falls_through_to_source() {
    use std::os::unix::fs::PermissionsExt;

    let sandbox = Sandbox::new();
    let static_dir = sandbox.with_source_checkout();
    let runtime = sandbox.root.join("bin").join("slowdocker");
    write(&runtime, "#!/bin/sh\nsleep 3\nexit 0\n");
    std::fs::set_permissions(&runtime, std::fs::Permissions::from_mode(0o755)).expect("chmod");
    let config = sandbox.root.join("config.yaml");
    write(&config, "container:\n  command_timeout_secs: 1\n");
    let mut cmd = sandbox.cmd();
    cmd.env("LUTE_PWA_CONTAINER_RUNTIME", &runtime)
        .env("LUTE_PWA_CONFIG", &config);

    let info = detect_json(cmd);

    assert_eq!(info["type"], "source");
    assert_eq!(info["static_path"], static_dir.display().to_string());
}

#[test]
fn test_zero_timeout_config_is_rejected() {
    let sandbox = Sandbox::new().with_bundle();
    sandbox.with_source_checkout();
    let config = sandbox.root.join("config.yaml");
    write(&config, "container:\n  copy_timeout_secs: 0\n");

    let output = sandbox
        .cmd()
        .env("LUTE_PWA_CONFIG", &config)
        .arg("--json")
        .output()
        .expect("run");

    assert_eq!(output.status.code(), Some(1));
    let err: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(err["code"], "invalid_config");
}

#[test]
fn test_dry_run_json_names_destination() {
    let sandbox = Sandbox::new().with_bundle();
    let static_dir = sandbox.with_source_checkout();

    let output = sandbox
        .cmd()
        .args(["--dry-run", "--json"])
        .output()
        .expect("run");
    assert!(output.status.success());

    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(plan["dry_run"], true);
    assert_eq!(
        plan["destination"],
        static_dir.join("luteformobile").display().to_string()
    );
    assert_eq!(plan["skipped"], serde_json::json!(["setup_pwa.py"]));
    assert_eq!(plan["copy"].as_array().map(Vec::len), Some(4));
    assert!(!static_dir.join("luteformobile").exists());
}
