use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

const JDK_API: &str = "https://docs.oracle.com/javase/8/docs/api";

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_doclet")))
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn read(dir: &TempDir, file: &str) -> String {
    fs::read_to_string(dir.path().join(file))
        .unwrap_or_else(|e| panic!("{}: {}", file, e))
}

/// Run over both fixture models with the JDK linked offline.
fn generate(dir: &TempDir) -> assert_cmd::assert::Assert {
    cmd()
        .args(["-d", dir.path().to_str().unwrap()])
        .args(["--link-offline", JDK_API, &fixture_path("jdk")])
        .arg(fixture_path("widget.json"))
        .arg(fixture_path("util.json"))
        .assert()
}

// -- generated tree --

#[test]
fn writes_pages_for_every_documented_class_and_package() {
    let dir = TempDir::new().unwrap();
    generate(&dir).success();

    for file in [
        "com/acme/Widget.html",
        "com/acme/Base.html",
        "com/acme/Legacy.html",
        "com/acme/util/Helper.html",
        "com/acme/package-summary.html",
        "com/acme/util/package-summary.html",
        "index-all.html",
        "allclasses.html",
        "stylesheet.css",
    ] {
        assert!(dir.path().join(file).is_file(), "missing {}", file);
    }
    assert_eq!(read(&dir, "package-list"), "com.acme\ncom.acme.util\n");
}

#[test]
fn member_anchors_on_class_page() {
    let dir = TempDir::new().unwrap();
    generate(&dir).success();

    let page = read(&dir, "com/acme/Widget.html");
    assert!(page.contains("<a id=\"render-java.util.List-\"></a>"));
    assert!(page.contains("<a id=\"add-T-\"></a>"));
    assert!(page.contains("<a id=\"add-java.lang.Object-\"></a>"));
    assert!(page.contains("<a id=\"NAME\"></a>"));
}

#[test]
fn links_resolve_across_pages_and_models() {
    let dir = TempDir::new().unwrap();
    generate(&dir).success();

    let base = read(&dir, "com/acme/Base.html");
    assert!(base.contains(
        "<a href=\"../../com/acme/Widget.html#render-java.util.List-\"><code>Widget.render(java.util.List)</code></a>"
    ));

    let helper = read(&dir, "com/acme/util/Helper.html");
    assert!(helper.contains("<a href=\"../../../com/acme/Widget.html#NAME\">&quot;widget&quot;</a>"));

    let widget = read(&dir, "com/acme/Widget.html");
    assert!(widget.contains(&format!(
        "<a href=\"{}/java/util/List.html?is-external=true\" title=\"class or interface in java.util\"><code>List</code></a>",
        JDK_API
    )));
    assert!(widget.contains(
        "\nextends <a href=\"../../com/acme/Base.html\" title=\"class in com.acme\">Base</a>"
    ));
}

#[test]
fn index_redirects_relative_links_but_package_page_keeps_them() {
    let dir = TempDir::new().unwrap();
    generate(&dir).success();

    let index = read(&dir, "index-all.html");
    assert!(index.contains("<a href=\"./com/acme/doc-files/widget.png\">a picture</a>"));

    let package = read(&dir, "com/acme/package-summary.html");
    assert!(package.contains("<a href=\"doc-files/guide.html\">the guide</a>"));
    assert!(package.contains("<a href=\"doc-files/widget.png\">a picture</a>"));
}

// -- diagnostics --

#[test]
fn unknown_reference_warns_once() {
    let dir = TempDir::new().unwrap();
    let assert = generate(&dir).success().stderr(predicate::str::contains(
        "com/acme/Widget.java:12: warning - Tag @link: reference not found: com.other.Unknown",
    ));
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    assert_eq!(stderr.matches("reference not found").count(), 1, "{}", stderr);
    assert!(stderr.contains("1 warning\n"));

    let page = read(&dir, "com/acme/Widget.html");
    assert!(page.contains("talks to <code>com.other.Unknown</code>."));
}

#[test]
fn unlinked_external_reference_is_also_reported() {
    let dir = TempDir::new().unwrap();
    cmd()
        .args(["-d", dir.path().to_str().unwrap()])
        .arg(fixture_path("widget.json"))
        .assert()
        .success()
        .stderr(predicate::str::contains("reference not found: java.util.List"))
        .stderr(predicate::str::contains("2 warnings"));
}

#[test]
fn unknown_package_is_an_error() {
    let dir = TempDir::new().unwrap();
    cmd()
        .args(["-d", dir.path().to_str().unwrap()])
        .args(["-p", "com.missing"])
        .arg(fixture_path("widget.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No model data for package com.missing"))
        .stderr(predicate::str::contains("1 error"));
}

// -- options --

#[test]
fn model_directory_is_expanded() {
    let dir = TempDir::new().unwrap();
    cmd()
        .args(["-d", dir.path().to_str().unwrap()])
        .args(["--link-offline", JDK_API, &fixture_path("jdk")])
        .arg(fixture_path(""))
        .assert()
        .success();
    assert!(dir.path().join("com/acme/util/Helper.html").is_file());
    assert!(dir.path().join("com/acme/Widget.html").is_file());
}

#[test]
fn no_deprecated_skips_pages() {
    let dir = TempDir::new().unwrap();
    cmd()
        .args(["-d", dir.path().to_str().unwrap(), "--no-deprecated"])
        .arg(fixture_path("widget.json"))
        .assert()
        .success();
    assert!(!dir.path().join("com/acme/Legacy.html").exists());
    assert!(dir.path().join("com/acme/Base.html").is_file());
}

#[test]
fn package_list_read_from_link_offline_directory() {
    let lists = TempDir::new().unwrap();
    fs::write(lists.path().join("package-list"), "java.util\n").unwrap();
    let dir = TempDir::new().unwrap();
    cmd()
        .args(["-d", dir.path().to_str().unwrap()])
        .args(["--link-offline", "../jdk-api", lists.path().to_str().unwrap()])
        .arg(fixture_path("widget.json"))
        .assert()
        .success();
    let page = read(&dir, "com/acme/Widget.html");
    assert!(page.contains("href=\"../../../jdk-api/java/util/List.html?is-external=true\""));
}

#[test]
fn missing_package_list_is_fatal() {
    let dir = TempDir::new().unwrap();
    let missing = Path::new(&fixture_path("")).join("no-such-dir");
    cmd()
        .args(["-d", dir.path().to_str().unwrap()])
        .args(["--link-offline", JDK_API, missing.to_str().unwrap()])
        .arg(fixture_path("widget.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("error fetching URL"));
}

#[test]
fn output_is_required() {
    cmd()
        .arg(fixture_path("widget.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("--output"));
}

#[test]
fn docroot_parent_must_be_absolute() {
    let dir = TempDir::new().unwrap();
    cmd()
        .args(["-d", dir.path().to_str().unwrap()])
        .args(["--docroot-parent", "../parent"])
        .arg(fixture_path("widget.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("absolute URL"));
}

#[test]
fn malformed_model_is_fatal() {
    let dir = TempDir::new().unwrap();
    let model = dir.path().join("broken.json");
    fs::write(&model, "{\"classes\": [{\"name\": 1}]}").unwrap();
    cmd()
        .args(["-d", dir.path().join("out").to_str().unwrap()])
        .arg(model.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid model"));
}
