use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

/// Write a config that rewrites the prefix `/abs/core/` and returns its path
fn write_config(temp_dir: &TempDir) -> std::path::PathBuf {
    let config = temp_dir.child("relativize.toml");
    config
        .write_str(
            r#"
core_dir = "/abs/core"
core_lib_dir = "../core"
build_dir = "../lib"
"#,
        )
        .unwrap();
    config.path().to_path_buf()
}

fn relativize() -> Command {
    Command::cargo_bin("relativize").unwrap()
}

#[test]
fn test_help() {
    relativize()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Rewrite absolute paths in CMake-generated Xcode projects",
        ));
}

#[test]
fn test_version() {
    relativize()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("relativize"));
}

#[test]
fn test_rewrites_project_file() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(&temp_dir);
    let pbxproj = temp_dir.child("Core.xcodeproj/project.pbxproj");
    pbxproj
        .write_str("SRCROOT = /abs/core/;\nSDKROOT = iphoneos;\n")
        .unwrap();

    relativize()
        .arg(temp_dir.path())
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Reading directory:"))
        .stdout(predicate::str::contains("Replacing absolute paths in"))
        .stdout(predicate::str::contains("Rewrote 1 of"));

    pbxproj.assert("SRCROOT = ../;\nSDKROOT = auto;\n");
}

#[test]
fn test_scheme_files_are_eligible() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(&temp_dir);
    let scheme = temp_dir.child("xcshareddata/xcschemes/Core.xcscheme");
    scheme
        .write_str("BuildableName = \"/abs/core/build/libcore.a\"\n")
        .unwrap();

    relativize()
        .arg(temp_dir.path())
        .arg("--config")
        .arg(&config)
        .assert()
        .success();

    scheme.assert("BuildableName = \"../build/libcore.a\"\n");
}

#[test]
fn test_txt_file_never_touched() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(&temp_dir);
    let notes = temp_dir.child("notes.txt");
    notes.write_str("SRCROOT = /abs/core/;\n").unwrap();

    relativize()
        .arg(temp_dir.path())
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Rewrote 0 of 0"));

    notes.assert("SRCROOT = /abs/core/;\n");
}

#[test]
fn test_dry_run_leaves_files_alone() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(&temp_dir);
    let pbxproj = temp_dir.child("project.pbxproj");
    pbxproj.write_str("TARGET_TEMP_DIR = /some/path;\n").unwrap();

    relativize()
        .arg(temp_dir.path())
        .arg("--config")
        .arg(&config)
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Would rewrite 1 of 1"));

    pbxproj.assert("TARGET_TEMP_DIR = /some/path;\n");
}

#[test]
fn test_quiet_suppresses_progress() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(&temp_dir);
    let pbxproj = temp_dir.child("project.pbxproj");
    pbxproj.write_str("SDKROOT = iphoneos;\n").unwrap();

    relativize()
        .arg(temp_dir.path())
        .arg("--config")
        .arg(&config)
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("Reading directory").not())
        .stdout(predicate::str::contains("Replacing absolute paths").not())
        .stdout(predicate::str::contains("Rewrote 1 of 1"));
}

#[test]
fn test_json_output() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(&temp_dir);
    let pbxproj = temp_dir.child("project.pbxproj");
    pbxproj.write_str("SDKROOT = iphoneos;\n").unwrap();

    let output = relativize()
        .arg(temp_dir.path())
        .arg("--config")
        .arg(&config)
        .args(["--output", "json"])
        .assert()
        .success()
        .get_output()
        .clone();

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["success"], true);
    assert_eq!(parsed["operation"], "rewrite");
    assert_eq!(parsed["summary"]["files_scanned"], 1);
    assert_eq!(parsed["summary"]["files_rewritten"], 1);
    assert_eq!(parsed["summary"]["errors"], 0);
}

#[test]
fn test_missing_root_exits_with_invalid_input() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(&temp_dir);

    relativize()
        .arg(temp_dir.path().join("does-not-exist"))
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("failed to read root directory"));
}

#[test]
fn test_bad_config_exits_with_invalid_input() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.child("relativize.toml");
    config.write_str("core_dir = [broken").unwrap();

    relativize()
        .arg(temp_dir.path())
        .arg("--config")
        .arg(config.path())
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("failed to parse config"));
}

#[test]
fn test_second_run_produces_identical_content() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(&temp_dir);
    let pbxproj = temp_dir.child("project.pbxproj");
    pbxproj
        .write_str("SRCROOT = /abs/core/;\nSYMROOT = /tmp/out;\nlibfmt = fmt;\n")
        .unwrap();

    relativize()
        .arg(temp_dir.path())
        .arg("--config")
        .arg(&config)
        .assert()
        .success();
    let after_first = std::fs::read_to_string(pbxproj.path()).unwrap();

    relativize()
        .arg(temp_dir.path())
        .arg("--config")
        .arg(&config)
        .assert()
        .success();
    let after_second = std::fs::read_to_string(pbxproj.path()).unwrap();

    assert_eq!(after_first, after_second);
    assert_eq!(
        after_second,
        "SRCROOT = ../;\nBUILD_DIR = ../lib;\nlibfmt = fmtd;\n"
    );
}
