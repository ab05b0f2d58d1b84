use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

/// Without any toolchain selection the tool prints its help to stderr
/// and exits successfully, even when the presets file is broken.
///
/// 没有选择任何工具链时，工具将帮助信息打印到 stderr 并成功退出，
/// 即使预设文件已损坏。
#[test]
fn test_no_selection_prints_help_and_succeeds() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("CMakePresets.json"), "not json").unwrap();

    let mut cmd = Command::cargo_bin("preset-matrix").unwrap();
    cmd.arg("--lang")
        .arg("en")
        .arg("--project-dir")
        .arg(dir.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("--msvc"))
        .stderr(predicate::str::contains("--all"))
        .stdout(predicate::str::contains("RESULTS:").not());
}

/// With no presets file nothing is attempted, the summary is still
/// printed and the run succeeds.
///
/// 没有预设文件时不会尝试任何步骤，仍会打印摘要并成功结束。
#[test]
fn test_missing_presets_file_attempts_nothing() {
    let dir = tempdir().unwrap();

    let mut cmd = Command::cargo_bin("preset-matrix").unwrap();
    cmd.arg("--gcc")
        .arg("--lang")
        .arg("en")
        .arg("--project-dir")
        .arg(dir.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("RESULTS:"))
        .stdout(predicate::str::contains("Running").not());
}

/// An empty presets file declares nothing, so the run succeeds without steps.
/// 空的预设文件不声明任何预设，因此运行会成功且不执行任何步骤。
#[test]
fn test_empty_presets_file_attempts_nothing() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("CMakePresets.json"), "").unwrap();

    let mut cmd = Command::cargo_bin("preset-matrix").unwrap();
    cmd.arg("--all")
        .arg("--lang")
        .arg("en")
        .arg("--project-dir")
        .arg(dir.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("RESULTS:"))
        .stdout(predicate::str::contains("Running").not());
}

/// A presets file that cannot be parsed is a setup error.
/// 无法解析的预设文件是一个设置错误。
#[test]
fn test_invalid_presets_file_fails() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("CMakePresets.json"), "{ \"buildPresets\": [").unwrap();

    let mut cmd = Command::cargo_bin("preset-matrix").unwrap();
    cmd.arg("--all")
        .arg("--lang")
        .arg("en")
        .arg("--project-dir")
        .arg(dir.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse preset file"));
}

/// `--log PATH` sends the summary to the file, creating parent directories.
/// `--log PATH` 将摘要写入文件，并创建父目录。
#[test]
fn test_log_path_receives_summary() {
    let dir = tempdir().unwrap();

    let mut cmd = Command::cargo_bin("preset-matrix").unwrap();
    cmd.arg("--all")
        .arg("--log")
        .arg("logs/run.log")
        .arg("--lang")
        .arg("en")
        .arg("--project-dir")
        .arg(dir.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("RESULTS:").not());

    let log = fs::read_to_string(dir.path().join("logs").join("run.log")).unwrap();
    assert!(log.contains("# preset-matrix run started"));
    assert!(log.contains("RESULTS:"));
}

/// `--log` without a value falls back to `build_matrix.log` in the project root.
/// 不带值的 `--log` 回退到项目根目录下的 `build_matrix.log`。
#[test]
fn test_log_without_value_uses_default_name() {
    let dir = tempdir().unwrap();

    let mut cmd = Command::cargo_bin("preset-matrix").unwrap();
    cmd.arg("--clang")
        .arg("--log")
        .arg("--lang")
        .arg("en")
        .arg("--project-dir")
        .arg(dir.path());

    cmd.assert().success();
    assert!(dir.path().join("build_matrix.log").is_file());
}

/// The language switch changes the summary banner.
/// 语言开关会改变摘要标题。
#[test]
fn test_chinese_summary_banner() {
    let dir = tempdir().unwrap();

    let mut cmd = Command::cargo_bin("preset-matrix").unwrap();
    cmd.arg("--msvc")
        .arg("--lang")
        .arg("zh-CN")
        .arg("--project-dir")
        .arg(dir.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("结果："));
}
