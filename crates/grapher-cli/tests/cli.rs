// File: crates/grapher-cli/tests/cli.rs
// Purpose: Run the built binary against scratch configs and check exit codes and outputs.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_simple-grapher"))
}

fn run(args: &[&str]) -> Output {
    bin().args(args).env_remove("RUST_LOG").output().expect("spawn simple-grapher")
}

fn write_csv(dir: &Path) -> PathBuf {
    let path = dir.join("data.csv");
    std::fs::write(&path, "x,y\n0,1\n1,4\n2,9\n3,16\n").unwrap();
    path
}

fn write_config(dir: &Path, chart_type: &str, data: &Path, out: &Path) -> PathBuf {
    let yaml = format!(
        "graph:\n  title: CLI test\n  type: {chart_type}\n  style: {{ width: 3, height: 2 }}\n\
         data:\n  sources:\n    - file: \"{}\"\n\
         output:\n  dpi: 50\n  save_path: \"{}\"\n",
        data.display(),
        out.display()
    );
    let path = dir.join("config.yaml");
    std::fs::write(&path, yaml).unwrap();
    path
}

#[test]
fn valid_config_writes_the_image() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_csv(dir.path());
    let out = dir.path().join("out/graph.png");
    let config = write_config(dir.path(), "line", &data, &out);

    let output = run(&[config.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let img = image::open(&out).expect("decode output");
    assert_eq!((img.width(), img.height()), (150, 100));
}

#[test]
fn input_flag_and_output_override() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_csv(dir.path());
    let config = write_config(dir.path(), "bar", &data, &dir.path().join("unused.png"));
    let out = dir.path().join("override.svg");

    let output = run(&["--input", config.to_str().unwrap(), "--output", out.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(!dir.path().join("unused.png").exists());
    assert!(String::from_utf8_lossy(&std::fs::read(&out).unwrap()).contains("<svg"));
}

#[test]
fn check_mode_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_csv(dir.path());
    let out = dir.path().join("graph.png");
    let config = write_config(dir.path(), "scatter", &data, &out);

    let output = run(&["--check", config.to_str().unwrap()]);
    assert!(output.status.success());
    assert!(!out.exists());
}

#[test]
fn malformed_yaml_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("bad.yaml");
    std::fs::write(&config, "graph: [unclosed\n  title: x\n").unwrap();

    let output = run(&[config.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("error:"));
    assert!(!dir.path().join("output").exists());
}

#[test]
fn invalid_chart_type_fails() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_csv(dir.path());
    let out = dir.path().join("graph.png");
    let config = write_config(dir.path(), "pie", &data, &out);

    let output = run(&[config.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("pie"));
    assert!(!out.exists());
}

#[test]
fn missing_data_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("graph.png");
    let config = write_config(dir.path(), "line", &dir.path().join("absent.csv"), &out);

    let output = run(&[config.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("does not exist"));
    assert!(!out.exists());
}

#[test]
fn help_and_version_succeed() {
    for flag in ["--help", "--version"] {
        let output = run(&[flag]);
        assert!(output.status.success(), "{flag}");
        assert!(!output.stdout.is_empty(), "{flag}");
    }
}

#[test]
fn missing_config_is_a_usage_error() {
    assert_eq!(run(&[]).status.code(), Some(2));
}
