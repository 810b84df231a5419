// Runs the built rawbase-cli binary against temporary config files
use std::io::Write;
use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rawbase-cli"))
        .args(args)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn config_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

#[test]
fn test_valid_index() {
    let output = run(&["-q", "valid-index", "1", "[1,2]"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "true");

    let output = run(&["-q", "valid-index", "-1", "string"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "false");
}

#[test]
fn test_init_model_reports_id() {
    let file = config_file("debug = true\nid = \"1e3\"\n");
    let path = file.path().to_str().unwrap();

    let output = run(&["-q", "init", "--config", path, "--model"]);
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.contains("Model initialised"));
    assert!(text.contains("Debug:    true"));
    assert!(text.contains("Log:      resolved"));
    assert!(text.contains("Id:       1000"));
}

#[test]
fn test_dump_config() {
    let file = config_file("name = \"users\"\nid = 3\n");
    let path = file.path().to_str().unwrap();

    let output = run(&["-q", "dump", "--config", path]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "Array\n(\n    [id] => 3\n    [name] => users\n)\n"
    );

    let output = run(&["-q", "dump", "--config", path, "--types"]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("array(2) {\n"));
    assert!(stdout(&output).contains("string(5) \"users\""));
}

#[test]
fn test_missing_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.toml");

    let output = run(&["init", "--config", missing.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read config file"));
}
