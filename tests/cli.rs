use std::fs;
use std::ffi::OsStr;
use std::path::PathBuf;
use std::process::{Command, Output};

const SCHEMA: &str = r#"{
    "type": "object",
    "required": ["blocks"],
    "properties": {
        "device": {"type": "string"},
        "blocks": {"type": "array"}
    }
}"#;

const GOOD: &str = "
device: good
blocks:
  - name: BLK
    registers:
      - name: CTRL
        offset: 0x0
        fields:
          - { name: EN, lsb: 0, width: 1 }
          - { name: MODE, lsb: 4, width: 2 }
      - name: STATUS
        offset: 0x4
";

const COLLIDING: &str = "
device: colliding
blocks:
  - name: BLK
    registers:
      - name: A
        offset: 0x8
      - name: B
        offset: 0x8
";

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir()
        .join(format!("regcheck-cli-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(dir.join("devices")).unwrap();
    fs::write(dir.join("schema.json"), SCHEMA).unwrap();
    dir
}

fn regcheck<I, S>(args: I) -> Output
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    Command::new(env!("CARGO_BIN_EXE_regcheck"))
        .args(args)
        .output()
        .expect("Failed to run regcheck")
}

#[test]
fn passing_run_exits_zero_with_warnings() {
    let dir = scratch_dir("pass");
    fs::write(dir.join("devices/good.yaml"), GOOD).unwrap();

    let out = regcheck(vec![dir.join("schema.json"), dir.join("devices")]);
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.starts_with("Validation OK\n"));
    assert!(stdout.contains("warning: Hole in good.BLK.CTRL (width=32): bits [1,4)"));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn failing_run_exits_two_with_errors() {
    let dir = scratch_dir("fail");
    fs::write(dir.join("devices/good.yaml"), GOOD).unwrap();
    fs::write(dir.join("devices/colliding.yml"), COLLIDING).unwrap();

    let out = regcheck(vec![dir.join("schema.json"), dir.join("devices")]);
    assert_eq!(out.status.code(), Some(2));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(
        stdout,
        "Validation FAILED:\n - Duplicate absolute offset 0x8 in block BLK (colliding): B vs A\n"
    );

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn unreadable_schema_exits_three() {
    let dir = scratch_dir("schema");
    fs::write(dir.join("devices/good.yaml"), GOOD).unwrap();

    let out = regcheck(vec![dir.join("missing.json"), dir.join("devices")]);
    assert_eq!(out.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Could not read schema"));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn missing_arguments_exit_one() {
    let out = regcheck(vec!["schema.json"]);
    assert_eq!(out.status.code(), Some(1));
}
