//! # CLI End-to-End
//!
//! Drives the compiled `kengine` binary against temp directories.

use std::path::Path;
use std::process::{Command, Output};

fn kengine(upload_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_kengine"))
        .arg("--upload-dir")
        .arg(upload_dir)
        .args(args)
        .env_remove("KENGINE_UPLOAD_DIR")
        .env_remove("KENGINE_ANALYZER")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to spawn kengine")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn save_dedups_and_lists() {
    let root = tempfile::tempdir().unwrap();
    let uploads = root.path().join("uploads");

    for (name, body) in [("x.txt", "a"), ("y.txt", "b"), ("z.txt", "a")] {
        let file = root.path().join(name);
        std::fs::write(&file, body).unwrap();
        let out = kengine(&uploads, &["save", file.to_str().unwrap()]);
        assert!(out.status.success(), "save {name} failed: {out:?}");
    }

    let out = kengine(&uploads, &["list"]);
    assert!(out.status.success());
    let names: Vec<String> = stdout(&out).lines().map(str::to_string).collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"ca978112ca1bbdca.txt".to_string()));
    assert!(names.contains(&"3e23e8160039594a.txt".to_string()));
}

#[test]
fn read_streams_raw_bytes() {
    let root = tempfile::tempdir().unwrap();
    let uploads = root.path().join("uploads");
    let file = root.path().join("blob.bin");
    let payload = [0u8, 1, 2, 254, 255];
    std::fs::write(&file, payload).unwrap();

    assert!(kengine(&uploads, &["save", file.to_str().unwrap()]).status.success());
    let name = stdout(&kengine(&uploads, &["list", "--ext", ".bin"]))
        .trim()
        .to_string();

    let out = kengine(&uploads, &["read", &name]);
    assert!(out.status.success());
    assert_eq!(out.stdout, payload);
}

#[test]
fn info_on_missing_file_exits_nonzero_with_json() {
    let root = tempfile::tempdir().unwrap();
    let missing = root.path().join("missing.png");

    let out = kengine(root.path(), &["info", missing.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(value, serde_json::json!({"exists": false}));
}

#[test]
fn read_rejects_path_traversal() {
    let root = tempfile::tempdir().unwrap();
    let out = kengine(&root.path().join("uploads"), &["read", "../secret.txt"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
}

#[test]
fn invalid_env_analyzer_exits_one() {
    let root = tempfile::tempdir().unwrap();
    let out = Command::new(env!("CARGO_BIN_EXE_kengine"))
        .arg("--upload-dir")
        .arg(root.path())
        .arg("list")
        .env_remove("KENGINE_UPLOAD_DIR")
        .env("KENGINE_ANALYZER", "bogus")
        .output()
        .expect("failed to spawn kengine");
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
}

#[test]
fn missing_config_file_exits_one() {
    let root = tempfile::tempdir().unwrap();
    let config = root.path().join("nonexistent.yaml");
    let out = kengine(root.path(), &["--config", config.to_str().unwrap(), "list"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
}
