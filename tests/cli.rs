use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempdir().unwrap();
        let dicts = dir.path().join("dicts");
        fs::create_dir_all(&dicts).unwrap();
        fs::write(
            dicts.join("en_US.dic"),
            "6\nhello/M\nworld\nthe\nis\nquick/S\nfox\n",
        )
        .unwrap();
        fs::write(dicts.join("en_US.aff"), "SET UTF-8\n").unwrap();
        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn write(&self, name: &str, content: &str) {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("spellgate").unwrap();
        cmd.current_dir(self.path())
            .env("LANG", "en_US.UTF-8")
            .env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join("config"))
            .env("XDG_DATA_HOME", self.path().join("data"))
            .env("SPELLGATE_DICT_DIR", self.path().join("dicts"))
            .env_remove("RUST_LOG")
            .arg("--no-color");
        cmd
    }
}

#[test]
fn test_clean_file_passes() {
    let ws = Workspace::new();
    ws.write("clean.txt", "Hello world, the quick fox.\n");

    ws.cmd()
        .arg("clean.txt")
        .assert()
        .success()
        .stdout(predicate::str::contains("No spelling errors found"));
}

#[test]
fn test_misspelling_fails_with_location() {
    let ws = Workspace::new();
    ws.write("typo.txt", "hello world\nthe wrold is quick\n");

    ws.cmd()
        .arg("typo.txt")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("2:5 wrold"))
        .stdout(predicate::str::contains("→ world"));
}

#[test]
fn test_no_fail_flag() {
    let ws = Workspace::new();
    ws.write("typo.txt", "wrold\n");

    ws.cmd().args(["--no-fail", "typo.txt"]).assert().success();
}

#[test]
fn test_json_output() {
    let ws = Workspace::new();
    ws.write("docs/a.md", "hello wrold\n");
    ws.write("docs/b.md", "the fox\n");

    let output = ws
        .cmd()
        .args(["--no-fail", "-o", "json", "docs"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["files_checked"], 2);
    assert_eq!(json["total_errors"], 1);
    assert_eq!(json["errors"][0]["word"], "wrold");
    assert_eq!(json["errors"][0]["column"], 7);
}

#[test]
fn test_unreadable_file_does_not_stop_the_run() {
    let ws = Workspace::new();
    fs::write(ws.path().join("binary.dat"), [0xff, 0xfe, 0x00, 0xc3]).unwrap();
    ws.write("typo.txt", "the wrold\n");

    ws.cmd()
        .args(["--no-fail", "binary.dat", "typo.txt", "gone.txt"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("1:5 wrold"))
        .stderr(predicate::str::contains("Failed to read file: binary.dat"))
        .stderr(predicate::str::contains("File not found: gone.txt"));
}

#[test]
fn test_many_files_are_all_reported() {
    let ws = Workspace::new();
    for i in 0..40 {
        ws.write(&format!("many/{i:02}.txt"), "hello wrold\n");
    }

    let output = ws
        .cmd()
        .args(["--no-fail", "-o", "json", "many"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["files_checked"], 40);
    assert_eq!(json["total_errors"], 40);
}

#[test]
fn test_personal_dictionary_via_add() {
    let ws = Workspace::new();
    ws.write("jargon.txt", "hello rustacean\n");

    ws.cmd().arg("jargon.txt").assert().code(1);

    ws.cmd()
        .args(["add", "rustacean"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 1 word(s)"));

    ws.cmd().arg("jargon.txt").assert().success();
}

#[test]
fn test_dict_list() {
    let ws = Workspace::new();

    ws.cmd()
        .args(["dict", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("en_US"));
}

#[test]
fn test_dict_info() {
    let ws = Workspace::new();

    ws.cmd()
        .args(["dict", "info", "en_US.UTF-8"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Words: 6"))
        .stdout(predicate::str::contains("Affix file: present"));
}

#[test]
fn test_missing_files_argument() {
    let ws = Workspace::new();

    ws.cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("No files specified"));
}
