use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

struct TestEnv {
    _tmp: TempDir,
    home: PathBuf,
    data: PathBuf,
    out: PathBuf,
}

impl TestEnv {
    fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        fs::create_dir_all(&home).expect("create isolated home");
        let data = tmp.path().join("data");
        let out = tmp.path().join("out");

        Self {
            _tmp: tmp,
            home,
            data,
            out,
        }
    }

    fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("nas");
        cmd.env("HOME", &self.home)
            .env_remove("RUST_LOG")
            .arg("--data-dir")
            .arg(&self.data);
        cmd
    }

    fn login(&self) {
        self.cmd()
            .args(["login", "Clínica Alemana", "--key", "CA"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Logged in to Clínica Alemana"));
    }
}

#[test]
fn facilities_show_hints() {
    let env = TestEnv::new();
    env.cmd()
        .arg("facilities")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Clínica Alemana → CA"))
        .stdout(predicate::str::contains("Hospital del Salvador → HS"));
}

#[test]
fn facilities_warn_when_session_unreadable() {
    let env = TestEnv::new();
    // A directory where the session file belongs makes every read fail
    fs::create_dir_all(env.data.join("session.json")).expect("create blocking dir");

    env.cmd()
        .arg("facilities")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Clínica Alemana → CA"))
        .stderr(predicate::str::contains("could not read session"));
}

#[test]
fn config_rejects_reserved_facility_name() {
    let env = TestEnv::new();
    let config = env.home.join("nas.yaml");
    fs::write(&config, "facilities:\n  - Default\n  - Clínica Alemana\n").expect("write config");

    env.cmd()
        .arg("--config")
        .arg(&config)
        .arg("facilities")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("reserved storage key"));
}

#[test]
fn login_rejects_wrong_and_empty_keys() {
    let env = TestEnv::new();
    env.cmd()
        .args(["login", "Clínica Alemana", "--key", "CAX"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Wrong access key"));

    env.cmd()
        .args(["login", "Clínica Alemana", "--key", ""])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Enter the access key"));

    env.cmd().arg("status").assert().code(1);
}

#[test]
fn login_accepts_index_and_unaccented_key() {
    let env = TestEnv::new();
    env.cmd()
        .args(["login", "1", "--key", "ca"])
        .assert()
        .success();
    env.cmd()
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in to Clínica Alemana"));
}

#[test]
fn unknown_facility_is_input_error() {
    let env = TestEnv::new();
    env.cmd()
        .args(["login", "Nowhere Hospital", "--key", "NH"])
        .assert()
        .code(4);
}

#[test]
fn score_resolves_exclusive_groups() {
    let env = TestEnv::new();
    // 1a is replaced by 1c; 1c (19.6) + 2 (4.3)
    env.cmd()
        .args(["score", "1a", "1c", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total score: 23,9"))
        .stdout(predicate::str::contains("1a").not());
}

#[test]
fn submit_requires_login() {
    let env = TestEnv::new();
    env.cmd()
        .args(["submit", "1a"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Not logged in"));
}

#[test]
fn export_without_history_is_no_data() {
    let env = TestEnv::new();
    env.login();
    env.cmd()
        .arg("export")
        .arg("--out")
        .arg(&env.out)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("No data to export"));

    env.cmd().arg("last").assert().code(3);
}

#[test]
fn submit_history_last_and_export() {
    let env = TestEnv::new();
    env.login();

    env.cmd()
        .args([
            "submit", "1a", "1b", "7a", "--shift", "noche", "--unit", "UTI", "--note",
            "primer turno", "--at", "2026-10-18T21:15",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 16,1"))
        .stdout(predicate::str::contains("Evaluation saved."));

    env.cmd()
        .args(["submit", "2", "--at", "2026-10-19 08:00"])
        .assert()
        .success();

    env.cmd()
        .arg("last")
        .assert()
        .success()
        .stdout(predicate::str::contains("2026-10-19 08:00"))
        .stdout(predicate::str::contains("Items: 2"));

    env.cmd()
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("2026-10-18 21:15"))
        .stdout(predicate::str::contains("primer turno"));

    env.cmd()
        .arg("export")
        .arg("--out")
        .arg(&env.out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 evaluations"));

    let files: Vec<_> = fs::read_dir(&env.out)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(files.len(), 1);
    let name = files[0].file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("nas_export_"));
    assert!(name.ends_with("_clinica-alemana.csv"));

    let csv = fs::read_to_string(&files[0]).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "created_at,identifier,shift,patient_status,unit,total_score,codes,note"
    );
    assert!(lines[1].starts_with("\"2026-10-19 08:00\""));
    assert_eq!(
        lines[2],
        "\"2026-10-18 21:15\",\"\",\"Noche\",\"N/A\",\"UTI\",16.1,\"1b 7a\",\"primer turno\""
    );
}

#[test]
fn submit_from_last_duplicates_previous_evaluation() {
    let env = TestEnv::new();
    env.login();

    env.cmd()
        .arg("submit")
        .arg("--from-last")
        .assert()
        .code(3);

    env.cmd()
        .args(["submit", "4a", "9", "--identifier", "RUT-1", "--shift", "noche"])
        .assert()
        .success();

    // Toggling 4c on top of the copy replaces 4a
    env.cmd()
        .args(["submit", "--from-last", "4c", "--at", "2026-10-19 10:00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Identifier: RUT-1"))
        .stdout(predicate::str::contains("Shift: Noche"))
        .stdout(predicate::str::contains("Items: 4c, 9"));
}

#[test]
fn logout_closes_session() {
    let env = TestEnv::new();
    env.login();
    env.cmd().arg("logout").assert().success();
    env.cmd().arg("history").assert().code(1);
    // Logging out twice is fine
    env.cmd().arg("logout").assert().success();
}

#[test]
fn invalid_config_reports_all_errors() {
    let env = TestEnv::new();
    let config = env.home.join("config.yaml");
    fs::write(
        &config,
        "facilities: []\ncatalog:\n  items:\n    - { code: \"a\", label: \"A\", weight: -1 }\n",
    )
    .unwrap();

    env.cmd()
        .arg("--config")
        .arg(&config)
        .arg("catalog")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("facilities: list must not be empty"))
        .stderr(predicate::str::contains("invalid weight"));
}

#[test]
fn custom_catalog_from_config() {
    let env = TestEnv::new();
    let config = env.home.join("config.yaml");
    fs::write(
        &config,
        r#"catalog:
  items:
    - { code: "x1", label: "Uno", weight: 1.5 }
    - { code: "x2", label: "Dos", weight: 2.0 }
  exclusion_groups:
    - ["x1", "x2"]
"#,
    )
    .unwrap();

    env.cmd()
        .arg("--config")
        .arg(&config)
        .arg("catalog")
        .assert()
        .success()
        .stdout(predicate::str::contains("x1  Uno (1,5)  Excluyente"));

    env.cmd()
        .arg("--config")
        .arg(&config)
        .args(["score", "x1", "x2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total score: 2,0"));
}
