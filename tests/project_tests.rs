use assert_fs::prelude::*;
use predicates::prelude::*;

fn cablecalc(store: &assert_fs::TempDir) -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo_bin_cmd!("cablecalc");
    cmd.arg("--store").arg(store.path());
    cmd
}

#[test]
fn legacy_stores_drop_placeholder_cable_rows() {
    let store = assert_fs::TempDir::new().unwrap();
    store
        .child("project_calculator.json")
        .write_str(
            r#"{ "numCables": "4", "avgCableLength": "25", "state": { "cableLengthMode": "calculated" } }"#,
        )
        .unwrap();
    store
        .child("cable_line_items.json")
        .write_str(
            r#"[ { "cableType": "1855", "qty": "75", "length": "10" }, { "cableType": "1694", "qty": "2", "length": "100" } ]"#,
        )
        .unwrap();

    cablecalc(&store)
        .arg("calculate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cable lengths: itemized"))
        .stdout(predicate::str::contains("Total Cables: 2"))
        .stdout(predicate::str::contains("1 entry recovered:"))
        .stderr(predicate::str::contains("placeholder"));
}

#[test]
fn a_corrupt_store_falls_back_to_defaults() {
    let store = assert_fs::TempDir::new().unwrap();
    store
        .child("project_calculator.json")
        .write_str("{ not json")
        .unwrap();
    cablecalc(&store)
        .arg("calculate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Cables: 0"));
}

#[test]
fn projects_move_between_stores_as_json_files() {
    let first = assert_fs::TempDir::new().unwrap();
    let second = assert_fs::TempDir::new().unwrap();
    let file = assert_fs::NamedTempFile::new("project.json").unwrap();
    cablecalc(&first)
        .args(["header", "--name", "Riverside", "--customer", "Riverside Studios"])
        .assert()
        .success();
    cablecalc(&first)
        .args(["set", "num_cables", "12"])
        .assert()
        .success();
    cablecalc(&first)
        .args(["project", "write", "-o"])
        .arg(file.path())
        .assert()
        .success();
    file.assert(predicate::str::contains("\"version\": 2"));

    cablecalc(&second)
        .args(["project", "load", "-i"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Project data loaded from"));
    cablecalc(&second)
        .arg("calculate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Customer: Riverside Studios"))
        .stdout(predicate::str::contains("Total Cables: 12"));
}

#[test]
fn named_projects_can_be_saved_and_reopened() {
    let store = assert_fs::TempDir::new().unwrap();
    cablecalc(&store)
        .args(["set", "num_cables", "8"])
        .assert()
        .success();
    cablecalc(&store)
        .args(["project", "save", "Studio B"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Project saved as Studio_B"));
    cablecalc(&store).arg("reset").assert().success();
    cablecalc(&store)
        .args(["project", "open", "Studio_B"])
        .assert()
        .success();
    cablecalc(&store)
        .arg("calculate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Cables: 8"));
    cablecalc(&store)
        .args(["project", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("* Studio_B"));
    cablecalc(&store)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("| open | Opened project Studio_B"));
}

#[test]
fn opening_an_unknown_project_fails() {
    let store = assert_fs::TempDir::new().unwrap();
    cablecalc(&store)
        .args(["project", "open", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Failed to manage projects: no saved project named missing",
        ));
}
