use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use predicates::prelude::*;

fn cablecalc(store: &assert_fs::TempDir) -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo_bin_cmd!("cablecalc");
    cmd.arg("--store").arg(store.path());
    cmd
}

#[test]
fn test_cli_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = assert_cmd::cargo_bin_cmd!("cablecalc");
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
    Ok(())
}

#[test]
fn calculate_on_an_empty_store_reports_a_zero_cost_project() {
    let store = assert_fs::TempDir::new().unwrap();
    cablecalc(&store)
        .arg("calculate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Project: Unnamed Project"))
        .stdout(predicate::str::contains("Total Project Cost: $0"));
}

#[test]
fn edits_persist_between_invocations() {
    let store = assert_fs::TempDir::new().unwrap();
    for (field, value) in [
        ("num_technicians", "2"),
        ("hourlyRate", "25"),
        ("work_hours_per_day", "10"),
    ] {
        cablecalc(&store)
            .args(["set", field, value])
            .assert()
            .success();
    }
    cablecalc(&store)
        .arg("calculate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Labor Cost: $550"))
        .stdout(predicate::str::contains("2 techs × 10.0 hrs × $25/hr"));
    store
        .child("project_calculator.json")
        .assert(predicate::str::contains("\"work_hours_per_day\": 10"));
}

#[test]
fn unknown_input_fields_fail_with_a_message() {
    let store = assert_fs::TempDir::new().unwrap();
    cablecalc(&store)
        .args(["set", "colour", "red"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Failed to set input: unknown input field colour",
        ));
}

#[test]
fn itemized_cable_rows_drive_the_totals() {
    let store = assert_fs::TempDir::new().unwrap();
    cablecalc(&store)
        .args(["cable", "add", "-t", "1694", "-q", "6", "-l", "120"])
        .assert()
        .success();
    cablecalc(&store)
        .args(["mode", "--cable", "itemized"])
        .assert()
        .success();
    cablecalc(&store)
        .arg("calculate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Cables: 6"))
        .stdout(predicate::str::contains("Spools: 720ft needed + 7.5% waste"))
        .stdout(predicate::str::contains("Cables by type: 1694: 6"));
}

#[test]
fn config_file_overrides_the_factory_defaults() {
    let store = assert_fs::TempDir::new().unwrap();
    let config = assert_fs::NamedTempFile::new("cablecalc.yaml").unwrap();
    config.write_str("defaults:\n  waste_factor: 10\n").unwrap();
    cablecalc(&store)
        .arg("--config")
        .arg(config.path())
        .arg("calculate")
        .assert()
        .success()
        .stdout(predicate::str::contains("0ft needed + 10% waste"));
}

#[test]
fn a_broken_config_file_is_reported() {
    let store = assert_fs::TempDir::new().unwrap();
    let config = assert_fs::NamedTempFile::new("cablecalc.yaml").unwrap();
    config.write_str("defaults: [not, a, map]\n").unwrap();
    cablecalc(&store)
        .arg("--config")
        .arg(config.path())
        .arg("calculate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to calculate project"));
}
