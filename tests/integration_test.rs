use std::io::Write;

use assert_cmd::Command;
use mockito::Server;
use predicates::prelude::{predicate, PredicateBooleanExt};
use tempfile::NamedTempFile;

fn write_config(host: &str, user_id: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    write!(
        file,
        r#"{{"host":"{host}","userId":"{user_id}","verifyHost":false,"apiVersion":"RestV1"}}"#
    )
    .expect("Failed to write config");

    file
}

fn cargo_bin() -> Command {
    Command::cargo_bin("carlot-cli").expect("Failed to build binary")
}

#[test]
fn run_help() {
    let assert = cargo_bin().args(["--help"]).assert();

    assert.success().code(0);
}

#[test]
fn run_help_without_arguments() {
    let assert = cargo_bin().assert();

    assert.failure().code(2);
}

#[test]
fn run_completions() {
    let assert = cargo_bin().args(["--completions", "bash"]).assert();

    assert.success().code(0);
}

#[test]
fn run_list_with_results() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/cars")
        .with_status(200)
        .with_body_from_file("tests/responses/cars_list.json")
        .create();
    let config = write_config(&server.url(), "user-1");

    let assert = cargo_bin()
        .args(["-c", config.path().to_str().expect("Path"), "list"])
        .assert();

    assert
        .stdout(predicate::str::contains("Toyota"))
        .stdout(predicate::str::contains("Corolla"))
        .success()
        .code(0);

    mock.assert();
}

#[test]
fn run_list_with_no_results() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/cars")
        .with_status(200)
        .with_body_from_file("tests/responses/cars_list_empty.json")
        .create();
    let config = write_config(&server.url(), "user-1");

    let assert = cargo_bin()
        .args(["-q", "-c", config.path().to_str().expect("Path"), "list"])
        .assert();

    assert.failure().code(1);

    mock.assert();
}

#[test]
fn run_list_filters_before_rendering() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/cars")
        .with_status(200)
        .with_body_from_file("tests/responses/cars_list.json")
        .create();
    let config = write_config(&server.url(), "user-1");

    let assert = cargo_bin()
        .args([
            "-c",
            config.path().to_str().expect("Path"),
            "list",
            "--brand",
            "Honda",
        ])
        .assert();

    assert
        .stdout(predicate::str::contains("Civic"))
        .stdout(predicate::str::contains("Jazz"))
        .stdout(predicate::str::contains("Corolla").not())
        .success()
        .code(0);

    mock.assert();
}

#[test]
fn run_list_with_unknown_gearbox() {
    let config = write_config("http://localhost:1", "user-1");

    let assert = cargo_bin()
        .args([
            "-c",
            config.path().to_str().expect("Path"),
            "list",
            "--gearbox",
            "tiptronic",
        ])
        .assert();

    assert
        .stderr(predicate::str::contains("Unknown gearbox type"))
        .failure()
        .code(1);
}

#[test]
fn run_list_by_id() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/cars/abc123")
        .with_status(200)
        .with_body_from_file("tests/responses/car_view.json")
        .create();
    let config = write_config(&server.url(), "user-2");

    let assert = cargo_bin()
        .args(["-c", config.path().to_str().expect("Path"), "list", "-i", "abc123"])
        .assert();

    assert
        .stdout(predicate::str::contains("abc123"))
        .stdout(predicate::str::contains("2020 Toyota Corolla"))
        .success()
        .code(0);

    mock.assert();
}

#[test]
fn run_new_quiet_with_missing_fields() {
    let config = write_config("http://localhost:1", "user-1");

    let assert = cargo_bin()
        .args([
            "-q",
            "-c",
            config.path().to_str().expect("Path"),
            "new",
            "--brand",
            "Toyota",
        ])
        .assert();

    assert.failure().code(1);
}

#[test]
fn run_new_quiet_complete() {
    let mut server = Server::new();
    let supported = server
        .mock("GET", "/supportedCarBrandsAndModels")
        .with_status(200)
        .with_body_from_file("tests/responses/supported_cars.json")
        .create();
    let created = server
        .mock("POST", "/cars")
        .with_status(201)
        .with_body_from_file("tests/responses/car_created.json")
        .create();
    let config = write_config(&server.url(), "user-1");

    let assert = cargo_bin()
        .args([
            "-q",
            "-c",
            config.path().to_str().expect("Path"),
            "new",
            "--brand",
            "Honda",
            "--model",
            "Civic",
            "--year",
            "2021",
            "--gearbox",
            "manual",
            "--color",
            "Black",
        ])
        .assert();

    assert.success().code(0);

    supported.assert();
    created.assert();
}

#[test]
fn run_new_without_user_id() {
    let config = write_config("http://localhost:1", "");

    let assert = cargo_bin()
        .args(["-c", config.path().to_str().expect("Path"), "new", "--brand", "Toyota"])
        .assert();

    assert
        .stderr(predicate::str::contains("No userId configured"))
        .failure()
        .code(1);
}

#[test]
fn run_remove_rejects_other_users_posts() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/cars/abc123")
        .with_status(200)
        .with_body_from_file("tests/responses/car_view.json")
        .create();
    let config = write_config(&server.url(), "user-2");

    let assert = cargo_bin()
        .args(["-c", config.path().to_str().expect("Path"), "remove", "-i", "abc123"])
        .assert();

    assert
        .stderr(predicate::str::contains("Only the owner can remove a car post"))
        .failure()
        .code(1);

    mock.assert();
}

#[test]
fn run_remove_own_post() {
    let mut server = Server::new();
    let view = server
        .mock("GET", "/cars/abc123")
        .with_status(200)
        .with_body_from_file("tests/responses/car_view.json")
        .create();
    let delete = server.mock("DELETE", "/cars/abc123").with_status(200).create();
    let config = write_config(&server.url(), "user-1");

    let assert = cargo_bin()
        .args(["-q", "-c", config.path().to_str().expect("Path"), "remove", "-i", "abc123"])
        .assert();

    assert.success().code(0);

    view.assert();
    delete.assert();
}

#[test]
fn run_brands() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/supportedCarBrandsAndModels")
        .with_status(200)
        .with_body_from_file("tests/responses/supported_cars.json")
        .create();
    let config = write_config(&server.url(), "user-1");

    let assert = cargo_bin()
        .args(["-c", config.path().to_str().expect("Path"), "brands"])
        .assert();

    assert
        .stdout(predicate::str::contains("Toyota"))
        .stdout(predicate::str::contains("Corolla, Camry"))
        .success()
        .code(0);

    mock.assert();
}
