use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Command pointed at a database inside `dir`. Every run seeds the sample
/// rows into empty tables first.
fn travel_desk_cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("travel-desk").expect("Failed to find travel-desk binary");
    cmd.arg("--database-file")
        .arg(dir.join("cli_test.sqlite"))
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_cli_active_only_hides_inactive_tours() {
    let temp_dir = TempDir::new().unwrap();

    travel_desk_cmd(temp_dir.path())
        .args(["tours", "--active-only"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Golden Ring of Russia"))
        .stdout(predicate::str::contains("French Riviera"))
        .stdout(predicate::str::contains("Alps and Cote d'Azur").not());
}

#[test]
fn test_cli_tours_sorted_by_price_descending() {
    let temp_dir = TempDir::new().unwrap();

    let output = travel_desk_cmd(temp_dir.path())
        .args(["tours", "--sort", "desc"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let names: Vec<&str> = stdout
        .lines()
        .filter_map(|line| line.split(" | ").next())
        .collect();
    assert_eq!(
        names,
        vec!["Alps and Cote d'Azur", "French Riviera", "Golden Ring of Russia"]
    );
}

#[test]
fn test_cli_tours_filter_by_type_and_search() {
    let temp_dir = TempDir::new().unwrap();

    travel_desk_cmd(temp_dir.path())
        .args(["tours", "--type", "Beach"])
        .assert()
        .success()
        .stdout(predicate::str::contains("French Riviera | 85000.00 RUB | 5 tickets | active"))
        .stdout(predicate::str::contains("Golden Ring").not());

    travel_desk_cmd(temp_dir.path())
        .args(["tours", "--search", "golden"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tours found."));

    travel_desk_cmd(temp_dir.path())
        .args(["--case-insensitive", "tours", "--search", "golden"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Golden Ring of Russia"));
}

#[test]
fn test_cli_types_start_with_all() {
    let temp_dir = TempDir::new().unwrap();

    travel_desk_cmd(temp_dir.path())
        .arg("types")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("All types\nBeach\nHistorical\nSki\n"));
}

#[test]
fn test_cli_hotels_first_page() {
    let temp_dir = TempDir::new().unwrap();

    travel_desk_cmd(temp_dir.path())
        .arg("hotels")
        .assert()
        .success()
        .stdout(predicate::str::contains("Hotel Moscow"))
        .stdout(predicate::str::contains("Page 1 of 1"));
}

#[test]
fn test_cli_hotels_page_out_of_range() {
    let temp_dir = TempDir::new().unwrap();

    travel_desk_cmd(temp_dir.path())
        .args(["hotels", "--page", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn test_cli_small_page_size_splits_hotels() {
    let temp_dir = TempDir::new().unwrap();

    travel_desk_cmd(temp_dir.path())
        .args(["--page-size", "2", "hotels", "--page", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mountain Resort"))
        .stdout(predicate::str::contains("Hotel Moscow").not())
        .stdout(predicate::str::contains("Page 2 of 2"));
}

#[test]
fn test_cli_add_hotel_rejects_bad_stars() {
    let temp_dir = TempDir::new().unwrap();

    travel_desk_cmd(temp_dir.path())
        .args(["hotel", "add", "Lakeside", "7", "Italy", "Quiet rooms"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 0 and 5"));

    travel_desk_cmd(temp_dir.path())
        .arg("hotels")
        .assert()
        .success()
        .stdout(predicate::str::contains("Lakeside").not());
}

#[test]
fn test_cli_delete_referenced_hotel_fails() {
    let temp_dir = TempDir::new().unwrap();

    travel_desk_cmd(temp_dir.path())
        .args(["hotel", "delete", "1", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be deleted"));
}

#[test]
fn test_cli_delete_requires_confirmation() {
    let temp_dir = TempDir::new().unwrap();

    travel_desk_cmd(temp_dir.path())
        .args(["hotel", "add", "Lakeside", "4", "Italy", "Quiet rooms"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added hotel \"Lakeside\"."));

    travel_desk_cmd(temp_dir.path())
        .args(["hotel", "delete", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing deleted"));

    travel_desk_cmd(temp_dir.path())
        .args(["hotel", "delete", "4", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted hotel 4."));

    travel_desk_cmd(temp_dir.path())
        .arg("hotels")
        .assert()
        .success()
        .stdout(predicate::str::contains("Lakeside").not());
}

#[test]
fn test_cli_edit_hotel() {
    let temp_dir = TempDir::new().unwrap();

    travel_desk_cmd(temp_dir.path())
        .args(["hotel", "edit", "2", "Azure Bay", "5", "France", "Renovated"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated hotel 2."));

    travel_desk_cmd(temp_dir.path())
        .arg("hotels")
        .assert()
        .success()
        .stdout(predicate::str::contains("Azure Bay  5*  France  tours: 2"));

    travel_desk_cmd(temp_dir.path())
        .args(["hotel", "edit", "99", "Nowhere", "1", "France", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Hotel 99 not found."));
}

#[test]
fn test_cli_huge_page_size_shows_one_page() {
    let temp_dir = TempDir::new().unwrap();

    travel_desk_cmd(temp_dir.path())
        .args(["--page-size", "9223372036854775807", "hotels"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mountain Resort"))
        .stdout(predicate::str::contains("Page 1 of 1"));
}
