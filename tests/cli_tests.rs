use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn billing_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("billing"))
}

/// Run `billing -C <config_path> <args...>`
fn run(config_path: &Path, args: &[&str]) -> assert_cmd::assert::Assert {
    billing_cmd()
        .arg("-C")
        .arg(config_path)
        .args(args)
        .assert()
}

fn init_config(temp_dir: &TempDir) -> PathBuf {
    let config_path = temp_dir.path().join("billing-config");
    run(&config_path, &["init"]).success();
    config_path
}

fn inventory(config_path: &Path) -> String {
    fs::read_to_string(config_path.join("inventory.toml")).unwrap()
}

#[test]
fn test_help() {
    billing_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Counter billing"));
}

#[test]
fn test_version() {
    billing_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("billing"));
}

#[test]
fn test_init_creates_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("billing-config");

    run(&config_path, &["init"])
        .success()
        .stdout(predicate::str::contains("Initialized billing config"));

    assert!(config_path.join("config.toml").exists());
    assert!(config_path.join("inventory.toml").exists());
    assert!(config_path.join("output").is_dir());
}

#[test]
fn test_init_fails_if_exists() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir);

    run(&config_path, &["init"])
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_status_without_init() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("nonexistent");

    run(&config_path, &["status"])
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_products_list() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir);

    run(&config_path, &["products"])
        .success()
        .stdout(predicate::str::contains("Rice"))
        .stdout(predicate::str::contains("Rs.40.00"))
        .stdout(predicate::str::contains("GODOWN"));
}

#[test]
fn test_status() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir);

    run(&config_path, &["status"])
        .success()
        .stdout(predicate::str::contains("Billing Status"))
        .stdout(predicate::str::contains("Products:         3"))
        .stdout(predicate::str::contains("Current bill:     INV/"));
}

#[test]
fn test_add_fills_price_from_inventory() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir);

    run(&config_path, &["add", "--product", "Rice", "--qty", "5"])
        .success()
        .stdout(predicate::str::contains("Line 1: Rice x 5 @ Rs.40.00 = Rs.200.00"))
        .stdout(predicate::str::contains("Total: Rs.200.00"));

    run(&config_path, &["add", "--product", "Oil", "--qty", "2"])
        .success()
        .stdout(predicate::str::contains("Total: Rs.500.00"));

    run(&config_path, &["remove", "1"])
        .success()
        .stdout(predicate::str::contains("Removed line 1 (Rice)"))
        .stdout(predicate::str::contains("Total: Rs.300.00"));

    run(&config_path, &["show"])
        .success()
        .stdout(predicate::str::contains("Oil"))
        .stdout(predicate::str::contains("ALL TOTAL: Rs.300.00"))
        .stdout(predicate::str::contains("Three Hundred Rupees only."));
}

#[test]
fn test_set_updates_line() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir);

    run(&config_path, &["add"])
        .success()
        .stdout(predicate::str::contains("Line 1: (no product)"));

    run(&config_path, &["set", "1", "--product", "Sugar", "--qty", "2"])
        .success()
        .stdout(predicate::str::contains("Total: Rs.90.00"));

    run(&config_path, &["set", "1", "--price", "50"])
        .success()
        .stdout(predicate::str::contains("Total: Rs.100.00"));

    run(&config_path, &["set", "1", "--qty", "lots"])
        .success()
        .stdout(predicate::str::contains("Total: Rs.0.00"));
}

#[test]
fn test_line_out_of_range() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir);

    run(&config_path, &["add", "--product", "Rice", "--qty", "1"]).success();

    run(&config_path, &["remove", "2"])
        .failure()
        .stderr(predicate::str::contains("Line 2 is out of range"));

    run(&config_path, &["set", "0", "--qty", "1"])
        .failure()
        .stderr(predicate::str::contains("out of range"));

    run(&config_path, &["show"])
        .success()
        .stdout(predicate::str::contains("ALL TOTAL: Rs.40.00"));
}

#[test]
fn test_unknown_product_warns() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir);

    run(&config_path, &["add", "--product", "Salt", "--qty", "1"])
        .success()
        .stderr(predicate::str::contains("'Salt' is not in inventory"))
        .stdout(predicate::str::contains("Total: Rs.0.00"));
}

#[test]
fn test_deduct_on_hand_and_godown() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir);

    run(&config_path, &["add", "--product", "Rice", "--qty", "5"]).success();

    run(&config_path, &["deduct", "1"])
        .success()
        .stdout(predicate::str::contains(
            "Deducted 5 Rice from on-hand stock (95 left)",
        ));

    run(&config_path, &["deduct", "1", "--godown"])
        .success()
        .stdout(predicate::str::contains(
            "Deducted 5 Rice from godown stock (495 left)",
        ));

    let inventory = inventory(&config_path);
    assert!(inventory.contains("quantity = 95.0"), "{inventory}");
    assert!(inventory.contains("godown_quantity = 495.0"), "{inventory}");
}

#[test]
fn test_deduct_insufficient_stock() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir);

    run(&config_path, &["add", "--product", "Sugar", "--qty", "1"]).success();

    run(&config_path, &["deduct", "1", "--godown"])
        .failure()
        .stderr(predicate::str::contains(
            "Insufficient godown quantity for 'Sugar'",
        ));

    run(&config_path, &["products"])
        .success()
        .stdout(predicate::str::contains("Sugar"));
}

#[test]
fn test_deduct_unknown_product() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir);

    run(&config_path, &["add", "--product", "Salt", "--qty", "1"]).success();

    run(&config_path, &["deduct", "1"])
        .failure()
        .stderr(predicate::str::contains("Product 'Salt' not found"));
}

#[test]
fn test_log_output_is_plain_when_piped() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir);

    run(&config_path, &["add", "--product", "Salt", "--qty", "1"]).success();

    billing_cmd()
        .env("RUST_LOG", "warn")
        .arg("-C")
        .arg(&config_path)
        .args(["deduct", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("product not found in inventory"))
        .stderr(predicate::str::contains("\u{1b}[").not());
}

#[test]
fn test_save_requires_customer_name() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir);

    run(&config_path, &["add", "--product", "Rice", "--qty", "1"]).success();

    run(&config_path, &["save"])
        .failure()
        .stderr(predicate::str::contains("Customer name is required"));

    run(&config_path, &["pdf"])
        .failure()
        .stderr(predicate::str::contains("Customer name is required"));

    run(&config_path, &["list"])
        .success()
        .stdout(predicate::str::contains("No invoices saved yet."));
}

#[test]
fn test_save_requires_lines() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir);

    run(&config_path, &["customer", "--name", "Asha"]).success();

    run(&config_path, &["save"])
        .failure()
        .stderr(predicate::str::contains("no line items"));
}

#[test]
fn test_save_and_list() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir);

    run(
        &config_path,
        &[
            "customer",
            "--name",
            "Asha Devi",
            "--phone",
            "9000000000",
            "--address",
            "Station Road",
        ],
    )
    .success()
    .stdout(predicate::str::contains("Name:    Asha Devi"));

    run(&config_path, &["add", "--product", "Rice", "--qty", "5"]).success();
    run(&config_path, &["add", "--product", "Oil", "--qty", "2"]).success();

    run(&config_path, &["save"])
        .success()
        .stdout(predicate::str::contains("Saved INV/"))
        .stdout(predicate::str::contains("Total:    Rs.500.00"))
        .stdout(predicate::str::contains("Started bill INV/"));

    // Stock untouched without --deduct
    assert!(inventory(&config_path).contains("quantity = 100.0"));

    run(&config_path, &["show"])
        .success()
        .stdout(predicate::str::contains("No lines yet."));

    let invoices = fs::read_to_string(config_path.join("invoices.toml")).unwrap();
    assert!(invoices.contains("Asha Devi"));
    assert!(invoices.contains("total_amount = 500.0"));

    run(&config_path, &["list"])
        .success()
        .stdout(predicate::str::contains("Asha Devi"))
        .stdout(predicate::str::contains("Rs.500.00"))
        .stdout(predicate::str::contains("Total: 1 invoices"));
}

#[test]
fn test_save_with_deduct_and_keep() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir);

    run(&config_path, &["customer", "--name", "Asha"]).success();
    run(&config_path, &["add", "--product", "Oil", "--qty", "4"]).success();

    run(&config_path, &["save", "--deduct", "--keep"])
        .success()
        .stdout(predicate::str::contains("Deducted Oil (16 left in on-hand stock)"))
        .stdout(predicate::str::contains("Saved INV/"))
        .stdout(predicate::str::contains("Started bill").not());

    run(&config_path, &["show"])
        .success()
        .stdout(predicate::str::contains("ALL TOTAL: Rs.600.00"));
}

#[test]
fn test_kept_bill_is_not_deducted_twice() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir);

    run(&config_path, &["customer", "--name", "Asha"]).success();
    run(&config_path, &["add", "--product", "Oil", "--qty", "4"]).success();

    run(&config_path, &["save", "--deduct", "--keep"]).success();

    run(&config_path, &["save", "--deduct"])
        .failure()
        .stdout(predicate::str::contains("Deducted").not())
        .stderr(predicate::str::contains("already recorded"));

    let inventory = inventory(&config_path);
    assert!(inventory.contains("quantity = 16.0"), "{inventory}");
    assert!(!inventory.contains("quantity = 12.0"), "{inventory}");

    run(&config_path, &["list"])
        .success()
        .stdout(predicate::str::contains("Total: 1 invoices"));
}

#[test]
fn test_save_with_insufficient_stock_keeps_bill() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir);

    run(&config_path, &["customer", "--name", "Asha"]).success();
    run(&config_path, &["add", "--product", "Oil", "--qty", "25"]).success();

    run(&config_path, &["save", "--deduct"])
        .failure()
        .stderr(predicate::str::contains("Insufficient on-hand quantity"));

    assert!(!config_path.join("invoices.toml").exists());

    run(&config_path, &["show"])
        .success()
        .stdout(predicate::str::contains("Oil"));
}

#[test]
fn test_new_discards_bill() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = init_config(&temp_dir);

    run(&config_path, &["customer", "--name", "Asha"]).success();
    run(&config_path, &["add", "--product", "Rice", "--qty", "1"]).success();

    run(&config_path, &["new"])
        .success()
        .stdout(predicate::str::contains("Started bill INV/"));

    run(&config_path, &["show"])
        .success()
        .stdout(predicate::str::contains("No lines yet."))
        .stdout(predicate::str::contains("Asha").not());
}

#[test]
fn test_words() {
    billing_cmd()
        .args(["words", "105"])
        .assert()
        .success()
        .stdout(predicate::str::diff("One Hundred and Five\n"));

    billing_cmd()
        .args(["words", "0"])
        .assert()
        .success()
        .stdout(predicate::str::diff("Zero\n"));

    billing_cmd()
        .args(["words", "2500.75"])
        .assert()
        .success()
        .stdout(predicate::str::diff("Two Thousand Five Hundred\n"));
}
