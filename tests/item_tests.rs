use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{init_db, init_db_with_items, setup_test_db, spos, stock_of};

#[test]
fn add_and_list_items() {
    let db_path = setup_test_db("item_add_list");
    init_db_with_items(&db_path);

    spos()
        .args(["--db", &db_path, "item", "list"])
        .assert()
        .success()
        .stdout(contains("Coffee 250g"))
        .stdout(contains("Green Tea"))
        .stdout(contains("7501"));
}

#[test]
fn add_rejects_name_over_limit() {
    let db_path = setup_test_db("item_long_name");
    init_db(&db_path);

    spos()
        .args([
            "--db",
            &db_path,
            "item",
            "add",
            "This product name is far too long for the catalog",
        ])
        .assert()
        .failure()
        .stderr(contains("Maximum 25 characters"));
}

#[test]
fn add_rejects_duplicate_barcode() {
    let db_path = setup_test_db("item_dup_barcode");
    init_db_with_items(&db_path);

    spos()
        .args([
            "--db", &db_path, "item", "add", "Another", "--barcode", "7501",
        ])
        .assert()
        .failure()
        .stderr(contains("already exists"));
}

#[test]
fn add_rejects_negative_price() {
    let db_path = setup_test_db("item_neg_price");
    init_db(&db_path);

    spos()
        .args(["--db", &db_path, "item", "add", "Broken", "--price=-2.0"])
        .assert()
        .failure()
        .stderr(contains("non-negative"));
}

#[test]
fn edit_changes_only_named_fields() {
    let db_path = setup_test_db("item_edit_patch");
    init_db_with_items(&db_path);

    spos()
        .args(["--db", &db_path, "item", "edit", "7501", "--stock", "42"])
        .assert()
        .success();

    assert_eq!(stock_of(&db_path, 1), 42);

    // everything else untouched
    let conn = rusqlite::Connection::open(&db_path).unwrap();
    let (name, price): (String, f64) = conn
        .query_row("SELECT name, price FROM items WHERE id = 1", [], |r| {
            Ok((r.get(0)?, r.get(1)?))
        })
        .unwrap();
    assert_eq!(name, "Coffee 250g");
    assert_eq!(price, 2.00);
}

#[test]
fn edit_with_no_fields_is_an_error() {
    let db_path = setup_test_db("item_edit_empty");
    init_db_with_items(&db_path);

    spos()
        .args(["--db", &db_path, "item", "edit", "7501"])
        .assert()
        .failure()
        .stderr(contains("Nothing to do"));
}

#[test]
fn edit_validates_merged_row() {
    let db_path = setup_test_db("item_edit_invalid");
    init_db_with_items(&db_path);

    spos()
        .args(["--db", &db_path, "item", "edit", "7501", "--stock=-3"])
        .assert()
        .failure()
        .stderr(contains("Minimum value is 0"));

    assert_eq!(stock_of(&db_path, 1), 10);
}

#[test]
fn disable_is_soft_and_reversible() {
    let db_path = setup_test_db("item_disable");
    init_db_with_items(&db_path);

    spos()
        .args(["--db", &db_path, "item", "disable", "7501"])
        .assert()
        .success()
        .stdout(contains("disabled"));

    // disabled items disappear from the default listing...
    spos()
        .args(["--db", &db_path, "item", "list"])
        .assert()
        .success()
        .stdout(contains("Coffee 250g").not());

    // ...but stay visible with --all, and the row is still there
    spos()
        .args(["--db", &db_path, "item", "list", "--all"])
        .assert()
        .success()
        .stdout(contains("Coffee 250g"));

    spos()
        .args(["--db", &db_path, "item", "enable", "7501"])
        .assert()
        .success()
        .stdout(contains("active"));
}

#[test]
fn low_stock_listing_filters_by_threshold() {
    let db_path = setup_test_db("item_low_list");
    init_db_with_items(&db_path);

    // bring Coffee down to its threshold
    spos()
        .args(["--db", &db_path, "item", "edit", "7501", "--stock", "2"])
        .assert()
        .success();

    spos()
        .args(["--db", &db_path, "item", "list", "--low"])
        .assert()
        .success()
        .stdout(contains("Coffee 250g"))
        .stdout(contains("Green Tea").not());
}
