#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn spos() -> Command {
    cargo_bin_cmd!("stockpos")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_stockpos.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize DB (creates schema) via the CLI.
pub fn init_db(db_path: &str) {
    spos()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Initialize DB and add a small catalog useful for many tests.
/// Items: #1 "Coffee 250g" barcode 7501, stock 10, price 2.00
///        #2 "Green Tea"   barcode 7502, stock 5,  price 3.50
pub fn init_db_with_items(db_path: &str) {
    init_db(db_path);

    spos()
        .args([
            "--db",
            db_path,
            "item",
            "add",
            "Coffee 250g",
            "--barcode",
            "7501",
            "--stock",
            "10",
            "--min-stock",
            "2",
            "--price",
            "2.00",
        ])
        .assert()
        .success();

    spos()
        .args([
            "--db",
            db_path,
            "item",
            "add",
            "Green Tea",
            "--barcode",
            "7502",
            "--stock",
            "5",
            "--min-stock",
            "1",
            "--price",
            "3.50",
        ])
        .assert()
        .success();
}

/// Record a sale at a fixed timestamp through the library DB API.
/// The CLI always sells "now", which is useless for date-dependent tests.
pub fn seed_sale(db_path: &str, ident: &str, quantity: i64, at: &str) {
    let mut conn = rusqlite::Connection::open(db_path).expect("open db");
    let at = chrono::NaiveDateTime::parse_from_str(at, "%Y-%m-%d %H:%M:%S").expect("parse ts");
    stockpos::db::ledger::record_sale(&mut conn, ident, quantity, at).expect("record sale");
}

/// Current stock of an item, read straight from the DB.
pub fn stock_of(db_path: &str, item_id: i64) -> i64 {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    conn.query_row(
        "SELECT stock FROM items WHERE id = ?1",
        [item_id],
        |row| row.get(0),
    )
    .expect("query stock")
}

/// Number of sale headers in the ledger.
pub fn sale_count(db_path: &str) -> i64 {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    conn.query_row("SELECT COUNT(*) FROM sales", [], |row| row.get(0))
        .expect("count sales")
}

/// Number of sale lines in the ledger.
pub fn line_count(db_path: &str) -> i64 {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    conn.query_row("SELECT COUNT(*) FROM sale_lines", [], |row| row.get(0))
        .expect("count lines")
}
