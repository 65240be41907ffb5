use predicates::str::contains;

mod common;
use common::{init_db_with_items, seed_sale, setup_test_db, spos};

fn metrics_json(db_path: &str, from: &str, to: &str) -> serde_json::Value {
    let output = spos()
        .args([
            "--db", db_path, "metrics", "--from", from, "--to", to, "--json",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let text = String::from_utf8(output).expect("utf8 stdout");
    serde_json::from_str(text.trim()).expect("parse report json")
}

#[test]
fn same_day_sales_roll_up_into_kpis() {
    let db_path = setup_test_db("metrics_same_day");
    init_db_with_items(&db_path);

    spos()
        .args([
            "--db", &db_path, "item", "add", "Mug", "--stock", "10", "--price", "5.00",
        ])
        .assert()
        .success();

    // two sales, revenue 10.00 and 15.00
    seed_sale(&db_path, "7501", 5, "2025-06-04 10:15:00"); // 5 x 2.00
    seed_sale(&db_path, "3", 3, "2025-06-04 17:40:00"); // 3 x 5.00

    let report = metrics_json(&db_path, "2025-06-04", "2025-06-04");

    assert_eq!(report["kpis"]["revenue"], 25.0);
    assert_eq!(report["kpis"]["total_sales"], 2);
    assert_eq!(report["kpis"]["avg_ticket"], 12.5);
    assert_eq!(report["period"]["days"], 1);
}

#[test]
fn histograms_and_series_are_consistent() {
    let db_path = setup_test_db("metrics_consistency");
    init_db_with_items(&db_path);

    seed_sale(&db_path, "7501", 1, "2025-06-02 09:00:00"); // Monday
    seed_sale(&db_path, "7501", 2, "2025-06-04 14:00:00"); // Wednesday
    seed_sale(&db_path, "7502", 1, "2025-06-07 14:00:00"); // Saturday

    let report = metrics_json(&db_path, "2025-06-02", "2025-06-08");

    let total_sales = report["kpis"]["total_sales"].as_i64().unwrap();
    let weekday_sum: i64 = report["weekday_histogram"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_i64().unwrap())
        .sum();
    let hour_sum: i64 = report["hour_histogram"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_i64().unwrap())
        .sum();

    assert_eq!(total_sales, 3);
    assert_eq!(weekday_sum, total_sales);
    assert_eq!(hour_sum, total_sales);

    // Monday-first buckets: Monday sale in [0], Wednesday in [2], Saturday in [5]
    assert_eq!(report["weekday_histogram"][0], 1);
    assert_eq!(report["weekday_histogram"][2], 1);
    assert_eq!(report["weekday_histogram"][5], 1);
    assert_eq!(report["hour_histogram"][14], 2);

    // dense series: 7 labels, weekday style for a 7-day window
    let labels = report["time_series"]["labels"].as_array().unwrap();
    assert_eq!(labels.len(), 7);
    assert_eq!(labels[0], "Mon");
    assert_eq!(report["time_series"]["revenue"][1], 0.0);
}

#[test]
fn metrics_is_idempotent_without_new_sales() {
    let db_path = setup_test_db("metrics_idempotent");
    init_db_with_items(&db_path);

    seed_sale(&db_path, "7501", 4, "2025-06-03 11:00:00");

    let one = metrics_json(&db_path, "2025-06-01", "2025-06-07");
    let two = metrics_json(&db_path, "2025-06-01", "2025-06-07");
    assert_eq!(one, two);
}

#[test]
fn comparison_against_previous_window() {
    let db_path = setup_test_db("metrics_comparison");
    init_db_with_items(&db_path);

    seed_sale(&db_path, "7501", 1, "2025-05-28 10:00:00"); // previous window: 2.00
    seed_sale(&db_path, "7501", 2, "2025-06-04 10:00:00"); // current window: 4.00

    let report = metrics_json(&db_path, "2025-06-01", "2025-06-07");

    assert_eq!(report["kpis"]["revenue"], 4.0);
    assert_eq!(report["kpis"]["revenue_change"], 100.0);
    assert_eq!(report["kpis"]["sales_change"], 0.0);
}

#[test]
fn top_products_ranked_by_units() {
    let db_path = setup_test_db("metrics_top");
    init_db_with_items(&db_path);

    seed_sale(&db_path, "7502", 4, "2025-06-03 10:00:00");
    seed_sale(&db_path, "7501", 2, "2025-06-03 11:00:00");

    let report = metrics_json(&db_path, "2025-06-01", "2025-06-07");
    let top = report["top_products"].as_array().unwrap();

    assert_eq!(top.len(), 2);
    assert_eq!(top[0]["name"], "Green Tea");
    assert_eq!(top[0]["units"], 4);
    assert_eq!(top[0]["sku"], "7502");
    assert_eq!(report["insights"]["top_product"], "Green Tea");
}

#[test]
fn insights_handle_empty_windows() {
    let db_path = setup_test_db("metrics_empty");
    init_db_with_items(&db_path);

    let report = metrics_json(&db_path, "2025-06-01", "2025-06-07");

    assert_eq!(report["kpis"]["revenue"], 0.0);
    assert_eq!(report["kpis"]["avg_ticket"], 0.0);
    assert!(report["insights"]["peak_hour"].is_null());
    assert!(report["insights"]["best_day"].is_null());
    assert!(
        report["insights"]["trend"]
            .as_str()
            .unwrap()
            .contains("No previous-period data")
    );
}

#[test]
fn alerts_count_current_catalog_state() {
    let db_path = setup_test_db("metrics_alerts");
    init_db_with_items(&db_path);

    // Green Tea: stock 5 → sell all 5 → out of stock
    seed_sale(&db_path, "7502", 5, "2025-06-03 10:00:00");
    // Coffee: stock 10, min 2 → sell 8 → stock 2 → low stock
    seed_sale(&db_path, "7501", 8, "2025-06-03 11:00:00");

    let report = metrics_json(&db_path, "2025-06-01", "2025-06-07");

    assert_eq!(report["alerts"]["out_of_stock"], 1);
    assert_eq!(report["alerts"]["low_stock"], 1);
}

#[test]
fn inverted_range_is_rejected() {
    let db_path = setup_test_db("metrics_inverted");
    init_db_with_items(&db_path);

    spos()
        .args([
            "--db",
            &db_path,
            "metrics",
            "--from",
            "2025-06-07",
            "--to",
            "2025-06-01",
            "--json",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid date range"));
}

#[test]
fn unparsable_date_is_rejected() {
    let db_path = setup_test_db("metrics_bad_date");
    init_db_with_items(&db_path);

    spos()
        .args([
            "--db", &db_path, "metrics", "--from", "junk", "--to", "2025-06-01",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));
}

#[test]
fn human_readable_report_renders() {
    let db_path = setup_test_db("metrics_render");
    init_db_with_items(&db_path);

    seed_sale(&db_path, "7501", 2, "2025-06-04 10:00:00");

    spos()
        .args([
            "--db",
            &db_path,
            "metrics",
            "--from",
            "2025-06-02",
            "--to",
            "2025-06-08",
        ])
        .assert()
        .success()
        .stdout(contains("KPIs"))
        .stdout(contains("Top products"))
        .stdout(contains("Sales by weekday"))
        .stdout(contains("Inventory alerts"));
}
