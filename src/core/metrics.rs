//! Analytics aggregator: assembles the metrics report from the read-only
//! queries in `db::metrics`. Never mutates the store.

use crate::db::metrics as q;
use crate::errors::{AppError, AppResult};
use crate::models::report::{
    Alerts, BestDay, Insights, Kpis, MetricsReport, Period, TimeSeries, TopProduct,
};
use crate::utils::date::{
    WEEKDAY_NAMES, day_label, days_between, previous_period, weekday_monday_first,
};
use crate::utils::money::{pct_change, round2};
use chrono::{Duration, NaiveDate};
use rusqlite::Connection;
use std::collections::HashMap;

const TOP_PRODUCTS_LIMIT: i64 = 10;
const NO_MOVEMENT_DAYS: i64 = 30;

/// Compute the full metrics report for an inclusive date window.
///
/// When no explicit comparison window is given, the previous window is the
/// immediately preceding period of equal length. `today` anchors the
/// catalog alerts (which look at current state, not the window).
pub fn compute_metrics(
    conn: &Connection,
    start: NaiveDate,
    end: NaiveDate,
    compare: Option<(NaiveDate, NaiveDate)>,
    today: NaiveDate,
) -> AppResult<MetricsReport> {
    if end < start {
        return Err(AppError::InvalidDateRange(format!(
            "end {} is before start {}",
            end, start
        )));
    }

    let (prev_start, prev_end) = compare.unwrap_or_else(|| previous_period(start, end));
    if prev_end < prev_start {
        return Err(AppError::InvalidDateRange(format!(
            "comparison end {} is before start {}",
            prev_end, prev_start
        )));
    }

    // --- KPIs, current vs previous window
    let (revenue, total_sales, units_sold) = q::kpis(conn, start, end)?;
    let (prev_revenue, prev_sales, prev_units) = q::kpis(conn, prev_start, prev_end)?;

    let avg_ticket = if total_sales > 0 {
        round2(revenue / total_sales as f64)
    } else {
        0.0
    };
    let prev_ticket = if prev_sales > 0 {
        round2(prev_revenue / prev_sales as f64)
    } else {
        0.0
    };

    let kpis = Kpis {
        revenue: round2(revenue),
        total_sales,
        units_sold,
        avg_ticket,
        revenue_change: pct_change(revenue, prev_revenue),
        sales_change: pct_change(total_sales as f64, prev_sales as f64),
        units_change: pct_change(units_sold as f64, prev_units as f64),
        ticket_change: pct_change(avg_ticket, prev_ticket),
    };

    // --- Dense per-day series, zero-filled over the whole window
    let days = days_between(start, end);
    let window_days = days.len() as i64;

    let by_day: HashMap<String, (f64, i64)> = q::revenue_by_day(conn, start, end)?
        .into_iter()
        .map(|(date, rev, sales)| (date, (rev, sales)))
        .collect();

    let mut series = TimeSeries {
        labels: Vec::with_capacity(days.len()),
        revenue: Vec::with_capacity(days.len()),
        sales: Vec::with_capacity(days.len()),
    };
    for day in &days {
        let key = day.format("%Y-%m-%d").to_string();
        let (rev, sales) = by_day.get(&key).copied().unwrap_or((0.0, 0));
        series.labels.push(day_label(*day, window_days));
        series.revenue.push(round2(rev));
        series.sales.push(sales);
    }

    // --- Top products
    let top_products: Vec<TopProduct> = q::top_products(conn, start, end, TOP_PRODUCTS_LIMIT)?
        .into_iter()
        .map(|mut p| {
            p.revenue = round2(p.revenue);
            p
        })
        .collect();

    // --- Weekday histogram (Monday-first) + per-weekday revenue
    let mut weekday_histogram = [0i64; 7];
    let mut weekday_revenue = [0f64; 7];
    for (wd, sales, rev) in q::sales_by_weekday(conn, start, end)? {
        let bucket = weekday_monday_first(wd);
        weekday_histogram[bucket] = sales;
        weekday_revenue[bucket] = rev;
    }

    // --- Hourly histogram
    let mut hour_histogram = [0i64; 24];
    for (hour, sales) in q::sales_by_hour(conn, start, end)? {
        if let Some(bucket) = hour_histogram.get_mut(hour as usize) {
            *bucket = sales;
        }
    }

    // --- Catalog alerts (current state, not the window)
    let alerts = Alerts {
        out_of_stock: q::count_out_of_stock(conn)?,
        low_stock: q::count_low_stock(conn)?,
        no_movement: q::count_no_movement(conn, today - Duration::days(NO_MOVEMENT_DAYS))?,
    };

    let insights = derive_insights(
        &weekday_histogram,
        &weekday_revenue,
        &hour_histogram,
        &top_products,
        kpis.revenue_change,
        prev_sales,
    );

    Ok(MetricsReport {
        kpis,
        time_series: series,
        top_products,
        weekday_histogram,
        hour_histogram,
        alerts,
        insights,
        period: Period {
            start,
            end,
            days: window_days,
        },
    })
}

/// Best-effort derivations: each sub-insight degrades to None / a neutral
/// sentence when its inputs are empty.
fn derive_insights(
    weekday_histogram: &[i64; 7],
    weekday_revenue: &[f64; 7],
    hour_histogram: &[i64; 24],
    top_products: &[TopProduct],
    revenue_change: f64,
    prev_sales: i64,
) -> Insights {
    let best_day = weekday_histogram
        .iter()
        .enumerate()
        .max_by_key(|(_, sales)| **sales)
        .filter(|(_, sales)| **sales > 0)
        .map(|(i, sales)| BestDay {
            weekday: WEEKDAY_NAMES[i].to_string(),
            sales: *sales,
            revenue: round2(weekday_revenue[i]),
        });

    let peak_hour = hour_histogram
        .iter()
        .enumerate()
        .max_by_key(|(_, sales)| **sales)
        .filter(|(_, sales)| **sales > 0)
        .map(|(hour, _)| hour as u32);

    let top_product = top_products.first().map(|p| p.name.clone());

    let trend = if prev_sales == 0 {
        "No previous-period data to compare against yet.".to_string()
    } else if revenue_change > 10.0 {
        format!(
            "Revenue is growing strongly ({:+.1}% vs the previous period).",
            revenue_change
        )
    } else if revenue_change >= 0.0 {
        format!(
            "Revenue is stable or slightly up ({:+.1}% vs the previous period).",
            revenue_change
        )
    } else if revenue_change >= -10.0 {
        format!(
            "Revenue is slightly down ({:+.1}% vs the previous period).",
            revenue_change
        )
    } else {
        format!(
            "Revenue is falling sharply ({:+.1}% vs the previous period).",
            revenue_change
        )
    };

    Insights {
        best_day,
        peak_hour,
        top_product,
        trend,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::db::ledger::record_sale;
    use crate::models::item::{Item, ItemStatus};
    use chrono::NaiveDateTime;

    fn mem_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();
        conn
    }

    fn add_item(conn: &Connection, name: &str, stock: i64, price: f64) -> i64 {
        let item = Item {
            id: 0,
            barcode: None,
            name: name.to_string(),
            description: String::new(),
            stock,
            min_stock: 2,
            price,
            status: ItemStatus::Active,
            created_at: "2025-01-01T00:00:00+00:00".to_string(),
        };
        crate::db::catalog::insert_item(conn, &item).unwrap()
    }

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn same_day_sales_aggregate() {
        let mut conn = mem_db();
        let a = add_item(&conn, "Notebook", 50, 10.0);
        let b = add_item(&conn, "Pen", 50, 15.0);

        record_sale(&mut conn, &a.to_string(), 1, dt("2025-06-04 10:00:00")).unwrap();
        record_sale(&mut conn, &b.to_string(), 1, dt("2025-06-04 16:30:00")).unwrap();

        let d = date("2025-06-04");
        let report = compute_metrics(&conn, d, d, None, d).unwrap();

        assert_eq!(report.kpis.revenue, 25.0);
        assert_eq!(report.kpis.total_sales, 2);
        assert_eq!(report.kpis.avg_ticket, 12.5);
        assert_eq!(report.kpis.units_sold, 2);
    }

    #[test]
    fn histograms_sum_to_total_sales() {
        let mut conn = mem_db();
        let a = add_item(&conn, "Notebook", 50, 10.0);

        record_sale(&mut conn, &a.to_string(), 1, dt("2025-06-02 09:00:00")).unwrap();
        record_sale(&mut conn, &a.to_string(), 2, dt("2025-06-04 14:00:00")).unwrap();
        record_sale(&mut conn, &a.to_string(), 1, dt("2025-06-07 14:00:00")).unwrap();

        let report = compute_metrics(
            &conn,
            date("2025-06-02"),
            date("2025-06-08"),
            None,
            date("2025-06-08"),
        )
        .unwrap();

        let weekday_sum: i64 = report.weekday_histogram.iter().sum();
        let hour_sum: i64 = report.hour_histogram.iter().sum();
        assert_eq!(weekday_sum, report.kpis.total_sales);
        assert_eq!(hour_sum, report.kpis.total_sales);

        // 2025-06-02 is a Monday, bucket 0; 06-04 Wednesday, bucket 2.
        assert_eq!(report.weekday_histogram[0], 1);
        assert_eq!(report.weekday_histogram[2], 1);
        assert_eq!(report.hour_histogram[14], 2);
    }

    #[test]
    fn series_is_dense_and_zero_filled() {
        let mut conn = mem_db();
        let a = add_item(&conn, "Notebook", 50, 10.0);
        record_sale(&mut conn, &a.to_string(), 1, dt("2025-06-03 09:00:00")).unwrap();

        let report = compute_metrics(
            &conn,
            date("2025-06-02"),
            date("2025-06-08"),
            None,
            date("2025-06-08"),
        )
        .unwrap();

        assert_eq!(report.time_series.labels.len(), 7);
        assert_eq!(report.time_series.labels[0], "Mon");
        assert_eq!(report.time_series.revenue[0], 0.0);
        assert_eq!(report.time_series.revenue[1], 10.0);
        assert_eq!(report.time_series.sales.iter().sum::<i64>(), 1);
    }

    #[test]
    fn long_window_uses_date_labels() {
        let conn = mem_db();
        let report = compute_metrics(
            &conn,
            date("2025-06-01"),
            date("2025-06-30"),
            None,
            date("2025-07-01"),
        )
        .unwrap();
        assert_eq!(report.time_series.labels[0], "01/06");
        assert_eq!(report.period.days, 30);
    }

    #[test]
    fn idempotent_with_no_intervening_sales() {
        let mut conn = mem_db();
        let a = add_item(&conn, "Notebook", 50, 10.0);
        record_sale(&mut conn, &a.to_string(), 3, dt("2025-06-03 09:00:00")).unwrap();

        let args = (date("2025-06-01"), date("2025-06-07"), date("2025-06-08"));
        let one = compute_metrics(&conn, args.0, args.1, None, args.2).unwrap();
        let two = compute_metrics(&conn, args.0, args.1, None, args.2).unwrap();

        assert_eq!(
            serde_json::to_string(&one).unwrap(),
            serde_json::to_string(&two).unwrap()
        );
    }

    #[test]
    fn rejects_inverted_range() {
        let conn = mem_db();
        let res = compute_metrics(
            &conn,
            date("2025-06-08"),
            date("2025-06-02"),
            None,
            date("2025-06-08"),
        );
        assert!(matches!(res, Err(AppError::InvalidDateRange(_))));
    }

    #[test]
    fn trend_neutral_without_prior_data() {
        let mut conn = mem_db();
        let a = add_item(&conn, "Notebook", 50, 10.0);
        record_sale(&mut conn, &a.to_string(), 1, dt("2025-06-03 09:00:00")).unwrap();

        let report = compute_metrics(
            &conn,
            date("2025-06-01"),
            date("2025-06-07"),
            None,
            date("2025-06-08"),
        )
        .unwrap();
        assert!(report.insights.trend.contains("No previous-period data"));
        assert_eq!(report.insights.peak_hour, Some(9));
        assert_eq!(report.insights.top_product.as_deref(), Some("Notebook"));
    }

    #[test]
    fn peak_hour_is_none_when_no_sales() {
        let conn = mem_db();
        let report = compute_metrics(
            &conn,
            date("2025-06-01"),
            date("2025-06-07"),
            None,
            date("2025-06-08"),
        )
        .unwrap();
        assert_eq!(report.insights.peak_hour, None);
        assert!(report.insights.best_day.is_none());
        assert_eq!(report.kpis.avg_ticket, 0.0);
    }

    #[test]
    fn alerts_reflect_current_catalog() {
        let mut conn = mem_db();
        let sold_out = add_item(&conn, "Empty", 1, 5.0);
        add_item(&conn, "Low", 2, 5.0); // min_stock 2 → low
        add_item(&conn, "Healthy", 50, 5.0);

        let d = date("2025-06-04");
        record_sale(&mut conn, &sold_out.to_string(), 1, dt("2025-06-04 10:00:00")).unwrap();

        let report = compute_metrics(&conn, d, d, None, d).unwrap();
        assert_eq!(report.alerts.out_of_stock, 1);
        assert_eq!(report.alerts.low_stock, 1);
        // "Low" and "Healthy" have no movement in the trailing window.
        assert_eq!(report.alerts.no_movement, 2);
    }

    #[test]
    fn explicit_comparison_window() {
        let mut conn = mem_db();
        let a = add_item(&conn, "Notebook", 50, 10.0);
        record_sale(&mut conn, &a.to_string(), 1, dt("2025-05-10 10:00:00")).unwrap();
        record_sale(&mut conn, &a.to_string(), 2, dt("2025-06-10 10:00:00")).unwrap();

        let report = compute_metrics(
            &conn,
            date("2025-06-01"),
            date("2025-06-30"),
            Some((date("2025-05-01"), date("2025-05-31"))),
            date("2025-07-01"),
        )
        .unwrap();

        // 20.0 now vs 10.0 before → +100%
        assert_eq!(report.kpis.revenue_change, 100.0);
        assert!(report.insights.trend.contains("growing strongly"));
    }
}
