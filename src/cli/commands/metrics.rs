use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::metrics::compute_metrics;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::report::MetricsReport;
use crate::ui::messages::{header, kv};
use crate::utils::colors::{RESET, color_for_change};
use crate::utils::date::{self, WEEKDAY_NAMES};
use crate::utils::formatting::{bar, fmt_change};
use crate::utils::money::fmt_amount;
use crate::utils::table::{Column, Table};
use chrono::{Duration, NaiveDate};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Metrics {
        from,
        to,
        compare_from,
        compare_to,
        json,
    } = cmd
    {
        let today = date::today();

        let end = parse_or(to.as_deref(), today)?;
        let start = parse_or(from.as_deref(), end - Duration::days(6))?;

        let compare = match (compare_from, compare_to) {
            (Some(cf), Some(ct)) => Some((parse_required(cf)?, parse_required(ct)?)),
            _ => None,
        };

        let pool = DbPool::new(&cfg.database)?;
        let report = compute_metrics(&pool.conn, start, end, compare, today)?;

        if *json {
            let text = serde_json::to_string_pretty(&report)
                .map_err(|e| AppError::Other(e.to_string()))?;
            println!("{}", text);
        } else {
            render(&report, &cfg.currency);
        }
    }

    Ok(())
}

fn parse_or(value: Option<&str>, default: NaiveDate) -> AppResult<NaiveDate> {
    match value {
        Some(s) => parse_required(s),
        None => Ok(default),
    }
}

fn parse_required(s: &str) -> AppResult<NaiveDate> {
    date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

fn render(report: &MetricsReport, currency: &str) {
    println!(
        "\nMetrics {} → {} ({} days)",
        report.period.start, report.period.end, report.period.days
    );

    //
    // KPIs
    //
    header("KPIs");
    let k = &report.kpis;
    kv(
        "Revenue",
        format!(
            "{}  {}{}{}",
            fmt_amount(k.revenue, currency),
            color_for_change(k.revenue_change),
            fmt_change(k.revenue_change),
            RESET
        ),
    );
    kv(
        "Sales",
        format!(
            "{}  {}{}{}",
            k.total_sales,
            color_for_change(k.sales_change),
            fmt_change(k.sales_change),
            RESET
        ),
    );
    kv(
        "Units sold",
        format!(
            "{}  {}{}{}",
            k.units_sold,
            color_for_change(k.units_change),
            fmt_change(k.units_change),
            RESET
        ),
    );
    kv(
        "Avg ticket",
        format!(
            "{}  {}{}{}",
            fmt_amount(k.avg_ticket, currency),
            color_for_change(k.ticket_change),
            fmt_change(k.ticket_change),
            RESET
        ),
    );

    //
    // Daily series
    //
    header("Daily revenue");
    let max_rev = report
        .time_series
        .revenue
        .iter()
        .cloned()
        .fold(0.0f64, f64::max);
    for (i, label) in report.time_series.labels.iter().enumerate() {
        let rev = report.time_series.revenue[i];
        let sales = report.time_series.sales[i];
        let filled = if max_rev > 0.0 {
            ((rev / max_rev) * 20.0).round() as i64
        } else {
            0
        };
        println!(
            "  {:<6} {:>12}  {:<20}  ({} sales)",
            label,
            fmt_amount(rev, currency),
            bar(filled, 20, 20),
            sales
        );
    }

    //
    // Top products
    //
    header("Top products");
    if report.top_products.is_empty() {
        println!("  No sales in this window.");
    } else {
        let mut table = Table::new(vec![
            Column::right("#", 3),
            Column::left("NAME", 25),
            Column::left("SKU", 14),
            Column::right("UNITS", 6),
            Column::right("REVENUE", 12),
        ]);
        for (i, p) in report.top_products.iter().enumerate() {
            table.add_row(vec![
                (i + 1).to_string(),
                p.name.clone(),
                p.sku.clone(),
                p.units.to_string(),
                fmt_amount(p.revenue, currency),
            ]);
        }
        print!("{}", table.render());
    }

    //
    // Histograms
    //
    header("Sales by weekday");
    let max_wd = report.weekday_histogram.iter().copied().max().unwrap_or(0);
    for (i, name) in WEEKDAY_NAMES.iter().enumerate() {
        let count = report.weekday_histogram[i];
        println!(
            "  {:<4} {:>4}  {}",
            name,
            count,
            bar(count, max_wd, 20)
        );
    }

    header("Sales by hour");
    let max_h = report.hour_histogram.iter().copied().max().unwrap_or(0);
    for (hour, count) in report.hour_histogram.iter().enumerate() {
        if *count > 0 {
            println!("  {:02}:00 {:>4}  {}", hour, count, bar(*count, max_h, 20));
        }
    }
    if max_h == 0 {
        println!("  No sales in this window.");
    }

    //
    // Alerts
    //
    header("Inventory alerts");
    kv("Out of stock", report.alerts.out_of_stock);
    kv("Low stock", report.alerts.low_stock);
    kv("No movement 30d", report.alerts.no_movement);

    //
    // Insights
    //
    header("Insights");
    match &report.insights.best_day {
        Some(day) => kv(
            "Best day",
            format!(
                "{} ({} sales, {})",
                day.weekday,
                day.sales,
                fmt_amount(day.revenue, currency)
            ),
        ),
        None => kv("Best day", "--"),
    }
    match report.insights.peak_hour {
        Some(hour) => kv("Peak hour", format!("{:02}:00", hour)),
        None => kv("Peak hour", "--"),
    }
    match &report.insights.top_product {
        Some(name) => kv("Top product", name),
        None => kv("Top product", "--"),
    }
    kv("Trend", &report.insights.trend);
    println!();
}
