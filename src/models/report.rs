//! Metrics report returned by the analytics aggregator.
//! Everything here is plain serializable data; computation lives in
//! `core::metrics` and `db::metrics`.

use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Kpis {
    pub revenue: f64,
    pub total_sales: i64,
    pub units_sold: i64,
    pub avg_ticket: f64,
    pub revenue_change: f64,
    pub sales_change: f64,
    pub units_change: f64,
    pub ticket_change: f64,
}

/// Dense per-day series over the primary window: one entry per calendar
/// day, zero-filled, no gaps.
#[derive(Debug, Clone, Serialize)]
pub struct TimeSeries {
    pub labels: Vec<String>,
    pub revenue: Vec<f64>,
    pub sales: Vec<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopProduct {
    pub item_id: i64,
    pub name: String,
    pub sku: String,
    pub units: i64,
    pub revenue: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Alerts {
    pub out_of_stock: i64,
    pub low_stock: i64,
    pub no_movement: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BestDay {
    pub weekday: String,
    pub sales: i64,
    pub revenue: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Insights {
    pub best_day: Option<BestDay>,
    pub peak_hour: Option<u32>,
    pub top_product: Option<String>,
    pub trend: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub kpis: Kpis,
    pub time_series: TimeSeries,
    pub top_products: Vec<TopProduct>,
    /// Monday-first, 7 buckets: distinct sales per weekday.
    pub weekday_histogram: [i64; 7],
    /// 24 buckets: distinct sales per hour of day.
    pub hour_histogram: [i64; 24],
    pub alerts: Alerts,
    pub insights: Insights,
    pub period: Period,
}
