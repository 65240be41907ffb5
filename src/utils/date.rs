use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Expand a period expression into an inclusive (start, end) pair.
/// Accepted forms: "YYYY-MM-DD", "YYYY-MM", "YYYY" and "start:end" where
/// both sides use any of the former.
pub fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    if let Some((a, b)) = p.split_once(':') {
        let (start, _) = single_period_bounds(a)?;
        let (_, end) = single_period_bounds(b)?;
        if end < start {
            return Err(AppError::InvalidDateRange(p.to_string()));
        }
        return Ok((start, end));
    }
    single_period_bounds(p)
}

fn single_period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    // YYYY-MM-DD
    if let Ok(d) = NaiveDate::parse_from_str(p, "%Y-%m-%d") {
        return Ok((d, d));
    }

    // YYYY-MM
    if let Ok(first) = NaiveDate::parse_from_str(&format!("{}-01", p), "%Y-%m-%d") {
        let last = last_day_of_month(first.year(), first.month());
        return Ok((first, last));
    }

    // YYYY
    if p.len() == 4
        && let Ok(year) = p.parse::<i32>()
    {
        let first = NaiveDate::from_ymd_opt(year, 1, 1)
            .ok_or_else(|| AppError::InvalidDate(p.to_string()))?;
        let last = NaiveDate::from_ymd_opt(year, 12, 31)
            .ok_or_else(|| AppError::InvalidDate(p.to_string()))?;
        return Ok((first, last));
    }

    Err(AppError::InvalidDate(p.to_string()))
}

fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    first_of_next.unwrap().pred_opt().unwrap()
}

/// Every calendar day of the inclusive range, in order.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    let mut d = start;
    while d <= end {
        out.push(d);
        d = d.succ_opt().unwrap();
    }
    out
}

/// Comparison window: the immediately preceding period of equal length.
/// For a 7-day window the result is the 7 days right before `start`.
pub fn previous_period(start: NaiveDate, end: NaiveDate) -> (NaiveDate, NaiveDate) {
    let days = (end - start).num_days() + 1;
    let prev_end = start.pred_opt().unwrap();
    let prev_start = prev_end - chrono::Duration::days(days - 1);
    (prev_start, prev_end)
}

/// Remap SQLite's Sunday-first weekday number (`strftime('%w')`, 0 =
/// Sunday) to a Monday-first index (0 = Monday .. 6 = Sunday).
pub fn weekday_monday_first(sunday_first: u32) -> usize {
    ((sunday_first + 6) % 7) as usize
}

pub const WEEKDAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Chart label for one day of the series. Short windows show the weekday,
/// longer ones a day/month date.
pub fn day_label(d: NaiveDate, window_days: i64) -> String {
    if window_days <= 7 {
        d.format("%a").to_string()
    } else {
        d.format("%d/%m").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekday_remap_is_monday_first() {
        // SQLite %w: 0=Sunday, 1=Monday, ..., 6=Saturday
        assert_eq!(weekday_monday_first(1), 0); // Monday
        assert_eq!(weekday_monday_first(6), 5); // Saturday
        assert_eq!(weekday_monday_first(0), 6); // Sunday
    }

    #[test]
    fn previous_period_of_week_is_week_before() {
        let start = NaiveDate::from_ymd_opt(2025, 9, 8).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 9, 14).unwrap();
        let (ps, pe) = previous_period(start, end);
        assert_eq!(ps, NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
        assert_eq!(pe, NaiveDate::from_ymd_opt(2025, 9, 7).unwrap());
    }

    #[test]
    fn previous_period_of_single_day() {
        let d = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let (ps, pe) = previous_period(d, d);
        assert_eq!(ps, NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
        assert_eq!(pe, ps);
    }

    #[test]
    fn period_bounds_month() {
        let (s, e) = period_bounds("2025-02").unwrap();
        assert_eq!(s, NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
        assert_eq!(e, NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
    }

    #[test]
    fn period_bounds_range() {
        let (s, e) = period_bounds("2024-12:2025-01").unwrap();
        assert_eq!(s, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        assert_eq!(e, NaiveDate::from_ymd_opt(2025, 1, 31).unwrap());
    }

    #[test]
    fn period_bounds_rejects_inverted_range() {
        assert!(period_bounds("2025-05:2025-01").is_err());
    }

    #[test]
    fn labels_follow_window_length() {
        let d = NaiveDate::from_ymd_opt(2025, 9, 8).unwrap(); // a Monday
        assert_eq!(day_label(d, 7), "Mon");
        assert_eq!(day_label(d, 30), "08/09");
    }

    #[test]
    fn days_between_is_dense() {
        let s = NaiveDate::from_ymd_opt(2025, 1, 30).unwrap();
        let e = NaiveDate::from_ymd_opt(2025, 2, 2).unwrap();
        let days = days_between(s, e);
        assert_eq!(days.len(), 4);
        assert_eq!(days[1], NaiveDate::from_ymd_opt(2025, 1, 31).unwrap());
    }
}
