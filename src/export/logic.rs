use crate::db::ledger::load_sales_between;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::model::flatten;
use crate::export::{ExportFormat, csv_out, fs_utils, json_out, notify_export_success};
use crate::utils::date;
use chrono::NaiveDate;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Export sale lines for an optional period to CSV or JSON.
    pub fn export(
        pool: &mut DbPool,
        format: &ExportFormat,
        file: &str,
        range: Option<&str>,
        force: bool,
    ) -> AppResult<()> {
        let (start, end) = match range {
            Some(period) => date::period_bounds(period)?,
            None => (
                NaiveDate::from_ymd_opt(1970, 1, 1).unwrap(),
                date::today(),
            ),
        };

        let sales = load_sales_between(pool, start, end)?;
        let rows = flatten(&sales);

        let dest = Path::new(file);
        fs_utils::ensure_parent_dir(dest)?;
        if !fs_utils::confirm_overwrite(dest, force)? {
            println!("❌ Export cancelled by user.");
            return Ok(());
        }

        match format {
            ExportFormat::Csv => csv_out::write_csv(file, &rows)?,
            ExportFormat::Json => json_out::write_json(file, &rows)?,
        }

        audit(
            &pool.conn,
            "export",
            file,
            &format!("{} rows exported as {}", rows.len(), format.as_str()),
        )?;

        notify_export_success(
            match format {
                ExportFormat::Csv => "CSV",
                ExportFormat::Json => "JSON",
            },
            dest,
        );
        Ok(())
    }
}
