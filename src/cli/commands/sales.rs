use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::ledger::load_sales_between;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::date;
use crate::utils::money::fmt_amount;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Sales { period } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        let (start, end) = match period {
            Some(p) => date::period_bounds(p)?,
            None => {
                // current month by default
                let today = date::today();
                date::period_bounds(&today.format("%Y-%m").to_string())?
            }
        };

        let sales = load_sales_between(&mut pool, start, end)?;

        if sales.is_empty() {
            println!("No sales between {} and {}.", start, end);
            return Ok(());
        }

        let mut revenue = 0.0;
        for sale in &sales {
            println!(
                "Sale #{}  {} {}  total {}",
                sale.sale.id,
                sale.sale.date_str(),
                sale.sale.time_str(),
                fmt_amount(sale.total, &cfg.currency)
            );
            for line in &sale.lines {
                println!(
                    "    {:<25} x{:<4} @ {:>10} = {:>10}",
                    line.name,
                    line.quantity,
                    fmt_amount(line.unit_price, &cfg.currency),
                    fmt_amount(line.subtotal, &cfg.currency)
                );
            }
            revenue += sale.total;
        }

        println!();
        println!(
            "{} sales, revenue {}",
            sales.len(),
            fmt_amount(revenue, &cfg.currency)
        );
    }

    Ok(())
}
