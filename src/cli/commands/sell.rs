use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::checkout::CheckoutLogic;
use crate::core::sell::SellLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

/// Record a single-item sale at the current local time.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Sell { ident, quantity } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;
        let now = chrono::Local::now().naive_local();

        SellLogic::apply(&mut pool, ident, *quantity, now, &cfg.currency)?;
    }

    Ok(())
}

/// Record a multi-line sale, all-or-nothing.
pub fn handle_checkout(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Checkout { lines } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;
        let now = chrono::Local::now().naive_local();

        CheckoutLogic::apply(&mut pool, lines, now, &cfg.currency)?;
    }

    Ok(())
}
