use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;

/// Create the config file (unless in test mode) and the database schema.
pub fn handle(cli: &Cli) -> AppResult<()> {
    Config::init_all(cli.db.clone(), cli.test).map_err(|_| AppError::ConfigSave)?;

    let db_path = match &cli.db {
        Some(custom) => custom.clone(),
        None => Config::load().database,
    };

    let pool = DbPool::new(&db_path)?;
    init_db(&pool.conn)?;

    success("Database initialized.");
    Ok(())
}
