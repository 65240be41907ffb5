use crate::cli::parser::{Commands, ItemCommands};
use crate::config::Config;
use crate::core::item::ItemLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::item::{ItemPatch, ItemStatus};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Item { action } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        match action {
            ItemCommands::Add {
                name,
                barcode,
                description,
                stock,
                min_stock,
                price,
            } => {
                ItemLogic::add(
                    &mut pool,
                    name,
                    barcode.as_deref(),
                    description.as_deref(),
                    *stock,
                    min_stock.unwrap_or(cfg.default_min_stock),
                    *price,
                )?;
            }

            ItemCommands::Edit {
                ident,
                name,
                barcode,
                description,
                stock,
                min_stock,
                price,
            } => {
                // An empty --barcode clears the stored barcode.
                let barcode_patch = barcode.as_ref().map(|b| {
                    let trimmed = b.trim();
                    if trimmed.is_empty() {
                        None
                    } else {
                        Some(trimmed.to_string())
                    }
                });

                let patch = ItemPatch {
                    barcode: barcode_patch,
                    name: name.clone(),
                    description: description.clone(),
                    stock: *stock,
                    min_stock: *min_stock,
                    price: *price,
                    status: None,
                };

                ItemLogic::edit(&mut pool, ident, &patch)?;
            }

            ItemCommands::Disable { ident } => {
                ItemLogic::set_status(&mut pool, ident, ItemStatus::Disabled)?;
            }

            ItemCommands::Enable { ident } => {
                ItemLogic::set_status(&mut pool, ident, ItemStatus::Active)?;
            }

            ItemCommands::List { low, all } => {
                ItemLogic::list(&mut pool, *low, *all, &cfg.currency)?;
            }
        }
    }

    Ok(())
}
