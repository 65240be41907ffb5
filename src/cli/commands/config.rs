use crate::cli::parser::Commands;
use crate::config::{Config, check};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::info;
use std::fs;
use std::process::Command as ProcessCommand;

pub fn handle(cmd: &Commands, _cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check: do_check,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        if *print_config {
            if !path.exists() {
                return Err(AppError::Config(format!(
                    "Config file not found: {} (run 'stockpos init' first)",
                    path.display()
                )));
            }
            let content = fs::read_to_string(&path)?;
            println!("{}", content);
            return Ok(());
        }

        if *do_check {
            return check::check_config_file();
        }

        if *edit_config {
            let editor_cmd = editor
                .clone()
                .or_else(|| std::env::var("EDITOR").ok())
                .unwrap_or_else(|| {
                    if cfg!(target_os = "windows") {
                        "notepad".to_string()
                    } else {
                        "nano".to_string()
                    }
                });

            let status = ProcessCommand::new(&editor_cmd).arg(&path).status()?;
            if !status.success() {
                return Err(AppError::Config(format!(
                    "Editor '{}' exited with an error",
                    editor_cmd
                )));
            }
            return Ok(());
        }

        info(format!("Config file: {}", path.display()));
    }

    Ok(())
}
